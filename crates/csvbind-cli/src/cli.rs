//! CLI argument definitions for csvbind.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use csvbind_cli::dynamic::FieldSpec;

#[derive(Parser)]
#[command(
    name = "csvbind",
    version,
    about = "Read CSV files as header-keyed rows or typed records",
    long_about = "Read delimited text files whose first line is a header row.\n\n\
                  Rows can be printed as-is or mapped onto a record type declared\n\
                  with --field NAME:KIND options."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every file below a directory.
    Files(FilesArgs),

    /// Print the rows of a CSV file.
    Rows(RowsArgs),

    /// Map the rows of a CSV file onto declared fields.
    Map(MapArgs),
}

#[derive(Args)]
pub struct FilesArgs {
    /// Directory to search recursively.
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Only list files with this extension (case-insensitive, without dot).
    #[arg(long = "extension", value_name = "EXT")]
    pub extension: Option<String>,
}

#[derive(Args)]
pub struct ReadArgs {
    /// CSV file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field delimiter: a single ASCII character, or `tab`.
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Output format.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct RowsArgs {
    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub read: ReadArgs,

    /// Field declaration NAME:KIND, where KIND is text, integer, long, boolean or other.
    #[arg(long = "field", value_name = "NAME:KIND", required = true)]
    pub fields: Vec<FieldSpec>,
}

/// CLI output format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
                _ => Err(format!(
                    "delimiter must be a single ASCII character, got '{value}'"
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvbind::FieldKind;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_parse_map_command() {
        let cli = Cli::try_parse_from([
            "csvbind",
            "map",
            "data.csv",
            "--field",
            "stringField:text",
            "--field",
            "integerField:integer",
            "--delimiter",
            ";",
            "--output",
            "json",
        ])
        .unwrap();

        let Command::Map(args) = cli.command else {
            panic!("expected map command");
        };
        assert_eq!(args.read.file, PathBuf::from("data.csv"));
        assert_eq!(args.read.delimiter, b';');
        assert_eq!(args.read.output, OutputArg::Json);
        assert_eq!(args.fields.len(), 2);
        assert_eq!(args.fields[1].kind, FieldKind::Integer);
    }

    #[test]
    fn test_map_requires_fields() {
        assert!(Cli::try_parse_from(["csvbind", "map", "data.csv"]).is_err());
    }

    #[test]
    fn test_parse_files_command() {
        let cli =
            Cli::try_parse_from(["csvbind", "-v", "files", "data", "--extension", "csv"]).unwrap();
        let Command::Files(args) = cli.command else {
            panic!("expected files command");
        };
        assert_eq!(args.extension.as_deref(), Some("csv"));
        assert!(cli.verbosity.is_present());
    }
}
