use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use csvbind::{ReadOptions, find_files, has_extension, read_rows_as_objects_with, read_rows_with};
use csvbind_cli::dynamic::build_target;

use crate::cli::{FilesArgs, MapArgs, OutputArg, ReadArgs, RowsArgs};
use crate::output::{print_files, records_table, rows_table, write_json_lines};

pub fn run_files(args: &FilesArgs) -> Result<()> {
    let span = info_span!("files", root = %args.root.display());
    let _guard = span.enter();

    let mut files: Vec<PathBuf> = find_files(&args.root)
        .with_context(|| format!("list files: {}", args.root.display()))?;
    if let Some(ext) = &args.extension {
        files.retain(|path| has_extension(path, ext));
    }
    info!(count = files.len(), "Listed files");
    print_files(&files);
    Ok(())
}

pub fn run_rows(args: &RowsArgs) -> Result<()> {
    let read = &args.read;
    let span = info_span!("rows", file = %read.file.display());
    let _guard = span.enter();

    let rows = read_rows_with(&read.file, &read_options(read))
        .with_context(|| format!("read csv: {}", read.file.display()))?;
    info!(rows = rows.len(), "Read rows");
    match read.output {
        OutputArg::Table => println!("{}", rows_table(&rows)),
        OutputArg::Json => write_json_lines(&rows)?,
    }
    Ok(())
}

pub fn run_map(args: &MapArgs) -> Result<()> {
    let read = &args.read;
    let span = info_span!("map", file = %read.file.display(), fields = args.fields.len());
    let _guard = span.enter();

    let target = build_target(&args.fields);
    let records = read_rows_as_objects_with(&read.file, &target, &read_options(read))
        .with_context(|| format!("map csv: {}", read.file.display()))?;
    info!(records = records.len(), "Mapped rows");
    match read.output {
        OutputArg::Table => println!("{}", records_table(&args.fields, &records)),
        OutputArg::Json => write_json_lines(&records)?,
    }
    Ok(())
}

fn read_options(args: &ReadArgs) -> ReadOptions {
    ReadOptions::new().with_delimiter(args.delimiter)
}
