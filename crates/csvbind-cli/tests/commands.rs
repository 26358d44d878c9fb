//! End-to-end tests for the csvbind binary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn csvbind() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_csvbind"));
    command.env_remove("RUST_LOG").arg("--color").arg("never");
    command
}

#[test]
fn map_prints_json_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("values.csv");
    fs::write(&path, "a,b,c,d\nRow1,1,1,true\nRow2,2,2,false\n").unwrap();

    let output = csvbind()
        .arg("map")
        .arg(&path)
        .args(["--field", "a:text", "--field", "b:integer"])
        .args(["--field", "c:long", "--field", "d:boolean"])
        .args(["--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"a":"Row1","b":1,"c":1,"d":true}"#,
            r#"{"a":"Row2","b":2,"c":2,"d":false}"#,
        ]
    );
}

#[test]
fn rows_prints_json_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("values.csv");
    fs::write(&path, "x;y\n1;\n").unwrap();

    let output = csvbind()
        .arg("rows")
        .arg(&path)
        .args(["--delimiter", ";", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "{\"x\":\"1\",\"y\":\"\"}\n");
}

#[test]
fn unknown_header_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("values.csv");
    fs::write(&path, "a,wrong\nRow1,1\n").unwrap();

    let output = csvbind()
        .arg("map")
        .arg(&path)
        .args(["--field", "a:text"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("could not find field wrong in type Record"), "{stderr}");
}

#[test]
fn files_filters_by_extension() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/a.csv"), "h\n").unwrap();
    fs::write(dir.path().join("b.txt"), "h\n").unwrap();

    let output = csvbind()
        .arg("files")
        .arg(dir.path())
        .args(["--extension", "csv"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.trim_end().ends_with("a.csv"));
}

#[test]
fn error_cause_is_printed_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("values.csv");
    fs::write(&path, "a,b\nRow1,\n").unwrap();

    let output = csvbind()
        .arg("map")
        .arg(&path)
        .args(["--field", "a:text", "--field", "b:integer"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("could not parse value '' of field b as integer"), "{stderr}");
    assert_eq!(stderr.matches("cannot parse integer from empty string").count(), 1, "{stderr}");
}

#[test]
fn directory_as_file_reports_open_failure() {
    let dir = TempDir::new().unwrap();

    let output = csvbind().arg("rows").arg(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("could not open CSV file"), "{stderr}");
    assert!(stderr.contains("path is a directory"), "{stderr}");
}
