use std::fs;
use std::path::PathBuf;

use rusty_workbench::data::loader::load_file;
use rusty_workbench::{demo, ColumnKind, TableParser};

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rusty-workbench-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_demo_csv_from_disk() {
    let path = scratch_file("demo.csv", demo::DEMO_CSV);
    let table = load_file(&path, &TableParser::default()).unwrap();
    assert_eq!(table.len(), 15);
    assert_eq!(table.numeric_columns().count(), 4);
}

#[test]
fn txt_uses_the_same_parser() {
    let path = scratch_file("quoted.TXT", "\"city\",'pop'\n\"Paris, FR\",2.1\nLyon,0.5\n");
    let table = load_file(&path, &TableParser::default()).unwrap();
    assert_eq!(table.column("pop").map(|c| c.kind), Some(ColumnKind::Numeric));
    assert_eq!(
        table.rows()[0].get("city").map(|v| v.to_string()),
        Some("Paris, FR".to_string())
    );
}

#[test]
fn loads_json_records() {
    let path = scratch_file(
        "records.json",
        r#"[{"team": "red", "points": 3}, {"team": "blue", "points": 5}]"#,
    );
    let table = load_file(&path, &TableParser::default()).unwrap();
    assert_eq!(table.numeric_values("points"), vec![3.0, 5.0]);
}

#[test]
fn header_only_file_is_an_error() {
    let path = scratch_file("header.csv", "a,b,c\n");
    assert!(load_file(&path, &TableParser::default()).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("rusty-workbench-does-not-exist.csv");
    assert!(load_file(&path, &TableParser::default()).is_err());
}
