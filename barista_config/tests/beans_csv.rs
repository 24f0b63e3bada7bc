use barista_config::{BeanRow, load_beans_csv};
use std::fs;
use tempfile::tempdir;

fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("beans.csv");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn parses_rows_with_optional_roast_level() {
    let (_dir, path) = write_csv(
        "roaster,bean,grind,roast_level\nSquare Mile,Red Brick,12,3\nOnyx, Geometry ,9,\n",
    );
    let rows = load_beans_csv(&path).expect("valid csv");
    assert_eq!(
        rows,
        vec![
            BeanRow {
                roaster: "Square Mile".into(),
                bean: "Red Brick".into(),
                grind: "12".into(),
                roast_level: Some(3),
            },
            BeanRow {
                roaster: "Onyx".into(),
                bean: "Geometry".into(),
                grind: "9".into(),
                roast_level: None,
            },
        ]
    );
}

#[test]
fn rejects_wrong_headers() {
    let (_dir, path) = write_csv("roaster,name,grind\nA,B,1\n");
    let err = load_beans_csv(&path).unwrap_err();
    assert!(format!("{err}").contains("must have headers 'roaster,bean,grind,roast_level'"));
}

#[test]
fn reports_line_of_bad_row() {
    let (_dir, path) = write_csv("roaster,bean,grind,roast_level\nA,B,1,3\nC,D,2,dark\n");
    let err = load_beans_csv(&path).unwrap_err();
    assert!(format!("{err}").contains("invalid CSV row 3"), "{err}");
}

#[test]
fn rejects_header_only_file() {
    let (_dir, path) = write_csv("roaster,bean,grind,roast_level\n");
    let err = load_beans_csv(&path).unwrap_err();
    assert!(format!("{err}").contains("has no rows"));
}
