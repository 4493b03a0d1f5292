//! Unit tests for the export command.

use super::helpers::{Workspace, rating};
use super::*;
use crate::export::{ExportArgs, export_rows, run_export_with};
use kindred_core::{CATEGORY_COUNT, InterestCategory};
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
fn export_rows_are_ordered_by_user() {
    let workspace = Workspace::new();
    workspace.seed(&[
        ("carol", rating(InterestCategory::Adventure, 4)),
        ("alice", rating(InterestCategory::Gardening, 9)),
    ]);

    let rows = export_rows(&workspace.store()).expect("rows should load");

    let users: Vec<Option<&Value>> = rows.iter().map(|row| row.first()).collect();
    assert_eq!(users, vec![Some(&json!("alice")), Some(&json!("carol"))]);
    assert!(rows.iter().all(|row| row.len() == CATEGORY_COUNT + 1));
    assert_eq!(rows.first().and_then(|row| row.last()), Some(&json!(9)));
    assert_eq!(rows.last().and_then(|row| row.get(1)), Some(&json!(4)));
}

#[rstest]
fn run_export_with_empty_database_prints_empty_list() {
    let workspace = Workspace::new();
    let args = ExportArgs {
        database: Some(workspace.database()),
    };
    let mut stdout = Vec::new();

    run_export_with(args, &mut stdout).expect("export should succeed");
    assert_eq!(stdout, b"[]\n");
}

#[rstest]
fn write_json_appends_newline() {
    let mut buffer = Vec::new();
    write_json(&mut buffer, &json!({"ok": true})).expect("write should succeed");
    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert_eq!(text, "{\n  \"ok\": true\n}\n");
}
