mod common;
use common::*;
use mermaid_mint::compiler::loader::{load_document_from_file, load_document_from_str};
use mermaid_mint::dsl::builder::DocumentBuilder;
use std::fs;

#[test]
fn test_load_simple_yaml_document() {
    let yaml_content = r#"
process:
  process_id: "p3"
  name: "p3"
steps:
  - step_id: "s1"
    type: "Start"
    name: "Begin"
    successor: "task"
  - step_id: "task"
    type: "Task"
    name: "Save"
    operations:
      - type: "Update"
        target: "db1"
        description: "insert row"
      - type: "Update"
        target: "doc1"
        description: "append entry"
  - step_id: "db1"
    type: "Database"
    name: "Orders"
  - step_id: "doc1"
    type: "Document"
    name: "Audit Log"
"#;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("process.yaml");
    fs::write(&file_path, yaml_content).expect("Failed to write temp file");

    let loaded = load_document_from_file(&file_path).expect("Failed to load document from YAML");
    assert_eq!(loaded, resource_document());

    temp_dir.close().expect("Failed to close temp dir");
}

#[test]
fn test_load_unquoted_branch_keys() {
    let loaded = load_document_from_str(
        r#"
process: { process_id: "p2", name: "p2" }
steps:
  - { step_id: "d1", type: "Decision", name: "Is One?", test: "x==1", yes: "t1", no: "t2" }
"#,
    )
    .expect("Failed to load document");

    let expected = DocumentBuilder::new("p2")
        .decision("d1", "Is One?", "x==1")
        .branch("d1", "t1", "t2")
        .build();
    assert_eq!(loaded, expected);
}

#[test]
fn test_load_json_document() {
    let loaded = load_document_from_str(
        r#"{"process": {"process_id": "p1", "name": "Linear"},
            "steps": [
              {"step_id": "s1", "type": "Start", "name": "Begin", "successor": "t1"},
              {"step_id": "t1", "type": "Task", "name": "Do Work"}
            ]}"#,
    )
    .expect("Failed to load JSON document");

    assert_eq!(loaded, linear_document());
}

#[test]
fn test_load_missing_file_names_path() {
    let err = load_document_from_file("does/not/exist.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("does/not/exist.yaml"));
}

#[test]
fn test_load_rejects_invalid_yaml() {
    assert!(load_document_from_str("process: [unclosed").is_err());
    assert!(load_document_from_str("- just\n- a\n- list").is_err());
}
