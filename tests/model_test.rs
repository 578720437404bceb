use mermaid_mint::error::ModelError;
use mermaid_mint::model::{Operation, Process, Step, StepKind, StepType, Test};

#[test]
fn test_process_creation() {
    let process = Process::new("p1", "User Registration");

    assert_eq!(process.process_id, "p1");
    assert_eq!(process.name, "User Registration");
    assert!(process.start().is_none());
    assert!(process.is_empty());
}

#[test]
fn test_process_with_start() {
    let mut process = Process::new("p1", "User Registration");
    process.set(Step::start("s1", "Begin"));

    process.set_start("s1").unwrap();

    assert_eq!(process.start_id(), Some("s1"));
    assert_eq!(process.start().map(|s| s.name.as_str()), Some("Begin"));
}

#[test]
fn test_get_and_lookup() {
    let mut process = Process::new("p1", "Lookup");
    process.set(Step::task("t1", "Process Data"));

    assert_eq!(process.get("t1").unwrap().name, "Process Data");
    assert_eq!(process.get("t9"), Err(ModelError::NotFound("t9".to_string())));
    assert!(process.lookup("t9").is_none());
    assert!(process.contains("t1"));
}

#[test]
fn test_strict_insert_rejects_duplicates() {
    let mut process = Process::new("p1", "Strict");
    process.insert(Step::task("t1", "First")).unwrap();

    let err = process.insert(Step::task("t1", "Second")).unwrap_err();
    assert_eq!(err, ModelError::DuplicateStepId("t1".to_string()));
    assert_eq!(process.get("t1").unwrap().name, "First");
}

#[test]
fn test_step_ids_keep_insertion_order() {
    let mut process = Process::new("p1", "Order");
    for id in ["z", "a", "m"] {
        process.set(Step::end(id, id));
    }
    assert_eq!(process.step_ids().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    assert_eq!(process.len(), 3);
}

#[test]
fn test_task_creation() {
    let task = Step::task("t1", "Process Data");

    assert_eq!(task.step_id, "t1");
    assert_eq!(task.name, "Process Data");
    assert_eq!(task.step_type(), StepType::Task);
    assert_eq!(task.successor(), None);
    assert!(task.operations().is_empty());
}

#[test]
fn test_start_set_successor() {
    let mut start = Step::start("s1", "Begin Process");
    start.set_successor("t1").unwrap();
    assert_eq!(start.successor(), Some("t1"));
}

#[test]
fn test_decision_with_successors() {
    let mut decision = Step::decision(
        "d1",
        "Check Status",
        Test::Expression("status == 'ready'".to_string()),
    );
    decision.set_yes("t1").unwrap();
    decision.set_no("e1").unwrap();

    match &decision.kind {
        StepKind::Decision { test, yes, no } => {
            assert_eq!(test, &Some(Test::Expression("status == 'ready'".to_string())));
            assert_eq!(yes.as_deref(), Some("t1"));
            assert_eq!(no.as_deref(), Some("e1"));
        }
        other => panic!("Expected Decision, got {:?}", other),
    }
}

#[test]
fn test_resources_reject_outgoing_edges() {
    let mut db = Step::database("db", "Orders");
    let err = db.set_successor("t1").unwrap_err();
    assert!(err.to_string().contains("Database step 'db' has no 'successor' field"));

    let mut task = Step::task("t1", "Work");
    assert!(task.set_test(Test::Expression("x".to_string())).is_err());
    task.push_operation(Operation::query("db", "read")).unwrap();
    assert_eq!(task.operations().len(), 1);
}
