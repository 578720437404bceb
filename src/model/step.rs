use crate::error::ModelError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub type StepId = String;

/// Tag for the six step variants, as spelled in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepType {
    Start,
    Task,
    Decision,
    End,
    Database,
    Document,
}

impl StepType {
    /// Database and Document steps are resources: operation targets with no outgoing edges.
    pub fn is_resource(&self) -> bool {
        matches!(self, StepType::Database | StepType::Document)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Start => "Start",
            StepType::Task => "Task",
            StepType::Decision => "Decision",
            StepType::End => "End",
            StepType::Database => "Database",
            StepType::Document => "Document",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Start" => Ok(StepType::Start),
            "Task" => Ok(StepType::Task),
            "Decision" => Ok(StepType::Decision),
            "End" => Ok(StepType::End),
            "Database" => Ok(StepType::Database),
            "Document" => Ok(StepType::Document),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    Query,
    Update,
}

impl OperationKind {
    pub fn is_mutating(&self) -> bool {
        matches!(self, OperationKind::Update)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => f.write_str("Query"),
            OperationKind::Update => f.write_str("Update"),
        }
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Query" => Ok(OperationKind::Query),
            "Update" => Ok(OperationKind::Update),
            other => Err(other.to_string()),
        }
    }
}

/// A read or write against a resource step. Not a step itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub kind: OperationKind,
    /// Id of a Database or Document step.
    pub target: StepId,
    pub description: String,
}

impl Operation {
    pub fn new(kind: OperationKind, target: impl Into<StepId>, description: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            description: description.into(),
        }
    }

    pub fn query(target: impl Into<StepId>, description: impl Into<String>) -> Self {
        Self::new(OperationKind::Query, target, description)
    }

    pub fn update(target: impl Into<StepId>, description: impl Into<String>) -> Self {
        Self::new(OperationKind::Update, target, description)
    }
}

/// The condition of a Decision. Only its text is ever rendered; it is never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Test {
    Expression(String),
    Query(Operation),
}

impl Test {
    pub fn operation(&self) -> Option<&Operation> {
        match self {
            Test::Query(op) => Some(op),
            Test::Expression(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum StepKind {
    Start {
        successor: Option<StepId>,
    },
    Task {
        successor: Option<StepId>,
        operations: Vec<Operation>,
    },
    Decision {
        test: Option<Test>,
        yes: Option<StepId>,
        no: Option<StepId>,
    },
    End,
    Database,
    Document,
}

impl StepKind {
    /// An unlinked instance of the given variant.
    pub fn empty(step_type: StepType) -> Self {
        match step_type {
            StepType::Start => StepKind::Start { successor: None },
            StepType::Task => StepKind::Task {
                successor: None,
                operations: Vec::new(),
            },
            StepType::Decision => StepKind::Decision {
                test: None,
                yes: None,
                no: None,
            },
            StepType::End => StepKind::End,
            StepType::Database => StepKind::Database,
            StepType::Document => StepKind::Document,
        }
    }

    pub fn step_type(&self) -> StepType {
        match self {
            StepKind::Start { .. } => StepType::Start,
            StepKind::Task { .. } => StepType::Task,
            StepKind::Decision { .. } => StepType::Decision,
            StepKind::End => StepType::End,
            StepKind::Database => StepType::Database,
            StepKind::Document => StepType::Document,
        }
    }
}

/// Label of an outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Successor,
    Yes,
    No,
    Operation(OperationKind),
}

impl EdgeKind {
    /// Successor and branch edges are followed by reachability traversal; operation edges are not.
    pub fn is_control_flow(&self) -> bool {
        !matches!(self, EdgeKind::Operation(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub step_id: StepId,
    pub name: String,
    #[serde(flatten)]
    pub kind: StepKind,
}

impl Step {
    pub fn new(step_id: impl Into<StepId>, name: impl Into<String>, kind: StepKind) -> Self {
        Self {
            step_id: step_id.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn start(step_id: impl Into<StepId>, name: impl Into<String>) -> Self {
        Self::new(step_id, name, StepKind::empty(StepType::Start))
    }

    pub fn task(step_id: impl Into<StepId>, name: impl Into<String>) -> Self {
        Self::new(step_id, name, StepKind::empty(StepType::Task))
    }

    pub fn decision(step_id: impl Into<StepId>, name: impl Into<String>, test: Test) -> Self {
        Self::new(
            step_id,
            name,
            StepKind::Decision {
                test: Some(test),
                yes: None,
                no: None,
            },
        )
    }

    pub fn end(step_id: impl Into<StepId>, name: impl Into<String>) -> Self {
        Self::new(step_id, name, StepKind::End)
    }

    pub fn database(step_id: impl Into<StepId>, name: impl Into<String>) -> Self {
        Self::new(step_id, name, StepKind::Database)
    }

    pub fn document(step_id: impl Into<StepId>, name: impl Into<String>) -> Self {
        Self::new(step_id, name, StepKind::Document)
    }

    pub fn step_type(&self) -> StepType {
        self.kind.step_type()
    }

    pub fn successor(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Start { successor } | StepKind::Task { successor, .. } => successor.as_deref(),
            _ => None,
        }
    }

    pub fn operations(&self) -> &[Operation] {
        match &self.kind {
            StepKind::Task { operations, .. } => operations,
            _ => &[],
        }
    }

    pub fn set_successor(&mut self, target: impl Into<StepId>) -> Result<(), ModelError> {
        match &mut self.kind {
            StepKind::Start { successor } | StepKind::Task { successor, .. } => {
                *successor = Some(target.into());
                Ok(())
            }
            _ => Err(self.unsupported("successor")),
        }
    }

    pub fn set_yes(&mut self, target: impl Into<StepId>) -> Result<(), ModelError> {
        match &mut self.kind {
            StepKind::Decision { yes, .. } => {
                *yes = Some(target.into());
                Ok(())
            }
            _ => Err(self.unsupported("yes")),
        }
    }

    pub fn set_no(&mut self, target: impl Into<StepId>) -> Result<(), ModelError> {
        match &mut self.kind {
            StepKind::Decision { no, .. } => {
                *no = Some(target.into());
                Ok(())
            }
            _ => Err(self.unsupported("no")),
        }
    }

    pub fn set_test(&mut self, new_test: Test) -> Result<(), ModelError> {
        match &mut self.kind {
            StepKind::Decision { test, .. } => {
                *test = Some(new_test);
                Ok(())
            }
            _ => Err(self.unsupported("test")),
        }
    }

    pub fn push_operation(&mut self, operation: Operation) -> Result<(), ModelError> {
        match &mut self.kind {
            StepKind::Task { operations, .. } => {
                operations.push(operation);
                Ok(())
            }
            _ => Err(self.unsupported("operations")),
        }
    }

    /// Outgoing edges in rendering order: successor, yes, no, then operation targets.
    pub fn edges(&self) -> Vec<(EdgeKind, &str)> {
        let mut edges = Vec::new();
        match &self.kind {
            StepKind::Start { successor } => {
                if let Some(next) = successor {
                    edges.push((EdgeKind::Successor, next.as_str()));
                }
            }
            StepKind::Task {
                successor,
                operations,
            } => {
                if let Some(next) = successor {
                    edges.push((EdgeKind::Successor, next.as_str()));
                }
                for op in operations {
                    edges.push((EdgeKind::Operation(op.kind), op.target.as_str()));
                }
            }
            StepKind::Decision { test, yes, no } => {
                if let Some(target) = yes {
                    edges.push((EdgeKind::Yes, target.as_str()));
                }
                if let Some(target) = no {
                    edges.push((EdgeKind::No, target.as_str()));
                }
                if let Some(op) = test.as_ref().and_then(Test::operation) {
                    edges.push((EdgeKind::Operation(op.kind), op.target.as_str()));
                }
            }
            StepKind::End | StepKind::Database | StepKind::Document => {}
        }
        edges
    }

    fn unsupported(&self, field: &'static str) -> ModelError {
        ModelError::EdgeNotSupported {
            step_id: self.step_id.clone(),
            step_type: self.step_type(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_steps_reject_edges() {
        let mut end = Step::end("e1", "Done");
        let err = end.set_successor("t1").unwrap_err();
        assert_eq!(
            err,
            ModelError::EdgeNotSupported {
                step_id: "e1".to_string(),
                step_type: StepType::End,
                field: "successor",
            }
        );

        let mut db = Step::database("db", "Orders");
        assert!(db.set_yes("t1").is_err());
        assert!(db.push_operation(Operation::update("db", "loop")).is_err());

        let mut doc = Step::document("doc", "Audit");
        assert!(doc.set_no("t1").is_err());
        assert!(doc.edges().is_empty());

        let err = end.set_test(Test::Expression("ready".into())).unwrap_err();
        assert_eq!(
            err,
            ModelError::EdgeNotSupported {
                step_id: "e1".to_string(),
                step_type: StepType::End,
                field: "test",
            }
        );
        assert!(db.set_test(Test::Query(Operation::query("db", "self"))).is_err());
        assert!(doc.set_test(Test::Expression("x".into())).is_err());
        assert!(Step::task("t1", "Work").set_test(Test::Expression("x".into())).is_err());
    }

    #[test]
    fn test_set_test_replaces_decision_test() {
        let mut decision = Step::decision("d1", "Check", Test::Expression("a > 1".into()));
        decision
            .set_test(Test::Query(Operation::query("db", "lookup")))
            .unwrap();
        assert_eq!(decision.edges(), vec![(EdgeKind::Operation(OperationKind::Query), "db")]);
    }

    #[test]
    fn test_decision_edge_order() {
        let mut decision = Step::decision("d1", "Check", Test::Query(Operation::query("db", "lookup")));
        decision.set_no("t2").unwrap();
        decision.set_yes("t1").unwrap();

        let edges = decision.edges();
        assert_eq!(
            edges,
            vec![
                (EdgeKind::Yes, "t1"),
                (EdgeKind::No, "t2"),
                (EdgeKind::Operation(OperationKind::Query), "db"),
            ]
        );
        assert!(decision.set_successor("t3").is_err());
    }

    #[test]
    fn test_step_type_tags() {
        assert_eq!("Decision".parse::<StepType>(), Ok(StepType::Decision));
        assert_eq!("decision".parse::<StepType>(), Err("decision".to_string()));
        assert!(StepType::Document.is_resource());
        assert!(!StepType::End.is_resource());
        assert!(OperationKind::Update.is_mutating());
    }
}
