use crate::model::StepType;
use thiserror::Error;

/// Errors raised by direct manipulation of a [`crate::model::Process`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Step '{0}' not found in process")]
    NotFound(String),

    #[error("Step '{0}' is already registered in process")]
    DuplicateStepId(String),

    #[error("{step_type} step '{step_id}' has no '{field}' field")]
    EdgeNotSupported {
        step_id: String,
        step_type: StepType,
        field: &'static str,
    },

    #[error("Step '{step_id}' is a {found} step and cannot be the process start")]
    NotAStart { step_id: String, found: StepType },
}

/// Errors raised while linking a document into a process graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Malformed process document: {0}")]
    MalformedDocument(String),

    #[error("Step '{step_id}' has an unknown type: '{type_name}'")]
    UnknownStepType { step_id: String, type_name: String },

    #[error("Step '{step_id}' has an operation with an unknown type: '{type_name}'")]
    UnknownOperationType { step_id: String, type_name: String },

    #[error("Step '{missing_id}' not found, which is referenced by '{field}' of step '{source_id}'")]
    DanglingReference {
        source_id: String,
        field: String,
        missing_id: String,
    },

    #[error(
        "'{field}' of step '{source_id}' must target a Database or Document, but '{target_id}' is a {found}"
    )]
    ReferenceKindMismatch {
        source_id: String,
        field: String,
        target_id: String,
        found: StepType,
    },

    #[error("Decision '{step_id}' has a test of type '{type_name}'; only Query operations may be tests")]
    InvalidTest { step_id: String, type_name: String },

    #[error("Duplicate step ID: {0}")]
    DuplicateStepId(String),

    #[error("Process has no Start step")]
    MissingStart,

    #[error("Process has more than one Start step: {}", ids.join(", "))]
    MultipleStarts { ids: Vec<String> },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors raised while rendering a process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Process '{0}' has no start step to traverse from")]
    MissingStart(String),
}
