pub mod builder;

use crate::error::BuildError;
use serde::{Deserialize, Serialize};

/// A process document as written by users, before any reference is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub process: ProcessHeader,
    pub steps: Vec<StepRecord>,
}

impl Document {
    /// Reads a document out of a generic mapping/sequence/scalar tree.
    pub fn from_value(value: serde_yaml::Value) -> Result<Self, BuildError> {
        serde_yaml::from_value(value).map_err(|e| BuildError::MalformedDocument(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessHeader {
    pub process_id: String,
    pub name: String,
}

/// One entry of `steps`. The `type` tag stays a raw string until the builder dispatches on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    pub step_id: String,
    #[serde(rename = "type")]
    pub step_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<TestRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<OperationRecord>>,
}

impl StepRecord {
    pub fn new(step_id: &str, step_type: &str, name: &str) -> Self {
        Self {
            step_id: step_id.to_string(),
            step_type: step_type.to_string(),
            name: name.to_string(),
            successor: None,
            yes: None,
            no: None,
            test: None,
            operations: None,
        }
    }
}

/// A Decision test: literal expression text, or a nested query against a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TestRecord {
    Expression(String),
    Operation(OperationRecord),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationRecord {
    #[serde(rename = "type")]
    pub operation_type: String,
    pub target: String,
    #[serde(default)]
    pub description: String,
}

impl OperationRecord {
    pub fn new(operation_type: &str, target: &str, description: &str) -> Self {
        Self {
            operation_type: operation_type.to_string(),
            target: target.to_string(),
            description: description.to_string(),
        }
    }
}
