use crate::error::ModelError;
use crate::model::step::{Step, StepId, StepType};
use indexmap::IndexMap;
use serde::Serialize;

/// Owns every step of one workflow. Edges between steps are ids into this store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Process {
    pub process_id: String,
    pub name: String,
    start: Option<StepId>,
    steps: IndexMap<StepId, Step>,
}

impl Process {
    pub fn new(process_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            process_id: process_id.into(),
            name: name.into(),
            start: None,
            steps: IndexMap::new(),
        }
    }

    /// Registers a step under its id, replacing any step already registered
    /// under that id. A replaced id keeps its original position.
    pub fn set(&mut self, step: Step) -> Option<Step> {
        self.steps.insert(step.step_id.clone(), step)
    }

    /// Like [`Process::set`], but refuses to replace an existing step.
    pub fn insert(&mut self, step: Step) -> Result<(), ModelError> {
        if self.steps.contains_key(&step.step_id) {
            return Err(ModelError::DuplicateStepId(step.step_id));
        }
        self.steps.insert(step.step_id.clone(), step);
        Ok(())
    }

    pub fn get(&self, step_id: &str) -> Result<&Step, ModelError> {
        self.steps
            .get(step_id)
            .ok_or_else(|| ModelError::NotFound(step_id.to_string()))
    }

    pub fn lookup(&self, step_id: &str) -> Option<&Step> {
        self.steps.get(step_id)
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.steps.contains_key(step_id)
    }

    /// Step ids in registration order.
    pub fn step_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn start(&self) -> Option<&Step> {
        self.start.as_deref().and_then(|id| self.steps.get(id))
    }

    pub fn start_id(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn set_start(&mut self, step_id: &str) -> Result<(), ModelError> {
        let step = self.get(step_id)?;
        if step.step_type() != StepType::Start {
            return Err(ModelError::NotAStart {
                step_id: step_id.to_string(),
                found: step.step_type(),
            });
        }
        self.start = Some(step_id.to_string());
        Ok(())
    }
}
