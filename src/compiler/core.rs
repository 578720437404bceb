use crate::dsl::{Document, StepRecord, TestRecord};
use crate::error::BuildError;
use crate::model::{Operation, OperationKind, Process, Step, StepKind, StepType, Test};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

/// What to do when two step records share a `step_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later record replaces the earlier one.
    #[default]
    Overwrite,
    /// Fail the build with [`BuildError::DuplicateStepId`].
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub duplicate_ids: DuplicatePolicy,
}

impl BuildOptions {
    pub fn strict() -> Self {
        Self {
            duplicate_ids: DuplicatePolicy::Reject,
        }
    }
}

/// Links a [`Document`] into a [`Process`] graph.
///
/// The build runs in two passes over `steps`. The first instantiates every
/// step from its `type` tag with only its scalar fields filled in. The second
/// resolves every reference (successor, yes/no branches, operation targets,
/// query tests) against the complete set of steps from the first pass. A
/// failed build never yields a partially linked process.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    options: BuildOptions,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Builds from a generic mapping/sequence/scalar tree.
    pub fn build_value(&self, value: serde_yaml::Value) -> Result<Process, BuildError> {
        let document = Document::from_value(value)?;
        self.build(&document)
    }

    pub fn build(&self, document: &Document) -> Result<Process, BuildError> {
        // 1. Pass 1: Instantiation
        let (draft, records) = self.instantiate(document)?;

        // 2. Pass 2: Linking
        let mut process = Process::new(
            document.process.process_id.clone(),
            document.process.name.clone(),
        );
        for record in records.values() {
            let step = self.link(&draft, record)?;
            debug!(step_id = %step.step_id, edges = step.edges().len(), "linked step");
            process.set(step);
        }

        // 3. Start Node
        let start_ids: Vec<String> = process
            .steps()
            .filter(|s| s.step_type() == StepType::Start)
            .map(|s| s.step_id.clone())
            .collect();
        match start_ids.as_slice() {
            [] => return Err(BuildError::MissingStart),
            [start] => process.set_start(start)?,
            _ => {
                return Err(BuildError::MultipleStarts {
                    ids: start_ids.clone(),
                });
            }
        }

        info!(
            process_id = %process.process_id,
            steps = process.len(),
            "built process"
        );
        Ok(process)
    }

    /// Creates an unlinked step per record. Returns the draft store together
    /// with the record that won each id, in registration order.
    fn instantiate<'d>(
        &self,
        document: &'d Document,
    ) -> Result<(Process, IndexMap<&'d str, &'d StepRecord>), BuildError> {
        let mut draft = Process::new(
            document.process.process_id.clone(),
            document.process.name.clone(),
        );
        let mut records: IndexMap<&str, &StepRecord> = IndexMap::new();

        for record in &document.steps {
            let step_type = record
                .step_type
                .parse::<StepType>()
                .map_err(|type_name| BuildError::UnknownStepType {
                    step_id: record.step_id.clone(),
                    type_name,
                })?;

            let mut kind = StepKind::empty(step_type);
            if let StepKind::Decision { test, .. } = &mut kind {
                *test = record
                    .test
                    .as_ref()
                    .map(|t| Self::instantiate_test(&record.step_id, t))
                    .transpose()?;
            }

            let step = Step::new(record.step_id.clone(), record.name.clone(), kind);
            debug!(step_id = %record.step_id, %step_type, "instantiated step");

            match self.options.duplicate_ids {
                DuplicatePolicy::Reject => {
                    if draft.contains(&record.step_id) {
                        return Err(BuildError::DuplicateStepId(record.step_id.clone()));
                    }
                    draft.set(step);
                }
                DuplicatePolicy::Overwrite => {
                    if draft.set(step).is_some() {
                        warn!(step_id = %record.step_id, "duplicate step id, later definition wins");
                    }
                }
            }
            records.insert(record.step_id.as_str(), record);
        }

        Ok((draft, records))
    }

    fn instantiate_test(step_id: &str, test: &TestRecord) -> Result<Test, BuildError> {
        match test {
            TestRecord::Expression(text) => Ok(Test::Expression(text.clone())),
            TestRecord::Operation(op) => {
                let kind = Self::operation_kind(step_id, &op.operation_type)?;
                if kind != OperationKind::Query {
                    return Err(BuildError::InvalidTest {
                        step_id: step_id.to_string(),
                        type_name: op.operation_type.clone(),
                    });
                }
                Ok(Test::Query(Operation::new(
                    kind,
                    op.target.clone(),
                    op.description.clone(),
                )))
            }
        }
    }

    fn link(&self, draft: &Process, record: &StepRecord) -> Result<Step, BuildError> {
        let mut step = draft.get(&record.step_id)?.clone();
        let step_type = step.step_type();

        if let Some(target) = &record.successor {
            if matches!(step_type, StepType::Start | StepType::Task) {
                let target = Self::resolve(draft, &step.step_id, "successor", target)?;
                step.set_successor(target)?;
            } else {
                Self::ignored(&step, "successor");
            }
        }

        if step_type == StepType::Decision {
            if let Some(target) = &record.yes {
                let target = Self::resolve(draft, &step.step_id, "yes", target)?;
                step.set_yes(target)?;
            }
            if let Some(target) = &record.no {
                let target = Self::resolve(draft, &step.step_id, "no", target)?;
                step.set_no(target)?;
            }
            if let StepKind::Decision {
                test: Some(Test::Query(op)),
                ..
            } = &step.kind
            {
                Self::resolve_resource(draft, &step.step_id, "test.target", &op.target)?;
            }
        } else {
            if record.yes.is_some() {
                Self::ignored(&step, "yes");
            }
            if record.no.is_some() {
                Self::ignored(&step, "no");
            }
            if record.test.is_some() {
                Self::ignored(&step, "test");
            }
        }

        if let Some(operations) = &record.operations {
            if step_type == StepType::Task {
                for (i, op) in operations.iter().enumerate() {
                    let kind = Self::operation_kind(&step.step_id, &op.operation_type)?;
                    let field = format!("operations[{}].target", i);
                    let target = Self::resolve_resource(draft, &step.step_id, &field, &op.target)?;
                    step.push_operation(Operation::new(kind, target, op.description.clone()))?;
                }
            } else {
                Self::ignored(&step, "operations");
            }
        }

        Ok(step)
    }

    fn resolve(
        draft: &Process,
        source_id: &str,
        field: &str,
        target_id: &str,
    ) -> Result<String, BuildError> {
        draft
            .lookup(target_id)
            .map(|s| s.step_id.clone())
            .ok_or_else(|| BuildError::DanglingReference {
                source_id: source_id.to_string(),
                field: field.to_string(),
                missing_id: target_id.to_string(),
            })
    }

    fn resolve_resource(
        draft: &Process,
        source_id: &str,
        field: &str,
        target_id: &str,
    ) -> Result<String, BuildError> {
        let resolved = Self::resolve(draft, source_id, field, target_id)?;
        let found = draft.get(&resolved)?.step_type();
        if !found.is_resource() {
            return Err(BuildError::ReferenceKindMismatch {
                source_id: source_id.to_string(),
                field: field.to_string(),
                target_id: resolved,
                found,
            });
        }
        Ok(resolved)
    }

    fn operation_kind(step_id: &str, type_name: &str) -> Result<OperationKind, BuildError> {
        type_name
            .parse::<OperationKind>()
            .map_err(|type_name| BuildError::UnknownOperationType {
                step_id: step_id.to_string(),
                type_name,
            })
    }

    fn ignored(step: &Step, field: &str) {
        warn!(
            step_id = %step.step_id,
            step_type = %step.step_type(),
            field,
            "field not supported by step type, ignoring"
        );
    }
}

/// Builds with [`BuildOptions::default`].
pub fn build(document: &Document) -> Result<Process, BuildError> {
    GraphBuilder::new().build(document)
}
