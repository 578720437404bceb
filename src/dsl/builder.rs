use crate::dsl::{Document, OperationRecord, ProcessHeader, StepRecord, TestRecord};

/// Assembles a [`Document`] in code, mirroring what a YAML file would declare.
pub struct DocumentBuilder {
    process_id: String,
    name: String,
    pub steps: Vec<StepRecord>,
}

impl DocumentBuilder {
    pub fn new(process_id: &str) -> Self {
        Self {
            process_id: process_id.to_string(),
            name: process_id.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn start(mut self, id: &str, name: &str) -> Self {
        self.steps.push(StepRecord::new(id, "Start", name));
        self
    }

    pub fn end(mut self, id: &str, name: &str) -> Self {
        self.steps.push(StepRecord::new(id, "End", name));
        self
    }

    pub fn database(mut self, id: &str, name: &str) -> Self {
        self.steps.push(StepRecord::new(id, "Database", name));
        self
    }

    pub fn document(mut self, id: &str, name: &str) -> Self {
        self.steps.push(StepRecord::new(id, "Document", name));
        self
    }

    pub fn task(self, id: &str, name: &str) -> TaskBuilder {
        TaskBuilder {
            document_builder: self,
            record: StepRecord::new(id, "Task", name),
            operations: Vec::new(),
        }
    }

    /// Adds a Decision whose test is a literal expression.
    pub fn decision(mut self, id: &str, name: &str, test: &str) -> Self {
        let mut record = StepRecord::new(id, "Decision", name);
        record.test = Some(TestRecord::Expression(test.to_string()));
        self.steps.push(record);
        self
    }

    /// Adds a Decision whose test queries a resource.
    pub fn decision_query(mut self, id: &str, name: &str, target: &str, description: &str) -> Self {
        let mut record = StepRecord::new(id, "Decision", name);
        record.test = Some(TestRecord::Operation(OperationRecord::new(
            "Query",
            target,
            description,
        )));
        self.steps.push(record);
        self
    }

    /// Adds a step with an arbitrary `type` tag.
    pub fn raw(mut self, id: &str, step_type: &str, name: &str) -> Self {
        self.steps.push(StepRecord::new(id, step_type, name));
        self
    }

    /// Sets `successor` on the most recently declared step with id `source`.
    pub fn connect(mut self, source: &str, target: &str) -> Self {
        if let Some(record) = self.record_mut(source) {
            record.successor = Some(target.to_string());
        }
        self
    }

    pub fn branch(mut self, decision: &str, yes: &str, no: &str) -> Self {
        if let Some(record) = self.record_mut(decision) {
            record.yes = Some(yes.to_string());
            record.no = Some(no.to_string());
        }
        self
    }

    pub fn build(self) -> Document {
        Document {
            process: ProcessHeader {
                process_id: self.process_id,
                name: self.name,
            },
            steps: self.steps,
        }
    }

    fn record_mut(&mut self, id: &str) -> Option<&mut StepRecord> {
        self.steps.iter_mut().rev().find(|r| r.step_id == id)
    }
}

pub struct TaskBuilder {
    document_builder: DocumentBuilder,
    record: StepRecord,
    operations: Vec<OperationRecord>,
}

impl TaskBuilder {
    pub fn query(mut self, target: &str, description: &str) -> Self {
        self.operations.push(OperationRecord::new("Query", target, description));
        self
    }

    pub fn update(mut self, target: &str, description: &str) -> Self {
        self.operations.push(OperationRecord::new("Update", target, description));
        self
    }

    pub fn successor(mut self, target: &str) -> Self {
        self.record.successor = Some(target.to_string());
        self
    }

    pub fn build(mut self) -> DocumentBuilder {
        if !self.operations.is_empty() {
            self.record.operations = Some(self.operations);
        }
        self.document_builder.steps.push(self.record);
        self.document_builder
    }
}
