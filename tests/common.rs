//! Shared process documents for the integration tests.
use mermaid_mint::dsl::Document;
use mermaid_mint::dsl::builder::DocumentBuilder;

/// Start -> Task, nothing else.
#[allow(dead_code)]
pub fn linear_document() -> Document {
    DocumentBuilder::new("p1")
        .name("Linear")
        .start("s1", "Begin")
        .task("t1", "Do Work")
            .build()
        .connect("s1", "t1")
        .build()
}

/// Start -> Decision with a literal test, branching to two tasks that both end.
#[allow(dead_code)]
pub fn decision_document() -> Document {
    DocumentBuilder::new("p2")
        .start("s1", "Begin")
        .decision("d1", "Is One?", "x==1")
        .task("t1", "Handle One")
            .successor("e1")
            .build()
        .task("t2", "Handle Other")
            .successor("e1")
            .build()
        .end("e1", "Done")
        .connect("s1", "d1")
        .branch("d1", "t1", "t2")
        .build()
}

/// A task writing to a database and a document.
#[allow(dead_code)]
pub fn resource_document() -> Document {
    DocumentBuilder::new("p3")
        .start("s1", "Begin")
        .task("task", "Save")
            .update("db1", "insert row")
            .update("doc1", "append entry")
            .build()
        .database("db1", "Orders")
        .document("doc1", "Audit Log")
        .connect("s1", "task")
        .build()
}

/// Two tasks whose successors point at each other.
#[allow(dead_code)]
pub fn cyclic_document() -> Document {
    DocumentBuilder::new("cycle")
        .start("s1", "Begin")
        .task("a", "Step A")
            .successor("b")
            .build()
        .task("b", "Step B")
            .successor("a")
            .build()
        .connect("s1", "a")
        .build()
}

#[allow(dead_code)]
pub fn examples_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("dsl_examples")
}
