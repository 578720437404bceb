use crate::dsl::Document;
use anyhow::{Context as AnyhowContext, Result};
use std::fs;
use std::path::Path;

/// Parses YAML (or JSON) text into a [`Document`].
pub fn load_document_from_str(content: &str) -> Result<Document> {
    let tree: serde_yaml::Value =
        serde_yaml::from_str(content).context("Failed to parse process document")?;
    let document = Document::from_value(tree)?;
    Ok(document)
}

pub fn load_document_from_file(file_path: impl AsRef<Path>) -> Result<Document> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read process file from {}", file_path.display()))?;

    load_document_from_str(&content)
        .with_context(|| format!("Failed to load process document from {}", file_path.display()))
}
