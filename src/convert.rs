use crate::compiler::core::{BuildOptions, GraphBuilder};
use crate::compiler::loader::load_document_from_file;
use crate::render::{MermaidRenderer, RenderOptions};
use anyhow::{Context as AnyhowContext, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DIAGRAM_EXTENSION: &str = "mmd";

#[derive(Debug)]
pub struct ConvertOutcome {
    pub output_path: PathBuf,
    pub diagram: String,
}

/// The input path with its extension replaced by `.mmd`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(DIAGRAM_EXTENSION)
}

/// Loads, builds and renders `input`, then writes the diagram to `output`
/// (or next to the input when `output` is `None`).
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    build_options: &BuildOptions,
    render_options: &RenderOptions,
) -> Result<ConvertOutcome> {
    let document = load_document_from_file(input)?;
    debug!(steps = document.steps.len(), "loaded document");

    let process = GraphBuilder::with_options(build_options.clone())
        .build(&document)
        .with_context(|| format!("Failed to build process from {}", input.display()))?;

    let diagram = MermaidRenderer::with_options(render_options.clone())
        .render(&process)
        .with_context(|| format!("Failed to render process '{}'", process.process_id))?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    fs::write(&output_path, &diagram)
        .with_context(|| format!("Failed to write diagram to {}", output_path.display()))?;

    Ok(ConvertOutcome {
        output_path,
        diagram,
    })
}
