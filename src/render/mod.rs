//! Mermaid flowchart rendering of a linked [`Process`].

use crate::error::RenderError;
use crate::model::{EdgeKind, Process, Step, StepKind};
use std::collections::HashSet;
use std::fmt;
use tracing::info;

const INDENT: &str = "    ";

/// Which steps are emitted, and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Every step in registration order: all node lines, then all edge lines.
    #[default]
    Registry,
    /// Depth-first from the start step along successor/yes/no edges. Each
    /// visited step's node line is followed directly by its edge lines.
    /// Steps not reachable that way are left out, including resources that
    /// only appear as operation targets.
    Reachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    TD,
    TB,
    BT,
    LR,
    RL,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::TD => "TD",
            Direction::TB => "TB",
            Direction::BT => "BT",
            Direction::LR => "LR",
            Direction::RL => "RL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub traversal: Traversal,
    pub direction: Direction,
    /// Label Decision branches `yes`/`no`. Off by default, so both branches
    /// render as plain arrows.
    pub branch_labels: bool,
    /// Under [`Traversal::Reachable`], also declare resources that are only
    /// targeted by operation edges. They are never walked from.
    pub declare_resources: bool,
}

/// Renders processes as Mermaid `flowchart` text. Rendering never mutates the process.
#[derive(Debug, Default)]
pub struct MermaidRenderer {
    options: RenderOptions,
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, process: &Process) -> Result<String, RenderError> {
        let mut lines = vec![format!("flowchart {}", self.options.direction)];

        match self.options.traversal {
            Traversal::Registry => self.render_registry(process, &mut lines),
            Traversal::Reachable => self.render_reachable(process, &mut lines)?,
        }

        info!(
            process_id = %process.process_id,
            lines = lines.len(),
            "rendered diagram"
        );
        Ok(lines.join("\n"))
    }

    fn render_registry(&self, process: &Process, lines: &mut Vec<String>) {
        for step in process.steps() {
            lines.push(format_node(step));
        }
        for step in process.steps() {
            self.push_edges(step, lines);
        }
    }

    fn render_reachable(&self, process: &Process, lines: &mut Vec<String>) -> Result<(), RenderError> {
        let start = process
            .start()
            .ok_or_else(|| RenderError::MissingStart(process.process_id.clone()))?;

        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&Step> = vec![start];

        while let Some(step) = stack.pop() {
            if !visited.insert(step.step_id.as_str()) {
                continue;
            }
            lines.push(format_node(step));
            self.push_edges(step, lines);

            let mut children = Vec::new();
            for (kind, target_id) in step.edges() {
                let Some(target) = process.lookup(target_id) else {
                    continue;
                };
                if kind.is_control_flow() {
                    children.push(target);
                } else if self.options.declare_resources
                    && visited.insert(target.step_id.as_str())
                {
                    lines.push(format_node(target));
                }
            }
            // Reversed so the first edge is explored first.
            stack.extend(children.into_iter().rev());
        }
        Ok(())
    }

    fn push_edges(&self, step: &Step, lines: &mut Vec<String>) {
        for (kind, target) in step.edges() {
            let label = match kind {
                EdgeKind::Yes if self.options.branch_labels => Some("yes"),
                EdgeKind::No if self.options.branch_labels => Some("no"),
                _ => None,
            };
            match label {
                Some(label) => lines.push(format!("{INDENT}{} -->|{}| {}", step.step_id, label, target)),
                None => lines.push(format!("{INDENT}{} --> {}", step.step_id, target)),
            }
        }
    }
}

/// The node declaration line for a step, shaped by its variant.
pub fn format_node(step: &Step) -> String {
    let id = &step.step_id;
    let name = &step.name;
    match &step.kind {
        StepKind::Start { .. } | StepKind::Task { .. } | StepKind::End => {
            format!("{INDENT}{id}[{name}]")
        }
        StepKind::Decision { .. } => format!("{INDENT}{id}{{{name}}}"),
        StepKind::Database => format!("{INDENT}{id}[({name})]"),
        StepKind::Document => format!("{INDENT}{id}[/{name}/]"),
    }
}

/// Renders with [`RenderOptions::default`].
pub fn render(process: &Process) -> Result<String, RenderError> {
    MermaidRenderer::new().render(process)
}
