//! Turns declarative process descriptions into Mermaid flowcharts.
//!
//! A document (YAML or JSON) is read into [`dsl::Document`], linked into a
//! [`model::Process`] graph by [`compiler::core::GraphBuilder`], and rendered
//! by [`render::MermaidRenderer`].

pub mod compiler;
pub mod convert;
pub mod dsl;
pub mod error;
pub mod model;
pub mod render;

pub use compiler::core::{BuildOptions, DuplicatePolicy, GraphBuilder};
pub use error::{BuildError, ModelError, RenderError};
pub use model::{Process, Step, StepKind, StepType};
pub use render::{Direction, MermaidRenderer, RenderOptions, Traversal};
