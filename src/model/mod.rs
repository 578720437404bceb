pub mod process;
pub mod step;

pub use process::Process;
pub use step::{EdgeKind, Operation, OperationKind, Step, StepId, StepKind, StepType, Test};
