pub mod args;
pub mod runner;

pub use args::{base_args, ScanInvocation, ScanMode};
pub use runner::{run_invocation, GobusterExecutor, InvocationOutcome, ToolExecutor};
