pub mod config;
pub mod error;
pub mod external;
pub mod filter;
pub mod model;
pub mod orchestrator;
pub mod output;
pub mod parse;
pub mod phases;
pub mod store;
pub mod target;

// re-export the types callers and tests reach for
pub use crate::config::{Config, Overrides};
pub use crate::error::ScanError;
pub use crate::model::{Finding, ScanType};
pub use crate::orchestrator::{Orchestrator, RunSummary};
pub use crate::store::ResultStore;
