//! Append-only registry of operation names shared between processes.
//!
//! One name per line, first-seen order, guarded by advisory `flock` locks.

mod error;
mod lock;
mod paths;
mod store;

pub use error::OperationStoreError;
pub use lock::LockMode;
pub use paths::{registry_path, REGISTRY_FILE_NAME};
pub use store::{AppendOutcome, OperationStore};
