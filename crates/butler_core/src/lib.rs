//! Core domain logic for Butler, a personal task tracker.
//! This crate is the single source of truth for task invariants, the
//! on-disk line format and command validation. Shells only feed it input
//! lines and render the returned text.

pub mod codec;
pub mod config;
pub mod datetime;
pub mod dispatcher;
pub mod logging;
pub mod model;
pub mod parser;
pub mod storage;
pub mod task_list;

pub use codec::{decode, encode, DecodeError};
pub use config::{ButlerConfig, ConfigError};
pub use dispatcher::{Butler, Response};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Schedule, Task, TaskKind, TaskTag, TaskValidationError};
pub use parser::{parse, Command, CommandError};
pub use storage::{FileStorage, StorageError, StorageResult, TaskStore};
pub use task_list::TaskList;

/// Greeting shown by shells when a session starts.
pub const WELCOME_MESSAGE: &str = "Hello! I'm Butler\nWhat can I do for you?";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
