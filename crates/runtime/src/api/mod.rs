//! Public surface for presentation layers.
//!
//! Every store command answers with a [`CommandOutcome`]: whether it applied
//! and the snapshot to render next. An ignored command carries the reason, so
//! callers and tests can tell a rejected command from one that changed
//! nothing observable.
mod errors;

pub use errors::{CommandRejection, Currency, RepositoryError, Result, RuntimeError};

use crate::snapshot::GameSnapshot;

#[derive(Clone, Debug, PartialEq)]
pub enum CommandStatus {
    Applied,
    Ignored(CommandRejection),
}

/// Result of a store command.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandOutcome {
    pub status: CommandStatus,
    pub snapshot: GameSnapshot,
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, CommandStatus::Applied)
    }

    pub fn rejection(&self) -> Option<&CommandRejection> {
        match &self.status {
            CommandStatus::Applied => None,
            CommandStatus::Ignored(reason) => Some(reason),
        }
    }
}
