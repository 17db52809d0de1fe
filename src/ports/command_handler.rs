use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::zodiac::Subject;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
    #[error("Command execution failed: {details}")]
    ExecutionFailed { details: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate tomorrow's fortunes and publish them.
    RunOnce,
    /// Print the fortunes stored for a day, today when no date is given.
    /// With a subject only that subject's fortunes are printed.
    Show {
        date: Option<NaiveDate>,
        subject: Option<Subject>,
    },
}

#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError>;
}
