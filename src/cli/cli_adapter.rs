use std::str::FromStr;

use chrono::{Local, NaiveDate};
use tracing::{error, info, instrument};

use crate::application::fortune::viewer::render_sheet;
use crate::domain::sheets::table::{format_date, DATE_FORMAT};
use crate::domain::zodiac::Subject;
use crate::ports::command_handler::{Command, CommandError, CommandHandler};

use super::routine_factory::FortuneServices;

const USAGE: &str = "Usage: [run | show [YYYY-MM-DD] [SUBJECT]]";

fn invalid(details: String) -> CommandError {
    CommandError::InvalidCommand {
        details: format!("{}. {}", details, USAGE),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|err| invalid(format!("Invalid date '{}': {}", raw, err)))
}

fn parse_subject(raw: &str) -> Result<Subject, CommandError> {
    Subject::from_str(raw).map_err(|_| invalid(format!("Unknown subject '{}'", raw)))
}

impl Command {
    /// Parses `argv`, program name included.
    pub fn parse(args: &[String]) -> Result<Command, CommandError> {
        match args.get(1).map(|s| s.as_str()) {
            None | Some("run") => Ok(Command::RunOnce),
            Some("show") => {
                let (date, subject) = match args.get(2..).unwrap_or_default() {
                    [] => (None, None),
                    [only] => match NaiveDate::parse_from_str(only, DATE_FORMAT) {
                        Ok(date) => (Some(date), None),
                        Err(_) => {
                            let subject = Subject::from_str(only).map_err(|_| {
                                invalid(format!("Expected a date or a subject, got '{}'", only))
                            })?;
                            (None, Some(subject))
                        }
                    },
                    [date, subject] => (Some(parse_date(date)?), Some(parse_subject(subject)?)),
                    _ => return Err(invalid("Too many arguments for show".to_string())),
                };
                Ok(Command::Show { date, subject })
            }
            Some(other) => Err(invalid(format!("Unknown command '{}'", other))),
        }
    }
}

pub struct CliAdapter {
    services: FortuneServices,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("routine", &self.services.routine.name())
            .finish()
    }
}

impl CliAdapter {
    pub fn new(services: FortuneServices) -> Self {
        Self { services }
    }

    /// Runs the command named by `args`. Failures are logged, never returned.
    #[instrument(skip(self))]
    pub async fn run(&self, args: Vec<String>) {
        let command = match Command::parse(&args) {
            Ok(command) => command,
            Err(err) => {
                error!("{}", err);
                return;
            }
        };

        match self.handle(command).await {
            Ok(result) => info!("{}", result),
            Err(report) => error!("Command failed: {:?}", report),
        }
    }
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        match command {
            Command::RunOnce => {
                let routine = &self.services.routine;
                let report = routine.run().await.map_err(|e| CommandError::ExecutionFailed {
                    details: format!("❌ {}: {:?}", routine.name(), e),
                })?;

                Ok(format!(
                    "✅ {}: {} fortunes generated, {} fallbacks, {} rows written",
                    routine.name(),
                    report.generated,
                    report.fallbacks,
                    report.rows_written
                ))
            }
            Command::Show { date, subject } => {
                let date = date.unwrap_or_else(|| Local::now().date_naive());
                let sheet = self.services.viewer.fetch(date).await.map_err(|e| {
                    CommandError::ExecutionFailed {
                        details: format!("Failed to read fortunes for {}: {:?}", format_date(date), e),
                    }
                })?;

                Ok(render_sheet(&sheet, date, subject))
            }
        }
    }
}
