use std::{fmt, sync::Arc};

use error_stack::ResultExt;
use tracing::instrument;

use crate::ports::fortune_generator::FortuneGenerator;
use crate::ports::routine::{Routine, RoutineError};

use super::generate::generate_all;
use super::synchronizer::FortuneSynchronizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub generated: usize,
    pub fallbacks: usize,
    pub rows_written: usize,
}

/// Generates tomorrow's fortunes and publishes them to the fortune table.
pub struct DailyFortuneRoutine {
    generator: Arc<dyn FortuneGenerator>,
    synchronizer: FortuneSynchronizer,
    fallback_text: String,
}

impl fmt::Debug for DailyFortuneRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DailyFortuneRoutine")
            .field("fallback_text", &self.fallback_text)
            .finish()
    }
}

impl DailyFortuneRoutine {
    pub fn new(
        generator: Arc<dyn FortuneGenerator>,
        synchronizer: FortuneSynchronizer,
        fallback_text: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            synchronizer,
            fallback_text: fallback_text.into(),
        }
    }
}

#[async_trait::async_trait]
impl Routine<RunReport> for DailyFortuneRoutine {
    fn name(&self) -> &str {
        "DailyFortuneRoutine"
    }

    #[instrument(skip(self), name = "DailyFortuneRoutine::run")]
    async fn run(&self) -> error_stack::Result<RunReport, RoutineError> {
        tracing::info!("🔮 Generating fortunes");
        let generated = generate_all(self.generator.as_ref(), &self.fallback_text).await;
        tracing::info!(
            "Fortunes: {} generated, {} fallbacks",
            generated.generated,
            generated.fallbacks
        );

        tracing::info!("📊 Updating the spreadsheet");
        let rows_written = self
            .synchronizer
            .synchronize(&generated.sheet)
            .await
            .change_context(RoutineError::routine_failure(
                "Fortunes were generated but could not be saved to the spreadsheet",
            ))?;

        Ok(RunReport {
            generated: generated.generated,
            fallbacks: generated.fallbacks,
            rows_written,
        })
    }
}
