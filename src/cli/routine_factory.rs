use std::sync::Arc;

use crate::adapters::{
    anthropic::fortune_generator::AnthropicFortuneGenerator, config::app_config::AppConfig,
    sheets::sheets_fortune_table::SheetsFortuneTable,
};
use crate::application::fortune::{
    daily_fortune_routine::{DailyFortuneRoutine, RunReport},
    prompt::PromptTemplate,
    synchronizer::FortuneSynchronizer,
    viewer::FortuneViewer,
};
use crate::ports::{
    fortune_generator::{FortuneGenerator, GenerationError},
    fortune_table::FortuneTable,
    routine::Routine,
};

/// Everything the CLI commands run against.
pub struct FortuneServices {
    pub routine: Arc<dyn Routine<RunReport>>,
    pub viewer: FortuneViewer,
}

pub struct RoutineFactory;

impl RoutineFactory {
    /// Wires the Anthropic generator and the Sheets table. Nothing here talks
    /// to the network yet.
    pub fn create(config: &AppConfig) -> error_stack::Result<FortuneServices, GenerationError> {
        let generator: Arc<dyn FortuneGenerator> = Arc::new(AnthropicFortuneGenerator::new(
            &config.anthropic,
            PromptTemplate::default(),
        )?);

        let table: Arc<dyn FortuneTable> = Arc::new(SheetsFortuneTable::new(config.sheets.clone()));

        Ok(Self::with_ports(
            generator,
            table,
            &config.fortune.fallback_text,
        ))
    }

    pub fn with_ports(
        generator: Arc<dyn FortuneGenerator>,
        table: Arc<dyn FortuneTable>,
        fallback_text: &str,
    ) -> FortuneServices {
        let routine = DailyFortuneRoutine::new(
            generator,
            FortuneSynchronizer::new(Arc::clone(&table)),
            fallback_text,
        );

        FortuneServices {
            routine: Arc::new(routine),
            viewer: FortuneViewer::new(table),
        }
    }
}
