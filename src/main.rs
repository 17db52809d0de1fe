use std::{env, path::Path};

use daily_fortune::{
    adapters::config::app_config::AppConfig,
    cli::{
        cli_adapter::CliAdapter,
        logging::{self, LOG_FILE},
        routine_factory::RoutineFactory,
    },
};
use tracing::{error, info, warn};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    setup_tracing();
    setup_panic_hook();

    let args: Vec<String> = env::args().collect();

    info!("🔮 Starting daily fortune");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            error!("Could not load configuration: {:?}", report);
            return;
        }
    };

    let services = match RoutineFactory::create(&config) {
        Ok(services) => services,
        Err(report) => {
            error!("Could not set up the fortune services: {:?}", report);
            return;
        }
    };

    CliAdapter::new(services).run(args).await;

    info!("Daily fortune finished");
}

fn setup_tracing() {
    let indicatif_layer = IndicatifLayer::new();

    let (subscriber, file_error) = logging::subscriber(
        indicatif_layer.get_stderr_writer(),
        true,
        Path::new(LOG_FILE),
    );

    if let Err(err) = subscriber.with(indicatif_layer).try_init() {
        eprintln!("Failed to set up logging: {}", err);
    }

    if let Some(err) = file_error {
        warn!("Not writing {}: {}", LOG_FILE, err);
    }
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
