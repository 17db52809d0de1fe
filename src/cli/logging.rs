use std::{fs::File, io, path::Path, sync::Mutex};

use tracing::{Level, Subscriber};
use tracing_subscriber::{
    filter::Targets, fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, Registry,
};

use crate::prettyprint::prettyprint::PrettyFormatter;

pub const LOG_FILE: &str = "daily_fortune.log";

/// Subscriber writing pretty events to `console` and, when it can be
/// created, to the file at `log_path`. A file that cannot be created only
/// drops the file layer; its error is handed back to be logged once the
/// subscriber is installed.
pub fn subscriber<W>(
    console: W,
    ansi: bool,
    log_path: &Path,
) -> (
    impl Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
    Option<io::Error>,
)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (log_file, file_error) = match File::create(log_path) {
        Ok(file) => (Some(file), None),
        Err(err) => (None, Some(err)),
    };

    let log_file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .event_format(PrettyFormatter::new(false))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(ansi))
        .with_writer(console)
        .with_ansi(ansi);

    let subscriber = Registry::default()
        .with(Targets::new().with_target("daily_fortune", Level::TRACE))
        .with(log_file_layer)
        .with(console_layer);

    (subscriber, file_error)
}
