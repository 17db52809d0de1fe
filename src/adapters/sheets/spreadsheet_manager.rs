use std::{fmt::Debug, future::Future, time::Duration};

use error_stack::{report, ResultExt};
use google_sheets4::{hyper::StatusCode, Sheets};
use thiserror::Error;
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;

use super::{
    auth,
    http_client::{self, HttpsConnector},
};

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetManagerError {
    #[error("Failed to build the HTTPS client")]
    ClientSetup,
    #[error("Failed to authenticate with Google Sheets")]
    AuthFailed,
    #[error("Spreadsheet not found")]
    SpreadsheetNotFound,
    #[error("Worksheet not found")]
    SheetNotFound,
    #[error("Failed to fetch spreadsheet")]
    FailedToFetchSpreadsheet,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Request to Google Sheets timed out")]
    Timeout,
}

/// Picks the context for a failed hub call. Auth and missing-spreadsheet
/// failures are recognised, everything else becomes `fallback`.
pub(super) fn classify(
    err: &google_sheets4::Error,
    fallback: SpreadsheetManagerError,
) -> SpreadsheetManagerError {
    use google_sheets4::Error;

    let by_status = |code: u16| match code {
        401 | 403 => Some(SpreadsheetManagerError::AuthFailed),
        404 => Some(SpreadsheetManagerError::SpreadsheetNotFound),
        _ => None,
    };

    match err {
        Error::MissingToken(_) | Error::MissingAPIKey => SpreadsheetManagerError::AuthFailed,
        Error::BadRequest(body) => body["error"]["code"]
            .as_u64()
            .and_then(|code| u16::try_from(code).ok())
            .and_then(by_status)
            .unwrap_or(fallback),
        Error::Failure(response) => match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SpreadsheetManagerError::AuthFailed,
            StatusCode::NOT_FOUND => SpreadsheetManagerError::SpreadsheetNotFound,
            _ => fallback,
        },
        _ => fallback,
    }
}

/// Awaits a hub call under `timeout` and classifies its failure.
pub(super) async fn timed<T>(
    timeout: Duration,
    request: impl Future<Output = google_sheets4::Result<T>>,
    fallback: SpreadsheetManagerError,
) -> error_stack::Result<T, SpreadsheetManagerError> {
    match tokio::time::timeout(timeout, request).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            let context = classify(&err, fallback);
            Err(report!(err).change_context(context))
        }
        Err(elapsed) => Err(report!(elapsed)
            .change_context(SpreadsheetManagerError::Timeout)
            .attach_printable(fallback)),
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client()
            .change_context(SpreadsheetManagerError::ClientSetup)?;
        let auth = auth::auth(&config, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    pub(super) async fn call<T>(
        &self,
        request: impl Future<Output = google_sheets4::Result<T>>,
        fallback: SpreadsheetManagerError,
    ) -> error_stack::Result<T, SpreadsheetManagerError> {
        timed(self.timeout(), request, fallback).await
    }

    #[instrument]
    pub async fn sheet_titles(&self) -> error_stack::Result<Vec<String>, SpreadsheetManagerError> {
        let (_, spreadsheet) = self
            .call(
                self.hub
                    .spreadsheets()
                    .get(&self.config.spreadsheet_id)
                    .doit(),
                SpreadsheetManagerError::FailedToFetchSpreadsheet,
            )
            .await
            .attach_printable_lazy(|| format!("Spreadsheet id: {}", self.config.spreadsheet_id))?;

        Ok(spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties.and_then(|p| p.title))
            .collect())
    }

    /// Fails with `SheetNotFound` unless the configured worksheet exists.
    #[instrument]
    pub async fn ensure_worksheet(&self) -> error_stack::Result<(), SpreadsheetManagerError> {
        let titles = self.sheet_titles().await?;
        let worksheet = self.config.worksheet.as_ref();

        if titles.iter().any(|title| title == worksheet) {
            Ok(())
        } else {
            Err(report!(SpreadsheetManagerError::SheetNotFound)).attach_printable_lazy(|| {
                format!("Worksheet '{}' not in {:?}", worksheet, titles)
            })
        }
    }
}
