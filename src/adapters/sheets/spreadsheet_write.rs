use error_stack::ResultExt;
use google_sheets4::api::ValueRange;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;

use super::spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError};

pub trait SpreadsheetWrite {
    fn write_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> impl std::future::Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;
}

impl SpreadsheetWrite for SpreadsheetManager {
    /// Writes `value_range` starting at `range`. Values are stored as typed,
    /// without formula or number parsing.
    #[instrument(skip(value_range))]
    async fn write_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.call(
            self.hub
                .spreadsheets()
                .values_update(value_range, &self.config.spreadsheet_id, range.as_ref())
                .value_input_option("RAW")
                .doit(),
            SpreadsheetManagerError::FailedToWriteRange,
        )
        .await
        .map(|_| ())
        .attach_printable_lazy(|| format!("Failed to write to range {} ", range))
    }
}
