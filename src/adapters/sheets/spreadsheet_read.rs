use error_stack::ResultExt;
use tracing::instrument;

use crate::domain::sheets::{a1_notation::A1Notation, table::TableRow};

use super::{
    cell_values::into_table_rows,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
};

pub trait SpreadsheetRead {
    fn read_rows(
        &self,
        range: &A1Notation,
    ) -> impl std::future::Future<Output = error_stack::Result<Vec<TableRow>, SpreadsheetManagerError>>
           + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    /// Rows of `range` with formatted cell values. A range with no values
    /// reads as no rows.
    #[instrument]
    async fn read_rows(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<TableRow>, SpreadsheetManagerError> {
        let (_, value_range) = self
            .call(
                self.hub
                    .spreadsheets()
                    .values_get(&self.config.spreadsheet_id, range.as_ref())
                    .doit(),
                SpreadsheetManagerError::FailedToFetchRange,
            )
            .await
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        Ok(into_table_rows(value_range.values.unwrap_or_default()))
    }
}
