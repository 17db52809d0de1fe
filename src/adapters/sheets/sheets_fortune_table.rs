use error_stack::{Report, ResultExt};
use google_sheets4::api::ValueRange;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::{
    a1_notation::A1Notation,
    table::{TableExtent, TableRow},
};
use crate::ports::fortune_table::{FortuneTable, FortuneTableError};

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
    value_range_factory::ValueRangeFactory,
};

fn table_error(
    report: Report<SpreadsheetManagerError>,
    fallback: FortuneTableError,
) -> Report<FortuneTableError> {
    let context = match report.current_context() {
        SpreadsheetManagerError::AuthFailed => FortuneTableError::AuthError,
        SpreadsheetManagerError::SpreadsheetNotFound | SpreadsheetManagerError::SheetNotFound => {
            FortuneTableError::NotFoundError
        }
        _ => fallback,
    };
    report.change_context(context)
}

/// Fortune table stored in one worksheet of a Google spreadsheet.
///
/// Authentication and the worksheet check happen on first use, so building
/// the table never touches the network.
#[derive(Debug)]
pub struct SheetsFortuneTable {
    config: SpreadsheetConfig,
    manager: OnceCell<SpreadsheetManager>,
}

impl SheetsFortuneTable {
    pub fn new(config: SpreadsheetConfig) -> Self {
        Self {
            config,
            manager: OnceCell::new(),
        }
    }

    async fn manager(&self) -> error_stack::Result<&SpreadsheetManager, SpreadsheetManagerError> {
        self.manager
            .get_or_try_init(|| async {
                let manager = SpreadsheetManager::new(self.config.clone()).await?;
                manager.ensure_worksheet().await?;
                info!(
                    "Sheets: 📋 Connected to worksheet '{}'",
                    self.config.worksheet
                );
                Ok::<_, Report<SpreadsheetManagerError>>(manager)
            })
            .await
    }
}

#[async_trait::async_trait]
impl FortuneTable for SheetsFortuneTable {
    #[instrument(skip(self), name = "SheetsFortuneTable::read_all")]
    async fn read_all(&self) -> error_stack::Result<Vec<TableRow>, FortuneTableError> {
        let manager = self
            .manager()
            .await
            .map_err(|report| table_error(report, FortuneTableError::ReadFailed))?;

        manager
            .read_rows(&A1Notation::whole_sheet(&self.config.worksheet))
            .await
            .map_err(|report| table_error(report, FortuneTableError::ReadFailed))
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()), name = "SheetsFortuneTable::replace_all")]
    async fn replace_all(
        &self,
        rows: &[TableRow],
        stale: TableExtent,
    ) -> error_stack::Result<(), FortuneTableError> {
        let manager = self
            .manager()
            .await
            .map_err(|report| table_error(report, FortuneTableError::WriteFailed))?;

        let value_range = ValueRange::from_rows_padded(rows, stale);

        manager
            .write_range(&A1Notation::sheet_origin(&self.config.worksheet), value_range)
            .await
            .map_err(|report| table_error(report, FortuneTableError::WriteFailed))
            .attach_printable_lazy(|| format!("{} rows, stale extent {:?}", rows.len(), stale))
    }
}
