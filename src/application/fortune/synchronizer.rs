use std::sync::Arc;

use chrono::NaiveDate;
use error_stack::{report, Report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::domain::fortune::FortuneSheet;
use crate::domain::sheets::table::{format_date, merge_rows, TableExtent};
use crate::ports::fortune_table::{FortuneTable, FortuneTableError};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncError {
    #[error("failed to authenticate with the spreadsheet service")]
    AuthError,
    #[error("spreadsheet or worksheet not found")]
    NotFoundError,
    #[error("failed to read the fortune table")]
    ReadFailed,
    #[error("failed to overwrite the fortune table")]
    WriteFailed,
    #[error("fortune table is empty or has no header row")]
    MissingHeader,
    #[error("cannot compute the day after {0}")]
    TargetDateOutOfRange(NaiveDate),
}

fn lift(report: Report<FortuneTableError>) -> Report<SyncError> {
    let context = match report.current_context() {
        FortuneTableError::AuthError => SyncError::AuthError,
        FortuneTableError::NotFoundError => SyncError::NotFoundError,
        FortuneTableError::ReadFailed => SyncError::ReadFailed,
        FortuneTableError::WriteFailed => SyncError::WriteFailed,
    };
    report.change_context(context)
}

/// Fortunes are published one day ahead of the day they are shown.
pub fn target_date_for(today: NaiveDate) -> error_stack::Result<NaiveDate, SyncError> {
    today
        .succ_opt()
        .ok_or_else(|| report!(SyncError::TargetDateOutOfRange(today)))
}

/// Writes a day of fortunes into the fortune table, replacing whatever the
/// table already held for that day.
pub struct FortuneSynchronizer {
    table: Arc<dyn FortuneTable>,
}

impl std::fmt::Debug for FortuneSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FortuneSynchronizer").finish_non_exhaustive()
    }
}

impl FortuneSynchronizer {
    pub fn new(table: Arc<dyn FortuneTable>) -> Self {
        Self { table }
    }

    /// Synchronizes `sheet` for tomorrow (local time). Returns the number of
    /// rows written for that day.
    pub async fn synchronize(&self, sheet: &FortuneSheet) -> error_stack::Result<usize, SyncError> {
        let today = chrono::Local::now().date_naive();
        let target_date = target_date_for(today)?;
        self.synchronize_for(sheet, target_date).await
    }

    #[instrument(skip(self, sheet), fields(target_date = %format_date(target_date)))]
    pub async fn synchronize_for(
        &self,
        sheet: &FortuneSheet,
        target_date: NaiveDate,
    ) -> error_stack::Result<usize, SyncError> {
        tracing::info!("Sync: 📋 Reading the fortune table");
        let old_rows = self.table.read_all().await.map_err(lift)?;
        let stale = TableExtent::of(&old_rows);

        let new_rows = sheet.to_rows(target_date);
        let rows_written = new_rows.len();

        tracing::debug!(
            "Sync: 🔀 Merging {} new rows into {} existing rows",
            rows_written,
            old_rows.len()
        );
        let merged = merge_rows(old_rows, target_date, new_rows)
            .change_context(SyncError::MissingHeader)?;

        tracing::info!("Sync: 📝 Writing {} rows back in one request", merged.len());
        self.table
            .replace_all(&merged, stale)
            .await
            .map_err(lift)
            .attach_printable_lazy(|| format!("{} rows were not written", merged.len()))?;

        tracing::info!(
            "Sync: ✅ {} fortunes written for {}",
            rows_written,
            format_date(target_date)
        );
        Ok(rows_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheets::table::{TableRow, DATE_FORMAT};
    use crate::domain::zodiac::{Category, Subject};
    use crate::testing::{header, row, InMemoryFortuneTable};
    use strum::IntoEnumIterator;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn full_sheet(text: &str) -> FortuneSheet {
        let mut sheet = FortuneSheet::new();
        for subject in Subject::iter() {
            for category in Category::iter() {
                sheet.insert(subject, category, text);
            }
        }
        sheet
    }

    fn dated_rows(rows: &[TableRow], date: &str) -> usize {
        rows.iter()
            .filter(|row| row.first().map(String::as_str) == Some(date))
            .count()
    }

    fn setup(rows: Vec<TableRow>) -> (Arc<InMemoryFortuneTable>, FortuneSynchronizer) {
        let table = Arc::new(InMemoryFortuneTable::with_rows(rows));
        let synchronizer = FortuneSynchronizer::new(table.clone());
        (table, synchronizer)
    }

    #[test]
    fn test_target_date_is_tomorrow() {
        assert_eq!(target_date_for(date("2025-01-01")).unwrap(), date("2025-01-02"));
        assert_eq!(target_date_for(date("2024-12-31")).unwrap(), date("2025-01-01"));
        assert_eq!(target_date_for(date("2024-02-28")).unwrap(), date("2024-02-29"));
    }

    #[test]
    fn test_target_date_out_of_range() {
        let result = target_date_for(NaiveDate::MAX);
        assert_eq!(
            result.unwrap_err().current_context(),
            &SyncError::TargetDateOutOfRange(NaiveDate::MAX)
        );
    }

    #[tokio::test]
    async fn test_appends_a_new_day() {
        let old = vec![
            header(),
            row(&["2025-01-01", "rat", "overall", "a"]),
            row(&["2025-01-01", "rat", "money", "b"]),
            row(&["2025-01-01", "rat", "work", "c"]),
        ];
        let (table, synchronizer) = setup(old.clone());

        let written = synchronizer
            .synchronize_for(&full_sheet("new"), date("2025-01-02"))
            .await
            .unwrap();

        let rows = table.snapshot();
        assert_eq!(written, 60);
        assert_eq!(rows.len(), 64);
        assert_eq!(rows[..4], old[..]);
        assert_eq!(dated_rows(&rows, "2025-01-02"), 60);
        assert_eq!(rows[4], row(&["2025-01-02", "rat", "overall", "new"]));
        assert_eq!(rows[63], row(&["2025-01-02", "pig", "relationship", "new"]));
        assert_eq!(table.writes(), 1);
    }

    #[tokio::test]
    async fn test_rerun_replaces_the_target_day() {
        let (table, synchronizer) = setup(vec![
            header(),
            row(&["2025-01-01", "rat", "overall", "a"]),
        ]);

        synchronizer
            .synchronize_for(&full_sheet("first"), date("2025-01-02"))
            .await
            .unwrap();
        let after_first = table.snapshot();

        let written = synchronizer
            .synchronize_for(&full_sheet("second"), date("2025-01-02"))
            .await
            .unwrap();
        let after_second = table.snapshot();

        assert_eq!(written, 60);
        assert_eq!(after_first.len(), 62);
        assert_eq!(after_second.len(), after_first.len());
        assert_eq!(dated_rows(&after_second, "2025-01-02"), 60);
        assert!(after_second[2..].iter().all(|row| row[3] == "second"));
    }

    #[tokio::test]
    async fn test_idempotent_for_same_input() {
        let (table, synchronizer) = setup(vec![header()]);
        let sheet = full_sheet("same");

        synchronizer.synchronize_for(&sheet, date("2025-01-02")).await.unwrap();
        let once = table.snapshot();
        synchronizer.synchronize_for(&sheet, date("2025-01-02")).await.unwrap();

        assert_eq!(table.snapshot(), once);
    }

    #[tokio::test]
    async fn test_history_is_preserved_in_order() {
        let old = vec![
            header(),
            row(&["2024-12-30", "ox", "money", "x"]),
            row(&["2025-01-02", "ox", "money", "stale"]),
            row(&["2024-12-31", "dog", "work", "y \"quoted\""]),
            row(&["2025-01-03", "pig", "health", "z"]),
        ];
        let (table, synchronizer) = setup(old);

        synchronizer
            .synchronize_for(&full_sheet("new"), date("2025-01-02"))
            .await
            .unwrap();

        let rows = table.snapshot();
        assert_eq!(
            rows[..4],
            vec![
                header(),
                row(&["2024-12-30", "ox", "money", "x"]),
                row(&["2024-12-31", "dog", "work", "y \"quoted\""]),
                row(&["2025-01-03", "pig", "health", "z"]),
            ][..]
        );
        assert!(!rows.iter().any(|row| row[3] == "stale"));
    }

    #[tokio::test]
    async fn test_stale_extent_is_the_table_that_was_read() {
        let (table, synchronizer) = setup(vec![
            header(),
            row(&["2025-01-02", "rat", "overall", "stale", "extra column"]),
        ]);

        synchronizer
            .synchronize_for(&full_sheet("new"), date("2025-01-02"))
            .await
            .unwrap();

        assert_eq!(
            table.stale_extents.lock().unwrap().clone(),
            vec![TableExtent {
                rows: 2,
                columns: 5
            }]
        );
    }

    #[tokio::test]
    async fn test_partial_sheet_writes_only_present_cells() {
        let mut sheet = FortuneSheet::new();
        sheet.insert(Subject::Rat, Category::Money, "only");
        let (table, synchronizer) = setup(vec![header()]);

        let written = synchronizer
            .synchronize_for(&sheet, date("2025-01-02"))
            .await
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            table.snapshot(),
            vec![header(), row(&["2025-01-02", "rat", "money", "only"])]
        );
    }

    #[tokio::test]
    async fn test_empty_table_is_an_error() {
        let (table, synchronizer) = setup(vec![]);

        let result = synchronizer
            .synchronize_for(&full_sheet("new"), date("2025-01-02"))
            .await;

        assert_eq!(
            result.unwrap_err().current_context(),
            &SyncError::MissingHeader
        );
        assert_eq!(table.writes(), 0);
    }

    #[tokio::test]
    async fn test_read_errors_are_lifted() {
        for (table_error, sync_error) in [
            (FortuneTableError::AuthError, SyncError::AuthError),
            (FortuneTableError::NotFoundError, SyncError::NotFoundError),
            (FortuneTableError::ReadFailed, SyncError::ReadFailed),
        ] {
            let table = Arc::new(InMemoryFortuneTable {
                read_error: Some(table_error),
                ..Default::default()
            });
            let synchronizer = FortuneSynchronizer::new(table.clone());

            let result = synchronizer
                .synchronize_for(&full_sheet("new"), date("2025-01-02"))
                .await;

            assert_eq!(result.unwrap_err().current_context(), &sync_error);
            assert_eq!(table.writes(), 0);
        }
    }

    #[tokio::test]
    async fn test_write_error_leaves_table_untouched() {
        let table = Arc::new(InMemoryFortuneTable {
            rows: std::sync::Mutex::new(vec![header()]),
            write_error: Some(FortuneTableError::WriteFailed),
            ..Default::default()
        });
        let synchronizer = FortuneSynchronizer::new(table.clone());

        let result = synchronizer
            .synchronize_for(&full_sheet("new"), date("2025-01-02"))
            .await;

        assert_eq!(
            result.unwrap_err().current_context(),
            &SyncError::WriteFailed
        );
        assert_eq!(table.snapshot(), vec![header()]);
    }
}
