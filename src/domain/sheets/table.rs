use chrono::NaiveDate;
use thiserror::Error;

/// Date format used in the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A table row exactly as the spreadsheet returned it.
pub type TableRow = Vec<String>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("table has no header row")]
    MissingHeader,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Area of the sheet a table occupies, counted from `A1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableExtent {
    pub rows: usize,
    pub columns: usize,
}

impl TableExtent {
    pub fn of(rows: &[TableRow]) -> Self {
        TableExtent {
            rows: rows.len(),
            columns: rows.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    pub fn union(self, other: TableExtent) -> Self {
        TableExtent {
            rows: self.rows.max(other.rows),
            columns: self.columns.max(other.columns),
        }
    }
}

fn is_dated(row: &TableRow, date: &str) -> bool {
    row.first().map(String::as_str) == Some(date)
}

/// Drops every data row dated `target_date` and appends `new_rows` after the
/// surviving ones. The header and all other rows are kept untouched and in
/// order.
pub fn merge_rows(
    old_rows: Vec<TableRow>,
    target_date: NaiveDate,
    new_rows: Vec<TableRow>,
) -> Result<Vec<TableRow>, TableError> {
    let target = format_date(target_date);

    let mut rows = old_rows.into_iter();
    let header = rows.next().ok_or(TableError::MissingHeader)?;

    let mut merged = Vec::with_capacity(rows.len() + new_rows.len() + 1);
    merged.push(header);
    merged.extend(rows.filter(|row| !is_dated(row, &target)));
    merged.extend(new_rows);
    Ok(merged)
}
