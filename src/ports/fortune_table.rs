use thiserror::Error;

use crate::domain::sheets::table::{TableExtent, TableRow};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortuneTableError {
    #[error("failed to authenticate with the spreadsheet service")]
    AuthError,
    #[error("spreadsheet or worksheet not found")]
    NotFoundError,
    #[error("failed to read the fortune table")]
    ReadFailed,
    #[error("failed to overwrite the fortune table")]
    WriteFailed,
}

/// Remote table holding one fortune per row, header first.
#[async_trait::async_trait]
pub trait FortuneTable: Send + Sync {
    /// Reads every row of the table, in sheet order. Cells are returned as
    /// the sheet displays them.
    async fn read_all(&self) -> error_stack::Result<Vec<TableRow>, FortuneTableError>;

    /// Replaces the table content with `rows` as plain values in a single
    /// request. Every cell inside `stale` that `rows` does not cover ends up
    /// empty.
    async fn replace_all(
        &self,
        rows: &[TableRow],
        stale: TableExtent,
    ) -> error_stack::Result<(), FortuneTableError>;
}
