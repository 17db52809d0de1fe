//! In-memory fakes of the ports, shared by the unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use error_stack::report;

use crate::domain::sheets::table::{TableExtent, TableRow};
use crate::domain::zodiac::{Category, Subject};
use crate::ports::fortune_generator::{FortuneGenerator, GenerationError};
use crate::ports::fortune_table::{FortuneTable, FortuneTableError};

pub fn row(cells: &[&str]) -> TableRow {
    cells.iter().map(|cell| cell.to_string()).collect()
}

pub fn header() -> TableRow {
    row(&["date", "zodiac", "category", "content"])
}

/// Answers `"<subject> <category> <suffix>"`, except for the cells listed as
/// failing.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub suffix: String,
    pub failing: HashSet<(Subject, Category)>,
    pub calls: Mutex<Vec<(Subject, Category)>>,
}

impl ScriptedGenerator {
    pub fn new(suffix: &str) -> Self {
        Self {
            suffix: suffix.to_owned(),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, subject: Subject, category: Category) -> Self {
        self.failing.insert((subject, category));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl FortuneGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        subject: Subject,
        category: Category,
    ) -> error_stack::Result<String, GenerationError> {
        self.calls.lock().unwrap().push((subject, category));
        if self.failing.contains(&(subject, category)) {
            return Err(report!(GenerationError::Transport));
        }
        Ok(format!("{} {} {}", subject.id(), category.id(), self.suffix))
    }
}

#[derive(Default)]
pub struct InMemoryFortuneTable {
    pub rows: Mutex<Vec<TableRow>>,
    pub stale_extents: Mutex<Vec<TableExtent>>,
    pub read_error: Option<FortuneTableError>,
    pub write_error: Option<FortuneTableError>,
}

impl InMemoryFortuneTable {
    pub fn with_rows(rows: Vec<TableRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> Vec<TableRow> {
        self.rows.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        self.stale_extents.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl FortuneTable for InMemoryFortuneTable {
    async fn read_all(&self) -> error_stack::Result<Vec<TableRow>, FortuneTableError> {
        if let Some(error) = self.read_error {
            return Err(report!(error));
        }
        Ok(self.snapshot())
    }

    async fn replace_all(
        &self,
        rows: &[TableRow],
        stale: TableExtent,
    ) -> error_stack::Result<(), FortuneTableError> {
        if let Some(error) = self.write_error {
            return Err(report!(error));
        }
        self.stale_extents.lock().unwrap().push(stale);
        *self.rows.lock().unwrap() = rows.to_vec();
        Ok(())
    }
}
