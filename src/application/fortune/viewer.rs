use std::fmt::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use error_stack::ResultExt;
use strum::IntoEnumIterator;
use tracing::instrument;

use crate::domain::fortune::{FortuneSheet, FALLBACK_TEXT};
use crate::domain::luck::{luck_score, stars};
use crate::domain::sheets::table::format_date;
use crate::domain::zodiac::{Category, Subject};
use crate::ports::fortune_table::{FortuneTable, FortuneTableError};

/// Reads back the fortunes published for one day.
pub struct FortuneViewer {
    table: Arc<dyn FortuneTable>,
}

impl FortuneViewer {
    pub fn new(table: Arc<dyn FortuneTable>) -> Self {
        Self { table }
    }

    #[instrument(skip(self), fields(date = %format_date(date)))]
    pub async fn fetch(&self, date: NaiveDate) -> error_stack::Result<FortuneSheet, FortuneTableError> {
        let rows = self
            .table
            .read_all()
            .await
            .attach_printable_lazy(|| format!("Failed to read fortunes for {}", date))?;
        Ok(FortuneSheet::from_rows(&rows, date))
    }
}

/// Human readable listing of a day of fortunes, optionally narrowed to one
/// subject. Missing cells show the fallback text, like the public page does.
pub fn render_sheet(sheet: &FortuneSheet, date: NaiveDate, only: Option<Subject>) -> String {
    let mut output = format!(
        "🔮 Fortunes for {} ({} entries)\n",
        format_date(date),
        sheet.len()
    );

    for subject in Subject::iter().filter(|subject| only.map_or(true, |only| only == *subject)) {
        let overall = sheet.get(subject, Category::Overall).unwrap_or_default();
        // Infallible: writing to a String
        let _ = writeln!(
            output,
            "\n{} {} {}",
            subject.label(),
            subject.id(),
            stars(luck_score(overall))
        );
        for category in Category::iter() {
            let text = sheet.get(subject, category).unwrap_or(FALLBACK_TEXT);
            let _ = writeln!(output, "  - {}: {}", category.label(), text);
        }
    }

    output
}
