use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use strum::{EnumCount, IntoEnumIterator};

use super::sheets::table::{format_date, TableRow};
use super::zodiac::{Category, Subject};

/// Text used for a cell whose generation failed ("today will be a calm day").
pub const FALLBACK_TEXT: &str = "오늘은 평온한 하루가 될 것입니다.";

/// Number of cells in a complete sheet.
pub const CELL_COUNT: usize = Subject::COUNT * Category::COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneEntry {
    pub date: NaiveDate,
    pub subject: Subject,
    pub category: Category,
    pub text: String,
}

impl FortuneEntry {
    /// Row in `[date, subject_id, category_id, text]` column order.
    pub fn into_row(self) -> TableRow {
        vec![
            format_date(self.date),
            self.subject.id().to_owned(),
            self.category.id().to_owned(),
            self.text,
        ]
    }
}

/// Fortune texts keyed by subject, then category. Iteration always follows
/// the declaration order of both enums.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FortuneSheet {
    cells: BTreeMap<Subject, BTreeMap<Category, String>>,
}

impl FortuneSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text`, returning the text previously held by the cell.
    pub fn insert(
        &mut self,
        subject: Subject,
        category: Category,
        text: impl Into<String>,
    ) -> Option<String> {
        self.cells
            .entry(subject)
            .or_default()
            .insert(category, text.into())
    }

    pub fn get(&self, subject: Subject, category: Category) -> Option<&str> {
        self.cells
            .get(&subject)
            .and_then(|categories| categories.get(&category))
            .map(String::as_str)
    }

    pub fn categories(&self, subject: Subject) -> Option<&BTreeMap<Category, String>> {
        self.cells.get(&subject)
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every subject has a text for every category.
    pub fn is_complete(&self) -> bool {
        Subject::iter().all(|subject| {
            Category::iter().all(|category| self.get(subject, category).is_some())
        })
    }

    /// Entries dated `date`, subject-major, in enumeration order.
    pub fn entries(&self, date: NaiveDate) -> impl Iterator<Item = FortuneEntry> + '_ {
        self.cells.iter().flat_map(move |(subject, categories)| {
            categories.iter().map(move |(category, text)| FortuneEntry {
                date,
                subject: *subject,
                category: *category,
                text: text.clone(),
            })
        })
    }

    pub fn to_rows(&self, date: NaiveDate) -> Vec<TableRow> {
        self.entries(date).map(FortuneEntry::into_row).collect()
    }

    /// Groups the rows of a fortune table dated `date`. The first row is the
    /// header and is skipped. Rows that are too short or carry unknown ids
    /// are ignored; a later row for the same cell wins.
    pub fn from_rows(rows: &[TableRow], date: NaiveDate) -> Self {
        let date = format_date(date);
        let mut sheet = FortuneSheet::new();

        for row in rows.iter().skip(1) {
            let [row_date, subject, category, text, ..] = row.as_slice() else {
                continue;
            };
            if *row_date != date {
                continue;
            }
            let (Ok(subject), Ok(category)) =
                (Subject::from_str(subject), Category::from_str(category))
            else {
                tracing::debug!("Skipping row with unknown ids: {:?}", row);
                continue;
            };
            sheet.insert(subject, category, text.as_str());
        }

        sheet
    }
}
