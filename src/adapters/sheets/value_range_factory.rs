use google_sheets4::api::ValueRange;
use serde_json::Value;
use std::borrow::Cow;

use crate::domain::sheets::table::{TableExtent, TableRow};

pub trait ValueRangeFactory {
    fn from_rows_padded(rows: &[TableRow], extent: TableExtent) -> Self;
}

fn wrap_value<'a, T: Into<Cow<'a, str>>>(value: T) -> Value {
    Value::String(value.into().into_owned())
}

impl ValueRangeFactory for ValueRange {
    /// Rows padded with empty strings up to `extent`, so that writing them at
    /// `A1` also blanks whatever the sheet held beyond the new content.
    fn from_rows_padded(rows: &[TableRow], extent: TableExtent) -> Self {
        let extent = extent.union(TableExtent::of(rows));

        let values = (0..extent.rows)
            .map(|index| {
                let row = rows.get(index).map(Vec::as_slice).unwrap_or_default();
                (0..extent.columns)
                    .map(|column| wrap_value(row.get(column).map(String::as_str).unwrap_or("")))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(values),
        }
    }
}
