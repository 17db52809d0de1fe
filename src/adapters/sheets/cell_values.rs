use serde_json::Value;

use crate::domain::sheets::table::TableRow;

/// Cell text as the sheet displays it. Strings are taken verbatim so quotes
/// inside fortunes survive.
pub fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn into_table_rows(values: Vec<Vec<Value>>) -> Vec<TableRow> {
    values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}
