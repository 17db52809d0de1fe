#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    /// Path to the service account key file.
    pub priv_key: Box<str>,
    pub spreadsheet_id: Box<str>,
    pub worksheet: Box<str>,
    pub timeout_secs: u64,
}
