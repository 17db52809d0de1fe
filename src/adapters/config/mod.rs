pub mod anthropic_config;
pub mod app_config;
pub mod fortune_config;
pub mod sheets_config;
