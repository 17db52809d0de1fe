pub mod anthropic;
pub mod config;
pub mod sheets;
