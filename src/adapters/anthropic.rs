pub mod client;
pub mod fortune_generator;
pub mod types;
