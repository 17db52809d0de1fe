pub mod command_handler;
pub mod fortune_generator;
pub mod fortune_table;
pub mod routine;
