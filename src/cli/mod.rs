pub mod cli_adapter;
pub mod logging;
pub mod routine_factory;
