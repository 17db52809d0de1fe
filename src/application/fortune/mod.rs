pub mod daily_fortune_routine;
pub mod generate;
pub mod prompt;
pub mod synchronizer;
pub mod viewer;
