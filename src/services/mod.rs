pub mod prompt;
pub mod relay;
pub mod runner;
