pub mod cli;
pub mod loader;
pub mod report;
pub mod scheduler;
