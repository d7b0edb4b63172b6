pub mod config;
pub mod logging;

pub mod command;
pub mod retry;
