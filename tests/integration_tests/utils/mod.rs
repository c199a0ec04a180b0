#[path = "mod_logger.rs"]
mod logger_tests;
