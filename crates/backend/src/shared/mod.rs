pub mod config;
pub mod format;
pub mod messages;
pub mod request_logger;
