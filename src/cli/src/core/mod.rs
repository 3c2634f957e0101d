pub mod exit_code;
pub mod formatter;
pub mod logger;
