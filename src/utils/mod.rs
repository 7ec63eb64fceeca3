pub mod error;
pub mod log_file;
pub mod log_format;
pub mod logger;
pub mod validation;
