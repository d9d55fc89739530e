//! Shared Utilities for the img_webp tools
//!
//! - Logging setup and external command execution with structured logs
//! - Directory listing filtered by extension
//! - Command-line path argument safety
//! - Size formatting for reports

pub mod batch;
pub mod logging;
pub mod path_safety;
pub mod report;

pub use batch::{collect_files, get_extension_lowercase, has_extension};
pub use logging::{execute_external_command, ExternalCommandResult, LogConfig};
pub use path_safety::safe_path_arg;
pub use report::{calculate_size_reduction, format_bytes, format_size_change};
