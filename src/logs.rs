//! Leveled console progress output.
//!
//! The pipeline narrates each stage to stderr so a run can be followed
//! live. A global quiet switch suppresses info/success chatter; warnings
//! and errors always print.

use std::sync::atomic::{AtomicBool, Ordering};

/// Log level for console display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress info/success output for the rest of the run.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn emit(level: LogLevel, message: &str) {
    if is_quiet() && matches!(level, LogLevel::Info | LogLevel::Success) {
        return;
    }
    let prefix = match level {
        LogLevel::Info => "   ",
        LogLevel::Success => "   ✓",
        LogLevel::Warning => "   ⚠️",
        LogLevel::Error => "   ❌",
    };
    eprintln!("{} {}", prefix, message);
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    emit(LogLevel::Info, &msg.into());
}

pub fn log_success(msg: impl Into<String>) {
    emit(LogLevel::Success, &msg.into());
}

pub fn log_warning(msg: impl Into<String>) {
    emit(LogLevel::Warning, &msg.into());
}

pub fn log_error(msg: impl Into<String>) {
    emit(LogLevel::Error, &msg.into());
}
