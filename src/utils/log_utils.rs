//! Logging utilities for the storage client
//!
//! Diagnostics go to stderr so that a caller's stdout (URLs printed by the
//! CLI, for instance) stays clean.

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Always shown, no verbose flag
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

/// Logger for storage diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    /// Current verbosity level
    verbosity: u8,
}

impl Logger {
    /// Create a new logger with the specified verbosity
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Log a message if the current verbosity level is at least the specified level
    pub fn log(&self, msg: &str, level: LogLevel) {
        log(msg, self.verbosity, level);
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }
}

/// Log a message if the verbosity level is at least the specified level
///
/// # Arguments
///
/// * `msg` - The message to log
/// * `verbosity` - The current verbosity level (0 = normal, 1 = info, 2+ = debug)
/// * `level` - The minimum level required for this message to be logged
pub fn log(msg: &str, verbosity: u8, level: LogLevel) {
    if verbosity >= level as u8 {
        match level {
            LogLevel::Normal => eprintln!("{}", msg),
            LogLevel::Info => eprintln!("info: {}", msg),
            LogLevel::Debug => eprintln!("dbg: {}", msg),
        }
    }
}

/// Log at debug level (verbose >= 2)
pub fn debug(msg: &str, verbosity: u8) {
    log(msg, verbosity, LogLevel::Debug)
}

/// Mask a credential for display, keeping at most its first four characters
pub fn mask_credential(value: &str) -> String {
    let visible: String = value.chars().take(4).collect();
    format!("{}****", visible)
}
