//! Syslog severity levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Syslog-style severity. Lower rank is more severe.
///
/// The derived ordering follows the rank, so `LogLevel::Emerg < LogLevel::Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Emerg = 0,
    Alert = 1,
    Crit = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    #[default]
    Info = 6,
    Debug = 7,
}

impl LogLevel {
    /// Every level, most severe first.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Emerg,
        LogLevel::Alert,
        LogLevel::Crit,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Emerg => "emerg",
            LogLevel::Alert => "alert",
            LogLevel::Crit => "crit",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Numeric syslog rank (0 = emerg, 7 = debug)
    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Whether a record at this level passes the given threshold.
    #[inline]
    pub fn is_enabled_for(&self, threshold: LogLevel) -> bool {
        self.rank() <= threshold.rank()
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Emerg | LogLevel::Alert => BrightRed,
            LogLevel::Crit | LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Notice => Cyan,
            LogLevel::Info => Green,
            LogLevel::Debug => Blue,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "emerg" | "emergency" => Ok(LogLevel::Emerg),
            "alert" => Ok(LogLevel::Alert),
            "crit" | "critical" => Ok(LogLevel::Crit),
            "error" | "err" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "notice" => Ok(LogLevel::Notice),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
