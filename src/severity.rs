//! Syslog severity levels and the emission mask derived from them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A syslog severity, ordered from most severe (`EMERG`) to least (`DEBUG`).
///
/// Discriminants are the syslog numeric priority codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Emerg = 0,
    Alert = 1,
    Crit = 2,
    Err = 3,
    Warn = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

/// All severities in decreasing order of importance. This list is the single
/// source of truth for name lookup and for [`LogMask::up_to`] range math.
pub const ORDERED: [Severity; 8] = [
    Severity::Emerg,
    Severity::Alert,
    Severity::Crit,
    Severity::Err,
    Severity::Warn,
    Severity::Notice,
    Severity::Info,
    Severity::Debug,
];

/// The eight valid names, rendered for error messages.
pub const NAME_LIST: &str = "EMERG, ALERT, CRIT, ERR, WARN, NOTICE, INFO, DEBUG";

static BY_NAME: Lazy<HashMap<&'static str, Severity>> = Lazy::new(|| {
    ORDERED
        .iter()
        .map(|severity| (severity.as_name(), *severity))
        .collect()
});

impl Severity {
    /// Numeric syslog priority code (0 = `EMERG` .. 7 = `DEBUG`).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The canonical upper-case name.
    pub fn as_name(self) -> &'static str {
        match self {
            Severity::Emerg => "EMERG",
            Severity::Alert => "ALERT",
            Severity::Crit => "CRIT",
            Severity::Err => "ERR",
            Severity::Warn => "WARN",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Case-sensitive lookup against the eight canonical names.
    pub fn from_name(name: &str) -> Option<Severity> {
        BY_NAME.get(name).copied()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_name())
    }
}

/// Bitmask of severities permitted to reach the host logging facility, one
/// bit per severity, matching the syslog `setlogmask(3)` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogMask(u8);

impl LogMask {
    /// Mask permitting every severity.
    pub const ALL: LogMask = LogMask(0xff);

    /// Mask permitting exactly one severity (the `LOG_MASK` shape).
    pub fn only(severity: Severity) -> LogMask {
        LogMask(1 << severity.code())
    }

    /// Mask permitting `severity` and everything more severe (the `LOG_UPTO`
    /// shape).
    pub fn up_to(severity: Severity) -> LogMask {
        LogMask(((1u16 << (severity.code() + 1)) - 1) as u8)
    }

    /// Reconstruct a mask from raw bits, as returned by `setlogmask(3)`.
    pub fn from_bits(bits: u8) -> LogMask {
        LogMask(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn permits(self, severity: Severity) -> bool {
        self.0 & (1 << severity.code()) != 0
    }
}

impl Default for LogMask {
    fn default() -> Self {
        LogMask::ALL
    }
}
