//! Errors reported by the gateway.

use thiserror::Error;

/// Valid sub-commands, rendered for error messages.
pub const SUBCOMMAND_LIST: &str = "id, log, level, maxLevel";

/// Error raised by [`crate::gateway::Gateway::dispatch`].
///
/// Every variant is synchronous and recoverable; a failed call never mutates
/// gateway state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Wrong number of arguments for a recognized sub-command.
    #[error("wrong # args: should be \"{usage}\"")]
    Usage { usage: &'static str },

    /// The sub-command name is not one of the four recognized ones.
    #[error("unknown subcommand \"{name}\": must be id, log, level, or maxLevel")]
    UnknownSubcommand { name: String },

    /// A severity argument did not match any of the eight canonical names.
    #[error(
        "unknown severity \"{name}\": must be EMERG, ALERT, CRIT, ERR, WARN, NOTICE, INFO, or DEBUG"
    )]
    InvalidSeverity { name: String },
}

/// The two caller-facing error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    InvalidArgument,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Usage { .. } | GatewayError::UnknownSubcommand { .. } => ErrorKind::Usage,
            GatewayError::InvalidSeverity { .. } => ErrorKind::InvalidArgument,
        }
    }
}
