//! Seam between the gateway and the operating system's logging facility.
//!
//! The gateway never talks to syslog directly; it drives a [`SyslogHost`].
//! [`unix::UnixSyslog`] forwards to the POSIX API, and
//! [`recording::RecordingHost`] captures calls in memory for tests and dry
//! runs. Mask filtering is the host's job, exactly as it is syslogd's job in
//! the real facility.

pub mod recording;
#[cfg(unix)]
pub mod unix;

use crate::severity::{LogMask, Severity};

/// Options applied when a logging channel is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenOptions {
    /// Tag every entry with the process id (`LOG_PID`).
    pub log_pid: bool,
    /// Connect to the logging daemon immediately (`LOG_NDELAY`).
    pub no_delay: bool,
}

/// The operations the gateway needs from a system-logging facility.
///
/// All operations are infallible, mirroring the POSIX API: `openlog(3)` and
/// `syslog(3)` report nothing, and `setlogmask(3)` returns the prior mask.
/// Channels are opened under the default application (user) facility.
pub trait SyslogHost {
    /// Open (or reopen) the logging channel tagged with `ident`. Reopening
    /// with a new identifier is safe and supersedes the previous channel.
    fn open(&mut self, ident: &str, options: OpenOptions);

    /// Submit one entry. The message is an opaque payload, never a format
    /// template. Entries outside the current mask are dropped silently.
    fn emit(&mut self, severity: Severity, message: &str);

    /// Replace the emission mask, returning the mask previously in effect.
    fn set_mask(&mut self, mask: LogMask) -> LogMask;

    /// Close the logging channel.
    fn close(&mut self);
}
