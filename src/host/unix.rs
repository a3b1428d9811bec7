//! POSIX syslog implementation of the host seam.
//!
//! Uses the libc `openlog`/`syslog`/`setlogmask`/`closelog` functions rather
//! than speaking to `/dev/log` directly, so the platform's own formatting and
//! reconnection behavior apply. POSIX supports a single connection to the
//! logging daemon per process; callers are expected to own the identifier and
//! channel for the lifetime of the process.

use std::ffi::CString;

use super::{OpenOptions, SyslogHost};
use crate::severity::{LogMask, Severity};

/// Host backed by the process-wide POSIX syslog channel.
#[derive(Debug, Default)]
pub struct UnixSyslog {
    // openlog(3) keeps the ident pointer rather than copying the string, so
    // the CString must stay alive for as long as the channel is open.
    ident: Option<CString>,
}

impl UnixSyslog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn priority(severity: Severity) -> libc::c_int {
    match severity {
        Severity::Emerg => libc::LOG_EMERG,
        Severity::Alert => libc::LOG_ALERT,
        Severity::Crit => libc::LOG_CRIT,
        Severity::Err => libc::LOG_ERR,
        Severity::Warn => libc::LOG_WARNING,
        Severity::Notice => libc::LOG_NOTICE,
        Severity::Info => libc::LOG_INFO,
        Severity::Debug => libc::LOG_DEBUG,
    }
}

/// C strings cannot carry interior NULs; anything after the first NUL byte
/// is dropped before crossing the FFI boundary.
fn to_c_string(text: &str) -> CString {
    let bytes: Vec<u8> = text.bytes().take_while(|byte| *byte != 0).collect();
    CString::new(bytes).unwrap_or_default()
}

impl SyslogHost for UnixSyslog {
    fn open(&mut self, ident: &str, options: OpenOptions) {
        let ident = to_c_string(ident);
        let mut flags: libc::c_int = 0;
        if options.log_pid {
            flags |= libc::LOG_PID;
        }
        if options.no_delay {
            flags |= libc::LOG_NDELAY;
        }
        unsafe { libc::openlog(ident.as_ptr(), flags, libc::LOG_USER) };
        // Moving the CString does not move its heap buffer, so the pointer
        // handed to openlog stays valid while we hold it here.
        self.ident = Some(ident);
    }

    fn emit(&mut self, severity: Severity, message: &str) {
        let message = to_c_string(message);
        // Fixed "%s" format: the payload is never interpreted as a template.
        unsafe { libc::syslog(priority(severity), c"%s".as_ptr(), message.as_ptr()) };
    }

    fn set_mask(&mut self, mask: LogMask) -> LogMask {
        let previous = unsafe { libc::setlogmask(libc::c_int::from(mask.bits())) };
        LogMask::from_bits(previous as u8)
    }

    fn close(&mut self) {
        unsafe { libc::closelog() };
        self.ident = None;
    }
}
