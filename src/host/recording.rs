//! In-memory host that records every call, for tests and dry runs.

use super::{OpenOptions, SyslogHost};
use crate::severity::{LogMask, Severity};

/// A [`SyslogHost`] that applies mask filtering the way the real daemon does
/// and keeps everything it saw for later inspection.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub ident: Option<String>,
    pub options: Option<OpenOptions>,
    pub mask: Option<LogMask>,
    pub open_count: usize,
    pub closed: bool,
    /// Entries that passed the mask.
    pub emitted: Vec<(Severity, String)>,
    /// Entries silently dropped by the mask.
    pub dropped: Vec<(Severity, String)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn effective_mask(&self) -> LogMask {
        self.mask.unwrap_or_default()
    }
}

impl SyslogHost for RecordingHost {
    fn open(&mut self, ident: &str, options: OpenOptions) {
        self.ident = Some(ident.to_string());
        self.options = Some(options);
        self.open_count += 1;
        self.closed = false;
    }

    fn emit(&mut self, severity: Severity, message: &str) {
        if self.effective_mask().permits(severity) {
            self.emitted.push((severity, message.to_string()));
        } else {
            self.dropped.push((severity, message.to_string()));
        }
    }

    fn set_mask(&mut self, mask: LogMask) -> LogMask {
        let previous = self.effective_mask();
        self.mask = Some(mask);
        previous
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
