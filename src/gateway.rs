//! The syslog command gateway: argument validation and pass-through.
//!
//! [`Gateway`] owns a [`SyslogHost`] together with the current log identifier
//! and channel state. [`Gateway::dispatch`] implements the four sub-commands
//! (`id`, `log`, `level`, `maxLevel`); the typed methods underneath it are
//! also public for embedders that do not route through textual argv.

use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::host::{OpenOptions, SyslogHost};
use crate::severity::{LogMask, Severity};

/// Longest identifier carried through to the host, in bytes.
pub const IDENT_MAX_BYTES: usize = 511;

const USAGE_DISPATCH: &str = "subcommand ?params? : valid subcommands are id, log, level, maxLevel";
const USAGE_ID: &str = "id <idString>";
const USAGE_LOG: &str = "log <priorityLevel> <message>";
const USAGE_LEVEL: &str = "level <levelToLog>";
const USAGE_MAX_LEVEL: &str = "maxLevel <upToLevel>";

/// Live gateway to the host logging facility.
///
/// Constructing one opens the logging channel immediately, so a `log` call is
/// never issued against a closed channel. The value is meant to be owned by
/// whatever manages the command's lifetime and passed to `dispatch`
/// explicitly; it holds no global state.
pub struct Gateway<H: SyslogHost> {
    host: H,
    identifier: String,
    open: bool,
}

impl<H: SyslogHost> Gateway<H> {
    /// Open the channel with the configured identifier and hand back a ready
    /// gateway. When the configuration restricts the mask, the restriction is
    /// applied after the open; otherwise the host default mask stays in
    /// effect.
    pub fn new(host: H, config: &GatewayConfig) -> Self {
        let mut gateway = Self {
            host,
            identifier: String::new(),
            open: false,
        };
        gateway.open_as(
            &config.identifier,
            OpenOptions {
                log_pid: true,
                no_delay: false,
            },
        );
        if let Some(level) = config.max_level {
            gateway.restrict_up_to(level);
        }
        gateway
    }

    /// Route one textual command. `argv[0]` is the sub-command name, the rest
    /// are its parameters. Validation happens before any mutation, so a
    /// failed call leaves the gateway exactly as it was.
    pub fn dispatch(&mut self, argv: &[&str]) -> Result<(), GatewayError> {
        let Some((&name, params)) = argv.split_first() else {
            return Err(GatewayError::Usage {
                usage: USAGE_DISPATCH,
            });
        };
        match name {
            "id" => match params {
                [identifier] => {
                    self.set_identifier(identifier);
                    Ok(())
                }
                _ => Err(GatewayError::Usage { usage: USAGE_ID }),
            },
            "log" => match params {
                [level, message] => {
                    let severity = parse_severity(level)?;
                    self.log(severity, message);
                    Ok(())
                }
                _ => Err(GatewayError::Usage { usage: USAGE_LOG }),
            },
            "level" => match params {
                [level] => {
                    let severity = parse_severity(level)?;
                    self.restrict_to(severity);
                    Ok(())
                }
                _ => Err(GatewayError::Usage { usage: USAGE_LEVEL }),
            },
            "maxLevel" => match params {
                [level] => {
                    let severity = parse_severity(level)?;
                    self.restrict_up_to(severity);
                    Ok(())
                }
                _ => Err(GatewayError::Usage {
                    usage: USAGE_MAX_LEVEL,
                }),
            },
            other => Err(GatewayError::UnknownSubcommand {
                name: other.to_string(),
            }),
        }
    }

    /// Store a new identifier (truncated to [`IDENT_MAX_BYTES`]) and reopen
    /// the channel with it. The reopen connects to the daemon immediately and
    /// tags entries with the process id.
    pub fn set_identifier(&mut self, identifier: &str) {
        self.open_as(
            identifier,
            OpenOptions {
                log_pid: true,
                no_delay: true,
            },
        );
    }

    /// Submit one entry. Whether the entry actually reaches the log is the
    /// host mask's business; a filtered entry is not an error.
    pub fn log(&mut self, severity: Severity, message: &str) {
        self.host.emit(severity, message);
    }

    /// Permit exactly one severity, nothing else. Deliberately distinct from
    /// [`Gateway::restrict_up_to`]: a single mask bit, not a threshold.
    pub fn restrict_to(&mut self, severity: Severity) {
        let previous = self.host.set_mask(LogMask::only(severity));
        debug!(severity = %severity, previous = previous.bits(), "log mask restricted to one severity");
    }

    /// Permit `severity` and every severity more severe than it.
    pub fn restrict_up_to(&mut self, severity: Severity) {
        let previous = self.host.set_mask(LogMask::up_to(severity));
        debug!(severity = %severity, previous = previous.bits(), "log mask restricted by threshold");
    }

    /// Close the logging channel. Only meant for shutdown; no sub-command
    /// reaches this.
    pub fn close(&mut self) {
        self.host.close();
        self.open = false;
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Borrow the underlying host, mainly so tests can inspect a recording
    /// host.
    pub fn host(&self) -> &H {
        &self.host
    }

    fn open_as(&mut self, identifier: &str, options: OpenOptions) {
        self.identifier = truncate_identifier(identifier);
        self.host.open(&self.identifier, options);
        self.open = true;
        debug!(identifier = %self.identifier, "syslog channel opened");
    }
}

fn parse_severity(name: &str) -> Result<Severity, GatewayError> {
    Severity::from_name(name).ok_or_else(|| GatewayError::InvalidSeverity {
        name: name.to_string(),
    })
}

/// Silent truncation to the platform bound, backing up to a char boundary so
/// a multi-byte identifier can never produce invalid text or an error.
fn truncate_identifier(identifier: &str) -> String {
    if identifier.len() <= IDENT_MAX_BYTES {
        return identifier.to_string();
    }
    let mut end = IDENT_MAX_BYTES;
    while !identifier.is_char_boundary(end) {
        end -= 1;
    }
    warn!(
        length = identifier.len(),
        limit = IDENT_MAX_BYTES,
        "log identifier truncated"
    );
    identifier[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::host::recording::RecordingHost;
    use crate::severity::ORDERED;

    fn ready_gateway() -> Gateway<RecordingHost> {
        Gateway::new(RecordingHost::new(), &GatewayConfig::default())
    }

    #[test]
    fn init_opens_with_default_identifier() {
        let gateway = ready_gateway();
        assert!(gateway.is_open());
        assert_eq!(gateway.identifier(), "sysgate");
        let host = gateway.host();
        assert_eq!(host.open_count, 1);
        let options = host.options.expect("channel was opened");
        assert!(options.log_pid);
        assert!(!options.no_delay);
        // No explicit mask restriction at init; the host default applies.
        assert_eq!(host.mask, None);
    }

    #[test]
    fn config_max_level_applies_at_init() {
        let config = GatewayConfig {
            max_level: Some(Severity::Warn),
            ..GatewayConfig::default()
        };
        let gateway = Gateway::new(RecordingHost::new(), &config);
        assert_eq!(gateway.host().mask, Some(LogMask::up_to(Severity::Warn)));
    }

    #[test]
    fn every_severity_logs_without_state_change() {
        let mut gateway = ready_gateway();
        for severity in ORDERED {
            gateway
                .dispatch(&["log", severity.as_name(), "payload"])
                .unwrap();
        }
        assert_eq!(gateway.identifier(), "sysgate");
        assert!(gateway.is_open());
        assert_eq!(gateway.host().emitted.len(), ORDERED.len());
        assert_eq!(gateway.host().open_count, 1);
    }

    #[test]
    fn level_permits_exactly_one_severity() {
        let mut gateway = ready_gateway();
        gateway.dispatch(&["level", "NOTICE"]).unwrap();
        gateway.dispatch(&["log", "NOTICE", "kept"]).unwrap();
        // Filtered, but still a success.
        gateway.dispatch(&["log", "ERR", "dropped"]).unwrap();
        gateway.dispatch(&["log", "DEBUG", "dropped too"]).unwrap();
        let host = gateway.host();
        assert_eq!(host.emitted, vec![(Severity::Notice, "kept".to_string())]);
        assert_eq!(host.dropped.len(), 2);
    }

    #[test]
    fn max_level_permits_equal_and_more_severe() {
        let mut gateway = ready_gateway();
        gateway.dispatch(&["maxLevel", "WARN"]).unwrap();
        for severity in ORDERED {
            gateway
                .dispatch(&["log", severity.as_name(), "entry"])
                .unwrap();
        }
        let host = gateway.host();
        let kept: Vec<Severity> = host.emitted.iter().map(|(severity, _)| *severity).collect();
        assert_eq!(
            kept,
            vec![
                Severity::Emerg,
                Severity::Alert,
                Severity::Crit,
                Severity::Err,
                Severity::Warn
            ]
        );
        let filtered: Vec<Severity> = host.dropped.iter().map(|(severity, _)| *severity).collect();
        assert_eq!(
            filtered,
            vec![Severity::Notice, Severity::Info, Severity::Debug]
        );
    }

    #[test]
    fn level_and_max_level_differ() {
        // `level WARN` is a single bit: EMERG gets filtered.
        let mut gateway = ready_gateway();
        gateway.dispatch(&["level", "WARN"]).unwrap();
        gateway.dispatch(&["log", "EMERG", "x"]).unwrap();
        assert!(gateway.host().emitted.is_empty());

        // `maxLevel WARN` is a threshold: EMERG passes.
        let mut gateway = ready_gateway();
        gateway.dispatch(&["maxLevel", "WARN"]).unwrap();
        gateway.dispatch(&["log", "EMERG", "x"]).unwrap();
        assert_eq!(gateway.host().emitted.len(), 1);
    }

    #[test]
    fn id_reopens_without_error() {
        let mut gateway = ready_gateway();
        gateway.dispatch(&["id", "svc1"]).unwrap();
        gateway.dispatch(&["id", "svc2"]).unwrap();
        assert_eq!(gateway.identifier(), "svc2");
        let host = gateway.host();
        assert_eq!(host.open_count, 3);
        let options = host.options.expect("channel reopened");
        assert!(options.log_pid);
        assert!(options.no_delay);
    }

    #[test]
    fn empty_identifier_is_accepted() {
        let mut gateway = ready_gateway();
        gateway.dispatch(&["id", ""]).unwrap();
        assert_eq!(gateway.identifier(), "");
        assert!(gateway.is_open());
    }

    #[test]
    fn long_identifier_is_truncated_not_rejected() {
        let mut gateway = ready_gateway();
        let long = "x".repeat(IDENT_MAX_BYTES + 100);
        gateway.dispatch(&["id", &long]).unwrap();
        assert_eq!(gateway.identifier().len(), IDENT_MAX_BYTES);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; 300 of them straddle the 511-byte bound.
        let long = "é".repeat(300);
        let truncated = truncate_identifier(&long);
        assert_eq!(truncated.len(), IDENT_MAX_BYTES - 1);
        assert!(truncated.chars().all(|ch| ch == 'é'));
    }

    #[test]
    fn unknown_subcommand_is_a_usage_error() {
        let mut gateway = ready_gateway();
        let err = gateway.dispatch(&["flush"]).unwrap_err();
        assert_eq!(
            err,
            GatewayError::UnknownSubcommand {
                name: "flush".into()
            }
        );
        assert_eq!(err.kind(), ErrorKind::Usage);
        for name in ["id", "log", "level", "maxLevel"] {
            assert!(err.to_string().contains(name));
        }
    }

    #[test]
    fn unknown_severity_is_rejected_by_all_three() {
        let mut gateway = ready_gateway();
        for argv in [
            &["log", "FOO", "message"][..],
            &["level", "FOO"][..],
            &["maxLevel", "FOO"][..],
        ] {
            let err = gateway.dispatch(argv).unwrap_err();
            assert_eq!(err, GatewayError::InvalidSeverity { name: "FOO".into() });
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        // No partial mutation from any of the failures.
        let host = gateway.host();
        assert_eq!(host.mask, None);
        assert!(host.emitted.is_empty());
        assert!(host.dropped.is_empty());
    }

    #[test]
    fn wrong_argument_counts_carry_usage_strings() {
        let mut gateway = ready_gateway();
        let cases: [(&[&str], &str); 5] = [
            (&[], USAGE_DISPATCH),
            (&["id"], USAGE_ID),
            (&["log", "INFO"], USAGE_LOG),
            (&["level"], USAGE_LEVEL),
            (&["maxLevel", "WARN", "extra"], USAGE_MAX_LEVEL),
        ];
        for (argv, usage) in cases {
            let err = gateway.dispatch(argv).unwrap_err();
            assert_eq!(err, GatewayError::Usage { usage }, "argv: {argv:?}");
        }
        assert_eq!(gateway.host().open_count, 1);
        assert_eq!(gateway.identifier(), "sysgate");
    }

    #[test]
    fn message_is_passed_through_verbatim() {
        let mut gateway = ready_gateway();
        let tricky = "100% done: %s %d %n";
        gateway.dispatch(&["log", "INFO", tricky]).unwrap();
        assert_eq!(gateway.host().emitted[0].1, tricky);
    }

    #[test]
    fn close_marks_the_channel_closed() {
        let mut gateway = ready_gateway();
        gateway.close();
        assert!(!gateway.is_open());
        assert!(gateway.host().closed);
    }
}
