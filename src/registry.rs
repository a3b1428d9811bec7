//! Adapter between the gateway and a hosting runtime's command table.
//!
//! The core gateway knows nothing about any particular interpreter; a host
//! runtime registers it under a command name here and routes invocations
//! through [`CommandRegistry::invoke`]. [`register_syslog`] and
//! [`unregister_syslog`] cover the two ends of the lifecycle: register the
//! command with an open channel at startup, remove the command and close the
//! channel at shutdown.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::host::SyslogHost;

/// Name the gateway is registered under.
pub const SYSLOG_COMMAND: &str = "syslog";

type Handler = Box<dyn FnMut(&[&str]) -> Result<(), GatewayError> + Send>;

/// Errors surfaced by [`CommandRegistry::invoke`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid command name \"{0}\"")]
    UnknownCommand(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Name-to-handler table standing in for the hosting runtime's command
/// surface.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handler under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) {
        self.commands.insert(name.into(), handler);
    }

    /// Remove the handler for `name`. Returns whether one was installed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.commands.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Invoke the named command with `args` (the sub-command and its
    /// parameters, without the command name itself).
    pub fn invoke(&mut self, name: &str, args: &[&str]) -> Result<(), RegistryError> {
        let handler = self
            .commands
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))?;
        handler(args)?;
        Ok(())
    }
}

/// Register the shared gateway as the `syslog` command.
///
/// The gateway sits behind a mutex so a concurrent host cannot interleave a
/// channel reopen with an in-flight `log` call.
pub fn register_syslog<H>(registry: &mut CommandRegistry, gateway: Arc<Mutex<Gateway<H>>>)
where
    H: SyslogHost + Send + 'static,
{
    registry.register(
        SYSLOG_COMMAND,
        Box::new(move |argv| gateway.lock().dispatch(argv)),
    );
}

/// Remove the `syslog` command and close the logging channel. Returns whether
/// the command was registered.
pub fn unregister_syslog<H>(registry: &mut CommandRegistry, gateway: &Arc<Mutex<Gateway<H>>>) -> bool
where
    H: SyslogHost,
{
    gateway.lock().close();
    registry.unregister(SYSLOG_COMMAND)
}
