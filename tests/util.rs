//! Shared helpers for the integration suite.

use parking_lot::Mutex;
use std::sync::Arc;

use sysgate::config::GatewayConfig;
use sysgate::gateway::Gateway;
use sysgate::host::recording::RecordingHost;
use sysgate::registry::{register_syslog, CommandRegistry};

pub type SharedGateway = Arc<Mutex<Gateway<RecordingHost>>>;

pub fn shared_gateway(config: &GatewayConfig) -> SharedGateway {
    Arc::new(Mutex::new(Gateway::new(RecordingHost::new(), config)))
}

/// A registry with the `syslog` command already installed over a recording
/// host, plus a handle to the gateway behind it.
pub fn registry_with_syslog() -> (CommandRegistry, SharedGateway) {
    let gateway = shared_gateway(&GatewayConfig::default());
    let mut registry = CommandRegistry::new();
    register_syslog(&mut registry, Arc::clone(&gateway));
    (registry, gateway)
}
