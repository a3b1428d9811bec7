use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "sysgate",
    about = "Submits messages to the system log and adjusts the process log mask.",
    version
)]
struct Args {
    /// Path to a gateway configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Set the log identifier and reopen the logging channel.
    Id { identifier: String },
    /// Emit a message to the system log at the given severity.
    Log { level: String, message: String },
    /// Restrict the log mask to exactly one severity.
    Level { level: String },
    /// Permit the given severity and everything more severe.
    MaxLevel { level: String },
}

impl Command {
    fn to_argv(&self) -> Vec<&str> {
        match self {
            Command::Id { identifier } => vec!["id", identifier],
            Command::Log { level, message } => vec!["log", level, message],
            Command::Level { level } => vec!["level", level],
            Command::MaxLevel { level } => vec!["maxLevel", level],
        }
    }
}

#[cfg(unix)]
fn main() -> Result<()> {
    use sysgate::config::GatewayConfig;
    use sysgate::gateway::Gateway;
    use sysgate::host::unix::UnixSyslog;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GatewayConfig::load(path)?,
        None => GatewayConfig::default(),
    };

    let mut gateway = Gateway::new(UnixSyslog::new(), &config);
    let result = gateway.dispatch(&args.command.to_argv());
    gateway.close();
    result?;
    Ok(())
}

#[cfg(not(unix))]
fn main() -> Result<()> {
    let _ = Args::parse();
    anyhow::bail!("sysgate requires the POSIX syslog facility")
}
