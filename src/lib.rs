pub mod config;
pub mod error;
pub mod gateway;
pub mod host;
pub mod registry;
pub mod severity;
