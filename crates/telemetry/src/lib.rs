//! Logging setup shared by the halfmoon binaries.
//!
//! Library crates log through the `log` facade. [`init`] installs a
//! `tracing` subscriber that also captures those records.

pub mod logger;

pub use logger::LogFormat;
pub use logger::LogSettings;
pub use logger::init;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TelemetryError {
	#[error("Invalid log level: {0}")]
	InvalidLogLevel(String),
	#[error("Invalid log format: {0}, expected full or compact")]
	InvalidLogFormat(String),
	#[error("Logger already initialized")]
	AlreadyInitialized,
}
