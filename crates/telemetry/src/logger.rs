use std::fmt as std_fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TelemetryError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Timestamps as "[YYYY-MM-DD HH:MM:SS.micros]" in local time.
struct LocalTime;

impl FormatTime for LocalTime {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std_fmt::Result {
		let now: chrono::DateTime<chrono::Local> = chrono::Local::now();
		write!(w, "{}", now.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	/// One line per event with target and thread id.
	#[default]
	Full,
	/// Shorter lines, no thread id.
	Compact,
}

impl FromStr for LogFormat {
	type Err = TelemetryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"full" => Ok(LogFormat::Full),
			"compact" => Ok(LogFormat::Compact),
			_ => Err(TelemetryError::InvalidLogFormat(s.to_string())),
		}
	}
}

impl std_fmt::Display for LogFormat {
	fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
		match self {
			LogFormat::Full => f.write_str("full"),
			LogFormat::Compact => f.write_str("compact"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
	pub level: String,
	pub format: LogFormat,
}

impl Default for LogSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::default(),
		}
	}
}

fn normalize_level(level: &str) -> Result<String, TelemetryError> {
	let level_lower = level.trim().to_lowercase();
	if VALID_LEVELS.contains(&level_lower.as_str()) {
		Ok(level_lower)
	} else {
		Err(TelemetryError::InvalidLogLevel(level.to_string()))
	}
}

/// Installs the global subscriber. Events go to stderr so that stdout stays
/// free for command output.
///
/// `log` records emitted by the library crates are forwarded as well.
///
/// ```no_run
/// telemetry::init(&telemetry::LogSettings::default())?;
/// log::info!("Commands loaded");
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
pub fn init(settings: &LogSettings) -> Result<(), TelemetryError> {
	let level = normalize_level(&settings.level)?;

	let full = (settings.format == LogFormat::Full).then(|| {
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_timer(LocalTime)
			.with_target(true)
			.with_thread_ids(true)
			.with_line_number(false)
			.with_file(false)
	});
	let compact = (settings.format == LogFormat::Compact).then(|| {
		fmt::layer()
			.compact()
			.with_writer(std::io::stderr)
			.with_timer(LocalTime)
			.with_target(false)
	});

	tracing_subscriber::registry()
		.with(EnvFilter::new(&level))
		.with(full)
		.with(compact)
		.try_init()
		.map_err(|_| TelemetryError::AlreadyInitialized)?;

	tracing::debug!(format = %settings.format, "Logger initialized at level {}", level);
	Ok(())
}
