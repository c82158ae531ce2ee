//! Settings of the `halfmoon` binary.
//!
//! Values come from an optional TOML, JSON or YAML file and are overridden
//! by command line flags. The result is stored in [`BOT_CONF`].

use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

pub use clap::Parser;
use halfmoon::Snowflake;
use serde::Deserialize;
use serde::Serialize;
use telemetry::LogFormat;
use telemetry::LogSettings;
use telemetry::TelemetryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read configuration file '{path}': {source}")]
	Io {
		source: std::io::Error,
		path: String,
	},

	#[error("Failed to parse TOML configuration: {0}")]
	TomlParse(#[from] toml::de::Error),

	#[error("Failed to parse JSON configuration: {0}")]
	JsonParse(#[from] serde_json::Error),

	#[error("Failed to parse YAML configuration: {0}")]
	YamlParse(#[from] serde_yaml::Error),

	#[error("Unsupported configuration format: {0}")]
	UnsupportedFormat(String),

	#[error("Configuration file has no extension")]
	NoExtension,

	#[error(transparent)]
	Telemetry(#[from] TelemetryError),
}

/// Builds the demo command set and prints its registration payloads.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	/// Configuration file path (TOML, JSON, or YAML).
	/// Defaults to conf/halfmoon.toml if it exists.
	#[arg(short, long)]
	pub config: Option<String>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long)]
	pub log_level: Option<String>,

	/// Log format (full, compact)
	#[arg(long)]
	pub log_format: Option<String>,

	/// Register commands without a guild in this guild instead of globally
	#[arg(short, long)]
	pub guild: Option<u64>,

	/// Write the payloads to a file instead of stdout
	#[arg(short, long)]
	pub output: Option<PathBuf>,

	/// Pretty-print the JSON output
	#[arg(long)]
	pub pretty: bool,

	/// Dispatch the command at this path, e.g. "settings theme show"
	#[arg(long)]
	pub invoke: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
	pub log_level: String,
	pub log_format: String,
	pub default_guild: Option<Snowflake>,
	pub output: Option<PathBuf>,
	pub pretty: bool,
}

impl Default for BotConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			log_format: LogFormat::default().to_string(),
			default_guild: None,
			output: None,
			pretty: false,
		}
	}
}

impl BotConfig {
	pub fn log_settings(&self) -> Result<LogSettings, TelemetryError> {
		Ok(LogSettings {
			level: self.log_level.clone(),
			format: self.log_format.parse()?,
		})
	}

	/// Applies the flags that were given explicitly.
	fn apply(&mut self, args: &Cli) {
		if let Some(log_level) = &args.log_level {
			self.log_level = log_level.clone();
		}
		if let Some(log_format) = &args.log_format {
			self.log_format = log_format.clone();
		}
		if let Some(guild) = args.guild {
			self.default_guild = Some(Snowflake(guild));
		}
		if let Some(output) = &args.output {
			self.output = Some(output.clone());
		}
		if args.pretty {
			self.pretty = true;
		}
	}
}

pub static BOT_CONF: OnceLock<BotConfig> = OnceLock::new();

/// Resolves the configuration, starts logging and publishes the result.
pub fn setup(args: &Cli) -> Result<&'static BotConfig, ConfigError> {
	let config = resolve(args)?;
	telemetry::init(&config.log_settings()?)?;
	Ok(BOT_CONF.get_or_init(|| config))
}

fn resolve(args: &Cli) -> Result<BotConfig, ConfigError> {
	let default_config = "conf/halfmoon.toml";
	let mut config = match args.config.as_deref() {
		Some(p) => load_from_file(p)?,
		None if Path::new(default_config).exists() => load_from_file(default_config)?,
		None => BotConfig::default(),
	};
	config.apply(args);
	Ok(config)
}

fn load_from_file<P: AsRef<Path>>(path: P) -> Result<BotConfig, ConfigError> {
	let path_ref = path.as_ref();
	let content = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
		path: path_ref.display().to_string(),
		source,
	})?;

	let extension = path_ref
		.extension()
		.and_then(|ext| ext.to_str())
		.ok_or(ConfigError::NoExtension)?;

	match extension.to_lowercase().as_str() {
		"toml" => Ok(toml::from_str(&content)?),
		"json" => Ok(serde_json::from_str(&content)?),
		"yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
		_ => Err(ConfigError::UnsupportedFormat(extension.to_string())),
	}
}
