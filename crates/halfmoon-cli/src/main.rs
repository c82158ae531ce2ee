use std::collections::BTreeMap;

use halfmoon::AppCommand;
use halfmoon::CommandTable;
use halfmoon::Context;
use halfmoon::ResolvedOptions;
use halfmoon::Scope;
use halfmoon::Snowflake;
use halfmoon::User;
use log::error;
use log::info;
use serde::Serialize;

mod config;
mod demo;

use config::BOT_CONF;
use config::Cli;
use config::Parser;

/// Registration payload for one scope.
#[derive(Debug, Serialize)]
struct ScopePayload<'a> {
	guild_id: Option<Snowflake>,
	commands: &'a [AppCommand],
}

fn render(payloads: &BTreeMap<Scope, Vec<AppCommand>>, pretty: bool) -> serde_json::Result<String> {
	let scopes: Vec<ScopePayload<'_>> = payloads
		.iter()
		.map(|(scope, commands)| ScopePayload {
			guild_id: match scope {
				Scope::Global => None,
				Scope::Guild(id) => Some(*id),
			},
			commands,
		})
		.collect();

	if pretty {
		serde_json::to_string_pretty(&scopes)
	} else {
		serde_json::to_string(&scopes)
	}
}

async fn invoke(table: &CommandTable, path: &str) {
	let mut ctx = Context::slash(path.split_whitespace(), User::new(0, "halfmoon-cli"));
	ctx.guild_id = BOT_CONF.get().and_then(|config| config.default_guild);

	match table.dispatch(ctx, ResolvedOptions::new()).await {
		Ok(()) => info!("'{}' completed", path),
		Err(e) => error!("'{}' failed: {}", path, e),
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	let args = Cli::parse();
	let config = config::setup(&args)?;

	let mut table = CommandTable::with_default_guild(config.default_guild);
	for command in demo::all() {
		table.register(command)?;
	}
	info!("Loaded {} commands", table.len());

	if let Some(path) = &args.invoke {
		invoke(&table, path).await;
	}

	let payloads = table.registration_payloads();
	for (scope, commands) in &payloads {
		info!("{} commands for {}", commands.len(), scope);
	}

	let json = render(&payloads, config.pretty)?;
	match &config.output {
		Some(path) => {
			std::fs::write(path, json)?;
			info!("Payloads written to {}", path.display());
		}
		None => println!("{}", json),
	}
	Ok(())
}
