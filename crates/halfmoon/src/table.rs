//! Registry of built commands.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;

use log::debug;
use log::warn;

use crate::builder::DEFAULT_DESCRIPTION;
use crate::command::AppCommandMeta;
use crate::command::Command;
use crate::context::AutocompleteRequest;
use crate::context::Context;
use crate::context::ResolvedOptions;
use crate::error::CommandError;
use crate::error::CommandResult;
use crate::schema::AppCommand;
use crate::schema::CommandChoice;
use crate::schema::CommandOption;
use crate::schema::CommandType;
use crate::schema::OptionType;
use crate::schema::Snowflake;

const MAX_SUB_COMMANDS: usize = 25;

/// Where a command is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
	Global,
	Guild(Snowflake),
}

impl From<Option<Snowflake>> for Scope {
	fn from(guild_id: Option<Snowflake>) -> Self {
		match guild_id {
			Some(id) => Scope::Guild(id),
			None => Scope::Global,
		}
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Scope::Global => f.write_str("global scope"),
			Scope::Guild(id) => write!(f, "guild {}", id),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CommandKey {
	scope: Scope,
	kind: CommandType,
	path: Vec<String>,
}

/// Holds every registered command and routes invocations to them.
#[derive(Debug, Default)]
pub struct CommandTable {
	default_guild: Option<Snowflake>,
	commands: Vec<Command>,
	index: HashMap<CommandKey, usize>,
}

impl CommandTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Commands registered without a guild are placed in `guild_id`
	/// instead of the global scope. Useful while developing.
	pub fn with_default_guild(guild_id: Option<Snowflake>) -> Self {
		Self {
			default_guild: guild_id,
			..Self::default()
		}
	}

	/// Adds a built command. Build errors are passed through so that a bot
	/// stops at startup on the first invalid definition.
	pub fn register(&mut self, command: CommandResult<Command>) -> CommandResult<()> {
		let mut command = command?;

		if let Some(default_guild) = self.default_guild {
			let meta = command.metadata_mut();
			match meta.group.as_mut() {
				Some(group) if group.guild_id.is_none() => {
					group.guild_id = Some(default_guild);
					if let Some(sub_group) = meta.sub_group.as_mut() {
						sub_group.parent.guild_id = Some(default_guild);
					}
				}
				None if meta.app.guild_id.is_none() => meta.app.guild_id = Some(default_guild),
				_ => {}
			}
		}

		let meta = command.metadata();
		let key = CommandKey {
			scope: meta.guild_id().into(),
			kind: meta.app.kind,
			path: meta.path(),
		};
		let display = key.path.join(" ");

		if self.index.contains_key(&key) {
			return Err(CommandError::DuplicateCommand {
				command: display,
				scope: key.scope.to_string(),
			});
		}
		if key.kind == CommandType::Slash && self.clashes_with_group(&key) {
			return Err(CommandError::GroupClash {
				command: display,
				scope: key.scope.to_string(),
			});
		}

		if meta.group.is_some() {
			self.check_group(&key, meta)?;
		}

		debug!("Registered {} command '{}' in {}", key.kind, display, key.scope);
		self.index.insert(key, self.commands.len());
		self.commands.push(command);
		Ok(())
	}

	/// A plain slash command may not share its name with a group, in
	/// either order of registration.
	fn clashes_with_group(&self, key: &CommandKey) -> bool {
		let root = &key.path[0];
		self.index.keys().any(|other| {
			other.scope == key.scope
				&& other.kind == CommandType::Slash
				&& other.path[0] == *root
				&& (other.path.len() > 1) != (key.path.len() > 1)
		})
	}

	/// Commands sharing a group must declare it identically, and a group or
	/// sub group holds at most 25 children.
	fn check_group(&self, key: &CommandKey, meta: &AppCommandMeta) -> CommandResult<()> {
		let root = &key.path[0];
		let siblings: Vec<&AppCommandMeta> = self
			.commands
			.iter()
			.map(Command::metadata)
			.filter(|other| {
				Scope::from(other.guild_id()) == key.scope
					&& other.group.is_some_and(|group| group.name == root.as_str())
			})
			.collect();

		for other in &siblings {
			let mismatch = match (other.sub_group, meta.sub_group) {
				(Some(a), Some(b)) if a.name == b.name => (a != b).then(|| format!("{} {}", root, a.name)),
				_ => (other.group != meta.group).then(|| root.clone()),
			};
			if let Some(group) = mismatch {
				return Err(CommandError::GroupMismatch {
					group,
					scope: key.scope.to_string(),
				});
			}
		}

		let child = |m: &AppCommandMeta| m.sub_group.map_or(m.app.name.clone(), |s| s.name.to_string());
		let children: HashSet<String> = siblings.iter().map(|other| child(*other)).collect();
		if !children.contains(&child(meta)) && children.len() >= MAX_SUB_COMMANDS {
			return Err(CommandError::TooManySubCommands {
				group: root.clone(),
				count: children.len() + 1,
			});
		}

		if let Some(sub_group) = meta.sub_group {
			let count = siblings
				.iter()
				.filter(|other| other.sub_group.is_some_and(|s| s.name == sub_group.name))
				.count();
			if count >= MAX_SUB_COMMANDS {
				return Err(CommandError::TooManySubCommands {
					group: format!("{} {}", root, sub_group.name),
					count: count + 1,
				});
			}
		}
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	pub fn commands(&self) -> impl Iterator<Item = &Command> {
		self.commands.iter()
	}

	fn find(&self, scope: Scope, kind: CommandType, path: &[String]) -> Option<&Command> {
		let key = CommandKey {
			scope,
			kind,
			path: path.to_vec(),
		};
		self.index.get(&key).map(|&i| &self.commands[i])
	}

	/// Guild commands shadow global commands of the same path.
	fn resolve(
		&self,
		guild_id: Option<Snowflake>,
		kind: CommandType,
		path: &[String],
	) -> Option<&Command> {
		guild_id
			.and_then(|id| self.find(Scope::Guild(id), kind, path))
			.or_else(|| self.find(Scope::Global, kind, path))
	}

	/// Payloads to send to the platform, one list per scope. Grouped
	/// commands are folded into their parent command.
	pub fn registration_payloads(&self) -> BTreeMap<Scope, Vec<AppCommand>> {
		let mut payloads: BTreeMap<Scope, Vec<AppCommand>> = BTreeMap::new();

		for command in &self.commands {
			let meta = command.metadata();
			let scope = Scope::from(meta.guild_id());
			let entries = payloads.entry(scope).or_default();

			let Some(group) = meta.group else {
				let mut app = meta.app.clone();
				app.guild_id = None;
				entries.push(app);
				continue;
			};

			let parent = match entries
				.iter_mut()
				.position(|c| c.kind == CommandType::Slash && c.name == group.name)
			{
				Some(i) => &mut entries[i],
				None => {
					let mut parent = AppCommand::new(CommandType::Slash, group.name);
					parent.description = Some(group.description.unwrap_or(DEFAULT_DESCRIPTION).to_string());
					parent.default_member_permissions = group.default_member_permissions;
					parent.nsfw = group.nsfw;
					entries.push(parent);
					let last = entries.len() - 1;
					&mut entries[last]
				}
			};

			let container = match meta.sub_group {
				Some(sub_group) => {
					let slot = match parent
						.options
						.iter()
						.position(|o| o.kind == OptionType::SubCommandGroup && o.name == sub_group.name)
					{
						Some(i) => i,
						None => {
							parent.options.push(CommandOption {
								options: Some(Vec::new()),
								..CommandOption::new(
									OptionType::SubCommandGroup,
									sub_group.name,
									sub_group.description.unwrap_or(DEFAULT_DESCRIPTION),
									false,
								)
							});
							parent.options.len() - 1
						}
					};
					parent.options[slot].options.get_or_insert_with(Vec::new)
				}
				None => &mut parent.options,
			};

			container.push(as_sub_command(meta));
		}

		payloads
	}

	/// Runs the command addressed by `ctx`.
	pub async fn dispatch(&self, ctx: Context, options: ResolvedOptions) -> CommandResult<()> {
		let Some(command) = self.resolve(ctx.guild_id, ctx.command_type, &ctx.command_path) else {
			warn!("No {} command registered for '{}'", ctx.command_type, ctx.command_name());
			return Err(CommandError::UnknownCommand(ctx.command_name()));
		};

		debug!(
			"Dispatching '{}' from user {} with {} options",
			ctx.command_name(),
			ctx.user.id,
			options.len()
		);
		command.invoke(ctx, options).await
	}

	/// Routes an autocomplete request to the handler of the focused option.
	pub async fn autocomplete(&self, request: AutocompleteRequest) -> CommandResult<Vec<CommandChoice>> {
		let command_name = request.command_path.join(" ");
		let command = self
			.resolve(request.guild_id, CommandType::Slash, &request.command_path)
			.ok_or_else(|| CommandError::UnknownCommand(command_name.clone()))?;

		let Some(handler) = command.metadata().autocomplete.get(&request.focused.name) else {
			return Err(CommandError::NoAutocomplete {
				command: command_name,
				option: request.focused.name,
			});
		};

		handler.payload().suggest(request).await
	}
}

fn as_sub_command(meta: &AppCommandMeta) -> CommandOption {
	let options = if meta.app.options.is_empty() {
		None
	} else {
		Some(meta.app.options.clone())
	};
	CommandOption {
		name_localizations: meta.app.name_localizations.clone(),
		description_localizations: meta.app.description_localizations.clone(),
		options,
		..CommandOption::new(
			OptionType::SubCommand,
			meta.app.name.clone(),
			meta.app.description.clone().unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
			false,
		)
	}
}
