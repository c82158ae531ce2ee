//! Built commands: registration metadata plus the callback behind it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::args::Autocomplete;
use crate::context::Context;
use crate::context::ResolvedOptions;
use crate::error::CommandError;
use crate::error::CommandResult;
use crate::schema::AppCommand;
use crate::schema::Permissions;
use crate::schema::Snowflake;

/// Parent of grouped slash commands: `/group command` or
/// `/group sub_group command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group {
	pub name: &'static str,
	pub description: Option<&'static str>,
	pub guild_id: Option<Snowflake>,
	pub default_member_permissions: Option<Permissions>,
	pub nsfw: Option<bool>,
}

impl Group {
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			description: None,
			guild_id: None,
			default_member_permissions: None,
			nsfw: None,
		}
	}

	pub const fn description(mut self, description: &'static str) -> Self {
		self.description = Some(description);
		self
	}

	pub const fn guild(mut self, guild_id: u64) -> Self {
		self.guild_id = Some(Snowflake(guild_id));
		self
	}

	pub const fn default_member_permissions(mut self, permissions: Permissions) -> Self {
		self.default_member_permissions = Some(permissions);
		self
	}

	pub const fn nsfw(mut self, nsfw: bool) -> Self {
		self.nsfw = Some(nsfw);
		self
	}

	pub const fn sub_group(self, name: &'static str) -> SubGroup {
		SubGroup {
			name,
			description: None,
			parent: self,
		}
	}
}

/// Second level of nesting under a [`Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubGroup {
	pub name: &'static str,
	pub description: Option<&'static str>,
	pub parent: Group,
}

impl SubGroup {
	pub const fn description(mut self, description: &'static str) -> Self {
		self.description = Some(description);
		self
	}
}

/// Everything needed to register a command.
#[derive(Debug, Clone, PartialEq)]
pub struct AppCommandMeta {
	pub app: AppCommand,
	pub group: Option<Group>,
	pub sub_group: Option<SubGroup>,
	/// Autocomplete handlers keyed by option name.
	pub autocomplete: BTreeMap<String, Autocomplete>,
}

impl AppCommandMeta {
	pub fn new(app: AppCommand) -> Self {
		Self {
			app,
			group: None,
			sub_group: None,
			autocomplete: BTreeMap::new(),
		}
	}

	/// Route used to invoke the command.
	pub fn path(&self) -> Vec<String> {
		let mut path = Vec::with_capacity(3);
		if let Some(group) = self.group {
			path.push(group.name.to_string());
		}
		if let Some(sub_group) = self.sub_group {
			path.push(sub_group.name.to_string());
		}
		path.push(self.app.name.clone());
		path
	}

	/// Scope the command registers in. A grouped command follows its group.
	pub fn guild_id(&self) -> Option<Snowflake> {
		match self.group {
			Some(group) => group.guild_id,
			None => self.app.guild_id,
		}
	}
}

pub type CommandCallback =
	Arc<dyn Fn(Context, ResolvedOptions) -> BoxFuture<'static, CommandResult<()>> + Send + Sync>;

/// What a command callback may return.
pub trait CommandOutput {
	fn into_result(self) -> CommandResult<()>;
}

impl CommandOutput for () {
	fn into_result(self) -> CommandResult<()> {
		Ok(())
	}
}

impl<E: fmt::Display> CommandOutput for Result<(), E> {
	fn into_result(self) -> CommandResult<()> {
		self.map_err(|e| CommandError::Callback(e.to_string()))
	}
}

/// A command ready to register and invoke.
#[derive(Clone)]
pub struct Command {
	meta: AppCommandMeta,
	callback: CommandCallback,
}

impl Command {
	pub fn new(meta: AppCommandMeta, callback: CommandCallback) -> Self {
		Self { meta, callback }
	}

	pub fn metadata(&self) -> &AppCommandMeta {
		&self.meta
	}

	pub(crate) fn metadata_mut(&mut self) -> &mut AppCommandMeta {
		&mut self.meta
	}

	pub fn invoke(&self, ctx: Context, options: ResolvedOptions) -> BoxFuture<'static, CommandResult<()>> {
		(self.callback)(ctx, options)
	}
}

impl fmt::Debug for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Command")
			.field("meta", &self.meta)
			.finish_non_exhaustive()
	}
}
