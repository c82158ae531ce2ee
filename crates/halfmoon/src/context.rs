//! Invocation data handed to callbacks and autocomplete handlers.

use crate::model::Attachment;
use crate::model::Mentionable;
use crate::model::Message;
use crate::model::PartialChannel;
use crate::model::Role;
use crate::model::User;
use crate::schema::CommandType;
use crate::schema::OptionType;
use crate::schema::Snowflake;

/// A resolved option value as delivered by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
	String(String),
	Integer(i64),
	Number(f64),
	Boolean(bool),
	User(User),
	Channel(PartialChannel),
	Role(Role),
	Mentionable(Mentionable),
	Attachment(Attachment),
}

impl OptionValue {
	pub fn option_type(&self) -> OptionType {
		match self {
			OptionValue::String(_) => OptionType::String,
			OptionValue::Integer(_) => OptionType::Integer,
			OptionValue::Number(_) => OptionType::Number,
			OptionValue::Boolean(_) => OptionType::Boolean,
			OptionValue::User(_) => OptionType::User,
			OptionValue::Channel(_) => OptionType::Channel,
			OptionValue::Role(_) => OptionType::Role,
			OptionValue::Mentionable(_) => OptionType::Mentionable,
			OptionValue::Attachment(_) => OptionType::Attachment,
		}
	}
}

/// Option values of one invocation, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
	values: Vec<(String, OptionValue)>,
}

impl ResolvedOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, name: impl Into<String>, value: OptionValue) -> Self {
		self.insert(name, value);
		self
	}

	/// Later values replace earlier ones with the same name.
	pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
		let name = name.into();
		match self.values.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = value,
			None => self.values.push((name, value)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&OptionValue> {
		self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
		self.values.iter().map(|(n, v)| (n.as_str(), v))
	}
}

/// Target of a context-menu invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
	User(User),
	Message(Message),
}

/// Invocation context, always the first parameter of a command callback.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
	pub command_type: CommandType,
	/// Full route of the invoked command, e.g. `["settings", "colour", "set"]`.
	pub command_path: Vec<String>,
	pub user: User,
	pub guild_id: Option<Snowflake>,
	pub channel_id: Option<Snowflake>,
	pub target: Option<Target>,
}

impl Context {
	pub fn slash<I, S>(path: I, user: User) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			command_type: CommandType::Slash,
			command_path: path.into_iter().map(Into::into).collect(),
			user,
			guild_id: None,
			channel_id: None,
			target: None,
		}
	}

	pub fn context_menu(name: impl Into<String>, user: User, target: Target) -> Self {
		let command_type = match target {
			Target::User(_) => CommandType::User,
			Target::Message(_) => CommandType::Message,
		};
		Self {
			command_type,
			command_path: vec![name.into()],
			user,
			guild_id: None,
			channel_id: None,
			target: Some(target),
		}
	}

	pub fn in_guild(mut self, guild_id: impl Into<Snowflake>) -> Self {
		self.guild_id = Some(guild_id.into());
		self
	}

	pub fn in_channel(mut self, channel_id: impl Into<Snowflake>) -> Self {
		self.channel_id = Some(channel_id.into());
		self
	}

	pub fn command_name(&self) -> String {
		self.command_path.join(" ")
	}
}

/// The option the user is currently typing into.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedOption {
	pub name: String,
	pub kind: OptionType,
	/// Partial input, always sent as text.
	pub value: String,
}

/// Request for suggestions while the user types.
#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteRequest {
	pub command_path: Vec<String>,
	pub guild_id: Option<Snowflake>,
	pub user: User,
	pub focused: FocusedOption,
	/// Values of the other options filled in so far.
	pub options: ResolvedOptions,
}
