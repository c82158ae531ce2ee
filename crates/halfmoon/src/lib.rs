//! # halfmoon
//!
//! Declarative application commands (slash, message and user commands) for
//! chat bots.
//!
//! A command is an `async fn` whose first parameter is the invocation
//! [`Context`]. The [`command`], [`message_command`] and [`user_command`]
//! attribute macros read the signature and generate a function of the same
//! name returning the built [`Command`]. Parameter types pick the option
//! type, `Option<T>` or a `default` make an option optional, and
//! `#[arg(...)]` attaches [argument metadata](args).
//!
//! ```
//! use halfmoon::ChannelType;
//! use halfmoon::Context;
//! use halfmoon::PartialChannel;
//! use halfmoon::command;
//!
//! /// Announce something
//! #[command(guild = 12345678)]
//! async fn announce(
//! 	ctx: Context,
//! 	#[arg(description = "What to say", max_length = 200)] text: String,
//! 	#[arg(channel_types = [ChannelType::GuildAnnouncement])] channel: Option<PartialChannel>,
//! ) {
//! 	let _ = (ctx, text, channel);
//! }
//!
//! let command = announce().unwrap();
//! let app = &command.metadata().app;
//! assert_eq!(app.description.as_deref(), Some("Announce something"));
//! assert_eq!(app.options[0].max_length, Some(200));
//! assert!(!app.options[1].required);
//! ```

pub mod args;
pub mod builder;
pub mod schema;

mod argument;
mod autocomplete;
mod command;
mod context;
mod error;
mod locale;
mod model;
mod table;

pub use args::ArgKind;
pub use args::ArgMeta;
pub use args::Autocomplete;
pub use args::ChannelTypes;
pub use args::Choices;
pub use args::Description;
pub use args::MaxLength;
pub use args::MaxValue;
pub use args::MinLength;
pub use args::MinValue;
pub use args::Name;
pub use argument::ChannelArgument;
pub use argument::CommandArgument;
pub use argument::CommandTarget;
pub use argument::NumericArgument;
pub use argument::TextArgument;
pub use autocomplete::AutocompleteHandler;
pub use command::AppCommandMeta;
pub use command::Command;
pub use command::CommandCallback;
pub use command::CommandOutput;
pub use command::Group;
pub use command::SubGroup;
pub use context::AutocompleteRequest;
pub use context::Context;
pub use context::FocusedOption;
pub use context::OptionValue;
pub use context::ResolvedOptions;
pub use context::Target;
pub use error::CommandError;
pub use error::CommandResult;
pub use locale::LocaleBuilder;
pub use locale::LocalizedText;
pub use macros::command;
pub use macros::message_command;
pub use macros::user_command;
pub use model::Attachment;
pub use model::Mentionable;
pub use model::Message;
pub use model::PartialChannel;
pub use model::Role;
pub use model::User;
pub use schema::AppCommand;
pub use schema::Bound;
pub use schema::ChannelType;
pub use schema::ChoiceValue;
pub use schema::CommandChoice;
pub use schema::CommandOption;
pub use schema::CommandType;
pub use schema::OptionType;
pub use schema::Permissions;
pub use schema::Snowflake;
pub use table::CommandTable;
pub use table::Scope;

/// Support code for the command macros. Not part of the public API.
#[doc(hidden)]
pub mod __private {
	pub use futures::future::BoxFuture;

	use crate::AppCommandMeta;
	use crate::ChannelArgument;
	use crate::CommandArgument;
	use crate::CommandError;
	use crate::CommandResult;
	use crate::CommandTarget;
	use crate::Context;
	use crate::NumericArgument;
	use crate::ResolvedOptions;
	use crate::TextArgument;

	pub fn assert_numeric<T: NumericArgument>() {}

	pub fn assert_text<T: TextArgument>() {}

	pub fn assert_channel<T: ChannelArgument>() {}

	/// Wire names of the built options, in parameter order.
	pub fn option_names(meta: &AppCommandMeta) -> Vec<String> {
		meta.app.options.iter().map(|o| o.name.clone()).collect()
	}

	fn option_name(names: &[String], index: usize) -> CommandResult<&str> {
		names
			.get(index)
			.map(String::as_str)
			.ok_or_else(|| CommandError::MissingOption(format!("#{}", index)))
	}

	pub fn extract<T: CommandArgument>(
		options: &ResolvedOptions,
		names: &[String],
		index: usize,
	) -> CommandResult<T> {
		let name = option_name(names, index)?;
		match options.get(name) {
			Some(value) => T::from_value(value).ok_or_else(|| CommandError::OptionTypeMismatch {
				option: name.to_string(),
				expected: T::OPTION_TYPE,
			}),
			None => T::when_missing().ok_or_else(|| CommandError::MissingOption(name.to_string())),
		}
	}

	pub fn extract_or_else<T: CommandArgument>(
		options: &ResolvedOptions,
		names: &[String],
		index: usize,
		default: impl FnOnce() -> T,
	) -> CommandResult<T> {
		let name = option_name(names, index)?;
		match options.get(name) {
			Some(value) => T::from_value(value).ok_or_else(|| CommandError::OptionTypeMismatch {
				option: name.to_string(),
				expected: T::OPTION_TYPE,
			}),
			None => Ok(default()),
		}
	}

	pub fn extract_target<T: CommandTarget>(ctx: &Context) -> CommandResult<T> {
		ctx.target
			.as_ref()
			.and_then(T::from_target)
			.ok_or(CommandError::MissingTarget(T::COMMAND_TYPE))
	}
}
