//! Assembles command definitions from parameter descriptions.
//!
//! The command macros emit calls into this module, one [`OptionBuilder`]
//! per parameter. It can equally be used by hand:
//!
//! ```
//! use halfmoon::builder::CommandBuilder;
//! use halfmoon::builder::OptionBuilder;
//! use halfmoon::MinValue;
//!
//! let meta = CommandBuilder::slash("roll")
//! 	.description("Roll a die")
//! 	.option(OptionBuilder::new::<Option<i64>>("sides").meta(MinValue::new(2)))
//! 	.build()
//! 	.unwrap();
//! assert_eq!(meta.app.options[0].min_value, Some(halfmoon::Bound::Integer(2)));
//! ```

use std::collections::HashSet;

use crate::args::ArgMeta;
use crate::args::Autocomplete;
use crate::argument::CommandArgument;
use crate::argument::CommandTarget;
use crate::command::AppCommandMeta;
use crate::command::Group;
use crate::command::SubGroup;
use crate::error::CommandError;
use crate::error::CommandResult;
use crate::locale::LocalizedText;
use crate::schema::AppCommand;
use crate::schema::Bound;
use crate::schema::ChoiceValue;
use crate::schema::CommandChoice;
use crate::schema::CommandOption;
use crate::schema::CommandType;
use crate::schema::OptionType;
use crate::schema::Permissions;
use crate::schema::Snowflake;

pub const DEFAULT_DESCRIPTION: &str = "No Description";

const MAX_NAME_LEN: usize = 32;
const MAX_DESCRIPTION_LEN: usize = 100;
const MAX_OPTIONS: usize = 25;
const MAX_CHOICES: usize = 25;
const MAX_TEXT_LEN: u16 = 6000;
const MAX_CHOICE_VALUE_LEN: usize = 100;

/// Describes one command parameter.
#[derive(Debug, Clone)]
pub struct OptionBuilder {
	param: String,
	kind: OptionType,
	optional_type: bool,
	has_default: bool,
	explicit_required: bool,
	metadata: Vec<ArgMeta>,
}

/// A built option plus its autocomplete handler, if any.
#[derive(Debug, Clone)]
pub struct BuiltOption {
	pub option: CommandOption,
	pub autocomplete: Option<Autocomplete>,
}

impl OptionBuilder {
	/// Starts an option for a parameter of type `T`.
	pub fn new<T: CommandArgument>(param: impl Into<String>) -> Self {
		Self {
			param: param.into(),
			kind: T::OPTION_TYPE,
			optional_type: T::OPTIONAL,
			has_default: false,
			explicit_required: false,
			metadata: Vec::new(),
		}
	}

	pub fn meta(mut self, meta: impl Into<ArgMeta>) -> Self {
		self.metadata.push(meta.into());
		self
	}

	/// The parameter has a default value, so the option is optional.
	pub fn with_default(mut self) -> Self {
		self.has_default = true;
		self
	}

	/// Forces the option to be required.
	pub fn required(mut self) -> Self {
		self.explicit_required = true;
		self
	}

	pub fn build(self) -> CommandResult<BuiltOption> {
		let param = self.param;
		let kind = self.kind;

		let mut seen = HashSet::new();
		for meta in &self.metadata {
			if !seen.insert(meta.kind()) {
				return Err(CommandError::DuplicateMetadata {
					option: param,
					kind: meta.kind(),
				});
			}
		}

		if self.explicit_required && (self.has_default || self.optional_type) {
			return Err(CommandError::ConflictingRequirement { option: param });
		}
		let required = self.explicit_required || !(self.has_default || self.optional_type);

		let mut option = CommandOption::new(kind, param.clone(), DEFAULT_DESCRIPTION, required);
		let mut autocomplete = None;

		for meta in self.metadata {
			let unsupported = |meta: &ArgMeta| CommandError::UnsupportedMetadata {
				option: param.clone(),
				kind: meta.kind(),
				option_type: kind,
			};

			match meta {
				ArgMeta::Name(name) => {
					option.name = name.payload().fallback().to_string();
					option.name_localizations = name.payload().localizations();
				}
				ArgMeta::Description(description) => {
					option.description = description.payload().fallback().to_string();
					option.description_localizations = description.payload().localizations();
				}
				ArgMeta::Choices(ref choices) => {
					if !kind.accepts_suggestions() {
						return Err(unsupported(&meta));
					}
					let choices = choices.payload();
					if choices.len() > MAX_CHOICES {
						return Err(CommandError::TooManyChoices {
							option: param,
							count: choices.len(),
						});
					}
					if let Some(bad) = choices.iter().find(|c| !c.value.fits(kind)) {
						return Err(CommandError::ChoiceTypeMismatch {
							option: param,
							choice: bad.name.clone(),
							option_type: kind,
						});
					}
					for choice in choices {
						validate_choice(&param, choice)?;
					}
					option.choices = Some(choices.to_vec());
				}
				ArgMeta::ChannelTypes(ref channel_types) => {
					if kind != OptionType::Channel {
						return Err(unsupported(&meta));
					}
					option.channel_types = Some(channel_types.payload().to_vec());
				}
				ArgMeta::MinValue(ref min) => {
					if !kind.is_numeric() {
						return Err(unsupported(&meta));
					}
					option.min_value = Some(normalize_bound(&param, kind, min.payload())?);
				}
				ArgMeta::MaxValue(ref max) => {
					if !kind.is_numeric() {
						return Err(unsupported(&meta));
					}
					option.max_value = Some(normalize_bound(&param, kind, max.payload())?);
				}
				ArgMeta::MinLength(ref min) => {
					if kind != OptionType::String {
						return Err(unsupported(&meta));
					}
					option.min_length = Some(check_length(&param, min.payload(), 0)?);
				}
				ArgMeta::MaxLength(ref max) => {
					if kind != OptionType::String {
						return Err(unsupported(&meta));
					}
					option.max_length = Some(check_length(&param, max.payload(), 1)?);
				}
				ArgMeta::Autocomplete(ref handler) => {
					if !kind.accepts_suggestions() {
						return Err(unsupported(&meta));
					}
					option.autocomplete = Some(true);
					autocomplete = Some(handler.clone());
				}
			}
		}

		if option.choices.is_some() && autocomplete.is_some() {
			return Err(CommandError::ChoicesWithAutocomplete { option: param });
		}
		if let (Some(min), Some(max)) = (option.min_value, option.max_value) {
			if min.as_f64() > max.as_f64() {
				return Err(CommandError::InvalidRange { option: param });
			}
		}
		if let (Some(min), Some(max)) = (option.min_length, option.max_length) {
			if min > max {
				return Err(CommandError::InvalidRange { option: param });
			}
		}

		validate_name(&option.name)?;
		validate_localized_maps(&option.name, &option)?;
		validate_description(&option.name, &option.description)?;

		Ok(BuiltOption {
			option,
			autocomplete,
		})
	}
}

// `i64::MAX as f64` rounds up to 2^63, so the upper end is exclusive.
const INTEGER_BOUNDS: std::ops::Range<f64> = i64::MIN as f64..i64::MAX as f64;

fn normalize_bound(option: &str, kind: OptionType, bound: Bound) -> CommandResult<Bound> {
	match (kind, bound) {
		(_, Bound::Number(v)) if !v.is_finite() => Err(CommandError::NonFiniteBound {
			option: option.to_string(),
		}),
		(OptionType::Integer, Bound::Number(v)) if v.fract() != 0.0 => {
			Err(CommandError::FractionalBound {
				option: option.to_string(),
				bound: v,
			})
		}
		(OptionType::Integer, Bound::Number(v)) if !INTEGER_BOUNDS.contains(&v) => {
			Err(CommandError::BoundOutOfRange {
				option: option.to_string(),
				bound: v,
			})
		}
		(OptionType::Integer, Bound::Number(v)) => Ok(Bound::Integer(v as i64)),
		_ => Ok(bound),
	}
}

fn validate_choice(option: &str, choice: &CommandChoice) -> CommandResult<()> {
	validate_description(&choice.name, &choice.name)?;
	if let Some(names) = &choice.name_localizations {
		if names.keys().any(|k| k.is_empty()) {
			return Err(CommandError::InvalidLocale {
				name: choice.name.clone(),
			});
		}
		for name in names.values() {
			validate_description(&choice.name, name)?;
		}
	}

	let valid = match &choice.value {
		ChoiceValue::Number(v) => v.is_finite(),
		ChoiceValue::String(v) => v.chars().count() <= MAX_CHOICE_VALUE_LEN,
		ChoiceValue::Integer(_) => true,
	};
	if valid {
		Ok(())
	} else {
		Err(CommandError::InvalidChoiceValue {
			option: option.to_string(),
			choice: choice.name.clone(),
		})
	}
}

fn check_length(option: &str, value: u16, min: u16) -> CommandResult<u16> {
	if value < min || value > MAX_TEXT_LEN {
		return Err(CommandError::LengthOutOfRange {
			option: option.to_string(),
			value,
		});
	}
	Ok(value)
}

/// Slash command and option names: 1-32 lowercase word characters or `-`.
fn validate_name(name: &str) -> CommandResult<()> {
	let len = name.chars().count();
	let valid = (1..=MAX_NAME_LEN).contains(&len)
		&& name
			.chars()
			.all(|c| c == '-' || c == '_' || c.is_alphanumeric())
		&& name.to_lowercase() == name;
	if valid {
		Ok(())
	} else {
		Err(CommandError::InvalidName(name.to_string()))
	}
}

/// Context menu names may hold spaces and capitals.
fn validate_menu_name(name: &str) -> CommandResult<()> {
	let len = name.chars().count();
	if (1..=MAX_NAME_LEN).contains(&len) && name.trim() == name {
		Ok(())
	} else {
		Err(CommandError::InvalidMenuName(name.to_string()))
	}
}

fn validate_description(owner: &str, description: &str) -> CommandResult<()> {
	let len = description.chars().count();
	if (1..=MAX_DESCRIPTION_LEN).contains(&len) {
		Ok(())
	} else {
		Err(CommandError::InvalidDescription {
			name: owner.to_string(),
		})
	}
}

fn validate_localized_maps(owner: &str, option: &CommandOption) -> CommandResult<()> {
	let maps = [&option.name_localizations, &option.description_localizations];
	for map in maps.into_iter().flatten() {
		if map.keys().any(|k| k.is_empty()) {
			return Err(CommandError::InvalidLocale {
				name: owner.to_string(),
			});
		}
	}
	if let Some(names) = &option.name_localizations {
		for name in names.values() {
			validate_name(name)?;
		}
	}
	if let Some(descriptions) = &option.description_localizations {
		for description in descriptions.values() {
			validate_description(owner, description)?;
		}
	}
	Ok(())
}

/// Describes a whole command.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
	kind: CommandType,
	name: LocalizedText,
	description: Option<LocalizedText>,
	guild_id: Option<Snowflake>,
	default_member_permissions: Option<Permissions>,
	nsfw: Option<bool>,
	group: Option<Group>,
	sub_group: Option<SubGroup>,
	target: Option<CommandType>,
	options: Vec<OptionBuilder>,
}

impl CommandBuilder {
	fn with_kind(kind: CommandType, name: impl Into<LocalizedText>) -> Self {
		Self {
			kind,
			name: name.into(),
			description: None,
			guild_id: None,
			default_member_permissions: None,
			nsfw: None,
			group: None,
			sub_group: None,
			target: None,
			options: Vec::new(),
		}
	}

	pub fn slash(name: impl Into<LocalizedText>) -> Self {
		Self::with_kind(CommandType::Slash, name)
	}

	pub fn message(name: impl Into<LocalizedText>) -> Self {
		Self::with_kind(CommandType::Message, name)
	}

	pub fn user(name: impl Into<LocalizedText>) -> Self {
		Self::with_kind(CommandType::User, name)
	}

	/// Records the type of the context-menu target parameter so that a
	/// `User` parameter on a message command is rejected.
	pub fn target<T: CommandTarget>(mut self) -> Self {
		self.target = Some(T::COMMAND_TYPE);
		self
	}

	pub fn description(mut self, description: impl Into<LocalizedText>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn guild(mut self, guild_id: impl Into<Snowflake>) -> Self {
		self.guild_id = Some(guild_id.into());
		self
	}

	pub fn default_member_permissions(mut self, permissions: Permissions) -> Self {
		self.default_member_permissions = Some(permissions);
		self
	}

	pub fn nsfw(mut self, nsfw: bool) -> Self {
		self.nsfw = Some(nsfw);
		self
	}

	pub fn group(mut self, group: Group) -> Self {
		self.group = Some(group);
		self
	}

	/// Places the command in a sub group, and so in the sub group's parent.
	pub fn sub_group(mut self, sub_group: SubGroup) -> Self {
		self.group = Some(sub_group.parent);
		self.sub_group = Some(sub_group);
		self
	}

	pub fn option(mut self, option: OptionBuilder) -> Self {
		self.options.push(option);
		self
	}

	pub fn build(self) -> CommandResult<AppCommandMeta> {
		match self.kind {
			CommandType::Slash => self.build_slash(),
			CommandType::Message | CommandType::User => self.build_context_menu(),
		}
	}

	fn build_slash(self) -> CommandResult<AppCommandMeta> {
		let name = self.name.fallback().to_string();
		for variant in self.name.variants() {
			validate_name(variant)?;
		}
		if self.name.has_empty_locale() {
			return Err(CommandError::InvalidLocale { name });
		}

		let description = self
			.description
			.unwrap_or_else(|| LocalizedText::from(DEFAULT_DESCRIPTION));
		for variant in description.variants() {
			validate_description(&name, variant)?;
		}
		if description.has_empty_locale() {
			return Err(CommandError::InvalidLocale { name });
		}

		if let Some(group) = self.group {
			validate_name(group.name)?;
			if let Some(description) = group.description {
				validate_description(group.name, description)?;
			}

			// Scope and access belong to the parent command.
			let setting = if self.guild_id.is_some() {
				Some("the guild")
			} else if self.default_member_permissions.is_some() {
				Some("default member permissions")
			} else if self.nsfw.is_some() {
				Some("nsfw")
			} else {
				None
			};
			if let Some(setting) = setting {
				return Err(CommandError::GroupedCommandSetting { command: name, setting });
			}
		}
		if let Some(sub_group) = self.sub_group {
			validate_name(sub_group.name)?;
			if let Some(description) = sub_group.description {
				validate_description(sub_group.name, description)?;
			}
		}

		if self.options.len() > MAX_OPTIONS {
			return Err(CommandError::TooManyOptions {
				command: name,
				count: self.options.len(),
			});
		}

		let mut app = AppCommand::new(CommandType::Slash, name.clone());
		app.name_localizations = self.name.localizations();
		app.description = Some(description.fallback().to_string());
		app.description_localizations = description.localizations();
		app.guild_id = self.guild_id;
		app.default_member_permissions = self.default_member_permissions;
		app.nsfw = self.nsfw;

		let mut meta = AppCommandMeta::new(app);
		meta.group = self.group;
		meta.sub_group = self.sub_group;

		let mut seen_optional = false;
		for option in self.options {
			let BuiltOption {
				option,
				autocomplete,
			} = option.build()?;

			if meta.app.options.iter().any(|o| o.name == option.name) {
				return Err(CommandError::DuplicateOption {
					command: name,
					option: option.name,
				});
			}
			if option.required && seen_optional {
				return Err(CommandError::RequiredAfterOptional {
					command: name,
					option: option.name,
				});
			}
			seen_optional |= !option.required;

			if let Some(handler) = autocomplete {
				meta.autocomplete.insert(option.name.clone(), handler);
			}
			meta.app.options.push(option);
		}

		Ok(meta)
	}

	fn build_context_menu(self) -> CommandResult<AppCommandMeta> {
		let command = self.name.fallback().to_string();
		let invalid = |reason| CommandError::InvalidContextMenu {
			command: command.clone(),
			reason,
		};

		for variant in self.name.variants() {
			validate_menu_name(variant)?;
		}
		if self.name.has_empty_locale() {
			return Err(CommandError::InvalidLocale { name: command });
		}
		if self.description.is_some() {
			return Err(invalid("a description"));
		}
		if !self.options.is_empty() {
			return Err(invalid("options"));
		}
		if self.group.is_some() {
			return Err(invalid("a group"));
		}
		if self.target.is_some_and(|target| target != self.kind) {
			return Err(invalid("a target of another command type"));
		}

		let mut app = AppCommand::new(self.kind, command.clone());
		app.name_localizations = self.name.localizations();
		app.guild_id = self.guild_id;
		app.default_member_permissions = self.default_member_permissions;
		app.nsfw = self.nsfw;
		Ok(AppCommandMeta::new(app))
	}
}
