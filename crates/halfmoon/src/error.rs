//! Error types for building, registering and dispatching commands.

use thiserror::Error;

use crate::args::ArgKind;
use crate::schema::CommandType;
use crate::schema::OptionType;

pub type CommandResult<T> = Result<T, CommandError>;

/// Every failure the crate reports.
///
/// Build errors are returned when a command is first constructed, which is
/// the moment a bot registers its commands. Dispatch errors only occur while
/// routing an invocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
	#[error("Invalid name '{0}': expected 1-32 lowercase letters, digits, '-' or '_'")]
	InvalidName(String),

	#[error("Invalid context menu name '{0}': expected 1-32 characters")]
	InvalidMenuName(String),

	#[error("Invalid description for '{name}': expected 1-100 characters")]
	InvalidDescription { name: String },

	#[error("Empty locale key in localizations of '{name}'")]
	InvalidLocale { name: String },

	#[error("Metadata '{kind}' is attached to option '{option}' more than once")]
	DuplicateMetadata { option: String, kind: ArgKind },

	#[error("Metadata '{kind}' does not apply to option '{option}' of type {option_type}")]
	UnsupportedMetadata {
		option: String,
		kind: ArgKind,
		option_type: OptionType,
	},

	#[error("Option '{option}' is optional (default value or Option type) and also marked required")]
	ConflictingRequirement { option: String },

	#[error("Option '{option}' cannot have both choices and autocomplete")]
	ChoicesWithAutocomplete { option: String },

	#[error("Option '{option}' has a minimum greater than its maximum")]
	InvalidRange { option: String },

	#[error("Option '{option}' is an integer but bound {bound} is fractional")]
	FractionalBound { option: String, bound: f64 },

	#[error("Option '{option}' has a bound that is not a finite number")]
	NonFiniteBound { option: String },

	#[error("Bound {bound} on integer option '{option}' does not fit in 64 bits")]
	BoundOutOfRange { option: String, bound: f64 },

	#[error("Length bound {value} on option '{option}' is outside 0..=6000")]
	LengthOutOfRange { option: String, value: u16 },

	#[error("Choice '{choice}' on option '{option}' does not match option type {option_type}")]
	ChoiceTypeMismatch {
		option: String,
		choice: String,
		option_type: OptionType,
	},

	#[error("Value of choice '{choice}' on option '{option}' must be finite and at most 100 characters")]
	InvalidChoiceValue { option: String, choice: String },

	#[error("Option '{option}' has {count} choices, at most 25 are allowed")]
	TooManyChoices { option: String, count: usize },

	#[error("Command '{command}' has {count} options, at most 25 are allowed")]
	TooManyOptions { command: String, count: usize },

	#[error("Command '{command}' declares option '{option}' more than once")]
	DuplicateOption { command: String, option: String },

	#[error("Required option '{option}' of command '{command}' follows an optional option")]
	RequiredAfterOptional { command: String, option: String },

	#[error("Context menu command '{command}' cannot have {reason}")]
	InvalidContextMenu {
		command: String,
		reason: &'static str,
	},

	#[error("Command '{command}' is in a group, set {setting} on the group instead")]
	GroupedCommandSetting {
		command: String,
		setting: &'static str,
	},

	#[error("Command '{command}' is already registered in {scope}")]
	DuplicateCommand { command: String, scope: String },

	#[error("Command '{command}' clashes with a command group of the same name in {scope}")]
	GroupClash { command: String, scope: String },

	#[error("Group '{group}' is declared with different settings in {scope}")]
	GroupMismatch { group: String, scope: String },

	#[error("Group '{group}' has {count} children, at most 25 are allowed")]
	TooManySubCommands { group: String, count: usize },

	#[error("Unknown command '{0}'")]
	UnknownCommand(String),

	#[error("Missing value for required option '{0}'")]
	MissingOption(String),

	#[error("Value for option '{option}' is not of type {expected}")]
	OptionTypeMismatch {
		option: String,
		expected: OptionType,
	},

	#[error("Invocation carries no {0} target")]
	MissingTarget(CommandType),

	#[error("Option '{option}' of command '{command}' has no autocomplete handler")]
	NoAutocomplete { command: String, option: String },

	#[error("Unknown {kind} code {code}")]
	UnknownCode { kind: &'static str, code: u8 },

	#[error("Command callback failed: {0}")]
	Callback(String),
}
