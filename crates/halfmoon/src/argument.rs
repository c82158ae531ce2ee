//! Mapping from Rust parameter types to option types.

use crate::context::OptionValue;
use crate::context::Target;
use crate::model::Attachment;
use crate::model::Mentionable;
use crate::model::Message;
use crate::model::PartialChannel;
use crate::model::Role;
use crate::model::User;
use crate::schema::CommandType;
use crate::schema::OptionType;

/// A type usable as a slash command parameter.
#[diagnostic::on_unimplemented(
	message = "`{Self}` cannot be used as a command option",
	label = "unsupported option type",
	note = "supported types: String, integers, f32, f64, bool, User, Role, PartialChannel, Mentionable, Attachment and Option of those"
)]
pub trait CommandArgument: Sized {
	const OPTION_TYPE: OptionType;

	/// `true` when an absent value is acceptable.
	const OPTIONAL: bool = false;

	/// Converts a resolved value, or `None` when it has the wrong shape.
	fn from_value(value: &OptionValue) -> Option<Self>;

	/// Value used when the option was not supplied.
	fn when_missing() -> Option<Self> {
		None
	}
}

/// Types that accept `min_value` / `max_value`.
#[diagnostic::on_unimplemented(message = "`{Self}` is not numeric; min_value and max_value need an integer or float parameter")]
pub trait NumericArgument: CommandArgument {}

/// Types that accept `min_length` / `max_length`.
#[diagnostic::on_unimplemented(message = "`{Self}` is not text; min_length and max_length need a String parameter")]
pub trait TextArgument: CommandArgument {}

/// Types that accept `channel_types`.
#[diagnostic::on_unimplemented(message = "`{Self}` is not a channel; channel_types needs a PartialChannel parameter")]
pub trait ChannelArgument: CommandArgument {}

impl CommandArgument for String {
	const OPTION_TYPE: OptionType = OptionType::String;

	fn from_value(value: &OptionValue) -> Option<Self> {
		match value {
			OptionValue::String(s) => Some(s.clone()),
			_ => None,
		}
	}
}

impl TextArgument for String {}

macro_rules! integer_argument {
	($($ty:ty),+) => {
		$(
			impl CommandArgument for $ty {
				const OPTION_TYPE: OptionType = OptionType::Integer;

				fn from_value(value: &OptionValue) -> Option<Self> {
					match value {
						OptionValue::Integer(v) => <$ty>::try_from(*v).ok(),
						_ => None,
					}
				}
			}

			impl NumericArgument for $ty {}
		)+
	};
}

integer_argument!(i64, i32, i16, i8, u64, u32, u16, u8);

impl CommandArgument for f64 {
	const OPTION_TYPE: OptionType = OptionType::Number;

	fn from_value(value: &OptionValue) -> Option<Self> {
		match value {
			OptionValue::Number(v) => Some(*v),
			OptionValue::Integer(v) => Some(*v as f64),
			_ => None,
		}
	}
}

impl NumericArgument for f64 {}

impl CommandArgument for f32 {
	const OPTION_TYPE: OptionType = OptionType::Number;

	fn from_value(value: &OptionValue) -> Option<Self> {
		f64::from_value(value).map(|v| v as f32)
	}
}

impl NumericArgument for f32 {}

macro_rules! entity_argument {
	($($ty:ty => $kind:ident),+) => {
		$(
			impl CommandArgument for $ty {
				const OPTION_TYPE: OptionType = OptionType::$kind;

				fn from_value(value: &OptionValue) -> Option<Self> {
					match value {
						OptionValue::$kind(v) => Some(v.clone()),
						_ => None,
					}
				}
			}
		)+
	};
}

entity_argument!(
	bool => Boolean,
	User => User,
	Role => Role,
	PartialChannel => Channel,
	Attachment => Attachment
);

impl ChannelArgument for PartialChannel {}

impl CommandArgument for Mentionable {
	const OPTION_TYPE: OptionType = OptionType::Mentionable;

	fn from_value(value: &OptionValue) -> Option<Self> {
		match value {
			OptionValue::Mentionable(m) => Some(m.clone()),
			OptionValue::User(user) => Some(Mentionable::User(user.clone())),
			OptionValue::Role(role) => Some(Mentionable::Role(role.clone())),
			_ => None,
		}
	}
}

impl<T: CommandArgument> CommandArgument for Option<T> {
	const OPTION_TYPE: OptionType = T::OPTION_TYPE;
	const OPTIONAL: bool = true;

	fn from_value(value: &OptionValue) -> Option<Self> {
		T::from_value(value).map(Some)
	}

	fn when_missing() -> Option<Self> {
		Some(None)
	}
}

impl<T: NumericArgument> NumericArgument for Option<T> {}
impl<T: TextArgument> TextArgument for Option<T> {}
impl<T: ChannelArgument> ChannelArgument for Option<T> {}

/// The target parameter of a context-menu command.
#[diagnostic::on_unimplemented(
	message = "`{Self}` cannot be the target of a context menu command",
	note = "message commands take a Message, user commands take a User"
)]
pub trait CommandTarget: Sized {
	const COMMAND_TYPE: CommandType;

	fn from_target(target: &Target) -> Option<Self>;
}

impl CommandTarget for Message {
	const COMMAND_TYPE: CommandType = CommandType::Message;

	fn from_target(target: &Target) -> Option<Self> {
		match target {
			Target::Message(message) => Some(message.clone()),
			Target::User(_) => None,
		}
	}
}

impl CommandTarget for User {
	const COMMAND_TYPE: CommandType = CommandType::User;

	fn from_target(target: &Target) -> Option<Self> {
		match target {
			Target::User(user) => Some(user.clone()),
			Target::Message(_) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::schema::ChannelType;
	use crate::schema::Snowflake;

	#[test]
	fn test_option_wraps_inner_type() {
		assert_eq!(<Option<String>>::OPTION_TYPE, OptionType::String);
		assert!(<Option<String>>::OPTIONAL);
		assert!(!String::OPTIONAL);
		assert_eq!(<Option<f64>>::OPTION_TYPE, OptionType::Number);
		assert_eq!(<Option<Option<i64>>>::when_missing(), Some(None));
		assert_eq!(String::when_missing(), None);
	}

	#[rstest]
	#[case(OptionValue::Integer(300), None)]
	#[case(OptionValue::Integer(-1), None)]
	#[case(OptionValue::Integer(200), Some(200))]
	#[case(OptionValue::String("200".into()), None)]
	fn test_integer_conversion_is_checked(#[case] value: OptionValue, #[case] expected: Option<u8>) {
		assert_eq!(u8::from_value(&value), expected);
	}

	#[test]
	fn test_number_accepts_integer_values() {
		assert_eq!(f64::from_value(&OptionValue::Integer(3)), Some(3.0));
		assert_eq!(f32::from_value(&OptionValue::Number(0.5)), Some(0.5));
	}

	#[test]
	fn test_channel_and_mentionable_values() {
		let channel = PartialChannel {
			id: Snowflake(5),
			name: Some("general".into()),
			kind: ChannelType::GuildText,
		};
		assert_eq!(
			PartialChannel::from_value(&OptionValue::Channel(channel.clone())),
			Some(channel)
		);

		let role = Role {
			id: Snowflake(7),
			name: "mods".into(),
		};
		assert_eq!(
			Mentionable::from_value(&OptionValue::Role(role.clone())),
			Some(Mentionable::Role(role))
		);
	}

	#[test]
	fn test_targets_match_their_command_type() {
		let user = User::new(1, "alice");
		assert_eq!(User::COMMAND_TYPE, CommandType::User);
		assert_eq!(Message::COMMAND_TYPE, CommandType::Message);
		assert_eq!(User::from_target(&Target::User(user.clone())), Some(user.clone()));

		let message = Message {
			id: Snowflake(2),
			channel_id: Snowflake(3),
			author: user,
			content: "hi".into(),
		};
		assert_eq!(User::from_target(&Target::Message(message.clone())), None);
		assert_eq!(Message::from_target(&Target::Message(message.clone())), Some(message));
	}
}
