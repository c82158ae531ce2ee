use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::error::CommandError;

/// Declares an enum that travels as its integer code.
macro_rules! wire_enum {
	(
		$(#[$attr:meta])*
		$name:ident as $label:literal {
			$($variant:ident = $code:literal => $display:literal,)+
		}
	) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(into = "u8", try_from = "u8")]
		pub enum $name {
			$($variant = $code,)+
		}

		impl From<$name> for u8 {
			fn from(value: $name) -> u8 {
				value as u8
			}
		}

		impl TryFrom<u8> for $name {
			type Error = CommandError;

			fn try_from(code: u8) -> Result<Self, Self::Error> {
				match code {
					$($code => Ok($name::$variant),)+
					_ => Err(CommandError::UnknownCode { kind: $label, code }),
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				let name = match self {
					$($name::$variant => $display,)+
				};
				f.write_str(name)
			}
		}
	};
}

wire_enum! {
	/// Kind of application command.
	CommandType as "command type" {
		Slash = 1 => "SLASH",
		User = 2 => "USER",
		Message = 3 => "MESSAGE",
	}
}

wire_enum! {
	/// Wire type of a command option.
	OptionType as "option type" {
		SubCommand = 1 => "SUB_COMMAND",
		SubCommandGroup = 2 => "SUB_COMMAND_GROUP",
		String = 3 => "STRING",
		Integer = 4 => "INTEGER",
		Boolean = 5 => "BOOLEAN",
		User = 6 => "USER",
		Channel = 7 => "CHANNEL",
		Role = 8 => "ROLE",
		Mentionable = 9 => "MENTIONABLE",
		Number = 10 => "NUMBER",
		Attachment = 11 => "ATTACHMENT",
	}
}

wire_enum! {
	/// Channel kinds an option of type `CHANNEL` may be restricted to.
	ChannelType as "channel type" {
		GuildText = 0 => "GUILD_TEXT",
		Dm = 1 => "DM",
		GuildVoice = 2 => "GUILD_VOICE",
		GroupDm = 3 => "GROUP_DM",
		GuildCategory = 4 => "GUILD_CATEGORY",
		GuildAnnouncement = 5 => "GUILD_ANNOUNCEMENT",
		AnnouncementThread = 10 => "ANNOUNCEMENT_THREAD",
		PublicThread = 11 => "PUBLIC_THREAD",
		PrivateThread = 12 => "PRIVATE_THREAD",
		GuildStageVoice = 13 => "GUILD_STAGE_VOICE",
		GuildDirectory = 14 => "GUILD_DIRECTORY",
		GuildForum = 15 => "GUILD_FORUM",
		GuildMedia = 16 => "GUILD_MEDIA",
	}
}

impl OptionType {
	pub fn is_numeric(self) -> bool {
		matches!(self, OptionType::Integer | OptionType::Number)
	}

	/// Types whose values can be offered as a fixed choice list or through
	/// autocomplete.
	pub fn accepts_suggestions(self) -> bool {
		matches!(
			self,
			OptionType::String | OptionType::Integer | OptionType::Number
		)
	}
}
