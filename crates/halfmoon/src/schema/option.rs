use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::Bound;
use super::ChannelType;
use super::CommandChoice;
use super::CommandType;
use super::OptionType;
use super::Permissions;
use super::Snowflake;

/// A single typed parameter of an application command, in the shape the
/// platform's registration endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandOption {
	#[serde(rename = "type")]
	pub kind: OptionType,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_localizations: Option<BTreeMap<String, String>>,
	pub description: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description_localizations: Option<BTreeMap<String, String>>,
	#[serde(default)]
	pub required: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub choices: Option<Vec<CommandChoice>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Vec<CommandOption>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub channel_types: Option<Vec<ChannelType>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_value: Option<Bound>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_value: Option<Bound>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_length: Option<u16>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_length: Option<u16>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub autocomplete: Option<bool>,
}

impl CommandOption {
	/// An option with every constraint unset.
	pub fn new(
		kind: OptionType,
		name: impl Into<String>,
		description: impl Into<String>,
		required: bool,
	) -> Self {
		Self {
			kind,
			name: name.into(),
			name_localizations: None,
			description: description.into(),
			description_localizations: None,
			required,
			choices: None,
			options: None,
			channel_types: None,
			min_value: None,
			max_value: None,
			min_length: None,
			max_length: None,
			autocomplete: None,
		}
	}
}

/// A command definition as sent to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppCommand {
	#[serde(rename = "type")]
	pub kind: CommandType,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_localizations: Option<BTreeMap<String, String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description_localizations: Option<BTreeMap<String, String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub guild_id: Option<Snowflake>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<CommandOption>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_member_permissions: Option<Permissions>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nsfw: Option<bool>,
}

impl AppCommand {
	pub fn new(kind: CommandType, name: impl Into<String>) -> Self {
		Self {
			kind,
			name: name.into(),
			name_localizations: None,
			description: None,
			description_localizations: None,
			guild_id: None,
			options: Vec::new(),
			default_member_permissions: None,
			nsfw: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_option_omits_unset_constraints() {
		let option = CommandOption::new(OptionType::Integer, "count", "How many", true);
		assert_eq!(
			serde_json::to_value(&option).unwrap(),
			serde_json::json!({
				"type": 4,
				"name": "count",
				"description": "How many",
				"required": true,
			})
		);
	}

	#[test]
	fn test_command_payload_shape() {
		let mut command = AppCommand::new(CommandType::Slash, "test");
		command.description = Some("1234".into());
		command.guild_id = Some(Snowflake(12345678));
		command.options.push(CommandOption {
			channel_types: Some(vec![ChannelType::GuildText]),
			..CommandOption::new(OptionType::Channel, "where", "Target channel", false)
		});

		assert_eq!(
			serde_json::to_value(&command).unwrap(),
			serde_json::json!({
				"type": 1,
				"name": "test",
				"description": "1234",
				"guild_id": "12345678",
				"options": [{
					"type": 7,
					"name": "where",
					"description": "Target channel",
					"required": false,
					"channel_types": [0],
				}],
			})
		);
	}

	#[test]
	fn test_command_payload_parses_back() {
		let json = r#"{"type":3,"name":"Quote","default_member_permissions":"8192"}"#;
		let command: AppCommand = serde_json::from_str(json).unwrap();
		assert_eq!(command.kind, CommandType::Message);
		assert!(command.options.is_empty());
		assert_eq!(
			command.default_member_permissions,
			Some(Permissions::MANAGE_MESSAGES)
		);
	}
}
