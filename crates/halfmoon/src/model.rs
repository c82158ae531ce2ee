//! Resolved objects delivered with an invocation.

use serde::Deserialize;
use serde::Serialize;

use crate::schema::ChannelType;
use crate::schema::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
	pub id: Snowflake,
	pub username: String,
	#[serde(default)]
	pub bot: bool,
}

impl User {
	pub fn new(id: impl Into<Snowflake>, username: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			username: username.into(),
			bot: false,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
	pub id: Snowflake,
	pub name: String,
}

/// A channel as resolved in an option value. Only the fields the platform
/// always includes are present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialChannel {
	pub id: Snowflake,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(rename = "type")]
	pub kind: ChannelType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
	pub id: Snowflake,
	pub filename: String,
	pub url: String,
	pub size: u64,
}

/// Either side of a `MENTIONABLE` option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mentionable {
	User(User),
	Role(Role),
}

impl Mentionable {
	pub fn id(&self) -> Snowflake {
		match self {
			Mentionable::User(user) => user.id,
			Mentionable::Role(role) => role.id,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
	pub id: Snowflake,
	pub channel_id: Snowflake,
	pub author: User,
	pub content: String,
}
