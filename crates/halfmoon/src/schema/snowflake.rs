use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// Platform identifier. Transmitted as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(pub u64);

impl Snowflake {
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl From<u64> for Snowflake {
	fn from(id: u64) -> Self {
		Snowflake(id)
	}
}

impl fmt::Display for Snowflake {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for Snowflake {
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.parse().map(Snowflake)
	}
}

impl Serialize for Snowflake {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Snowflake {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserialize_u64(deserializer).map(Snowflake)
	}
}

/// Permission bit set required to see a command by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Permissions(pub u64);

impl Permissions {
	pub const NONE: Permissions = Permissions(0);
	pub const KICK_MEMBERS: Permissions = Permissions(1 << 1);
	pub const BAN_MEMBERS: Permissions = Permissions(1 << 2);
	pub const ADMINISTRATOR: Permissions = Permissions(1 << 3);
	pub const MANAGE_CHANNELS: Permissions = Permissions(1 << 4);
	pub const MANAGE_GUILD: Permissions = Permissions(1 << 5);
	pub const MANAGE_MESSAGES: Permissions = Permissions(1 << 13);
	pub const MANAGE_ROLES: Permissions = Permissions(1 << 28);
	pub const MODERATE_MEMBERS: Permissions = Permissions(1 << 40);

	pub const fn bits(self) -> u64 {
		self.0
	}

	pub const fn contains(self, other: Permissions) -> bool {
		self.0 & other.0 == other.0
	}
}

impl BitOr for Permissions {
	type Output = Permissions;

	fn bitor(self, rhs: Self) -> Self::Output {
		Permissions(self.0 | rhs.0)
	}
}

impl Serialize for Permissions {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Permissions {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserialize_u64(deserializer).map(Permissions)
	}
}

/// Accepts both `"123"` and `123`; the platform sends strings but config
/// files commonly hold plain numbers.
fn deserialize_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Number(u64),
	}

	match Raw::deserialize(deserializer)? {
		Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
		Raw::Number(n) => Ok(n),
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_snowflake_serializes_as_string() {
		let json = serde_json::to_string(&Snowflake(12345678)).unwrap();
		assert_eq!(json, "\"12345678\"");
	}

	#[rstest]
	#[case("\"42\"")]
	#[case("42")]
	fn test_snowflake_accepts_string_and_number(#[case] input: &str) {
		let id: Snowflake = serde_json::from_str(input).unwrap();
		assert_eq!(id, Snowflake(42));
	}

	#[test]
	fn test_permissions_combine() {
		let perms = Permissions::BAN_MEMBERS | Permissions::KICK_MEMBERS;
		assert_eq!(perms.bits(), 0b110);
		assert!(perms.contains(Permissions::KICK_MEMBERS));
		assert!(!perms.contains(Permissions::ADMINISTRATOR));
		assert_eq!(serde_json::to_string(&perms).unwrap(), "\"6\"");
	}
}
