use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;

use super::OptionType;

/// Value carried by a fixed choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
	Integer(i64),
	Number(f64),
	String(String),
}

impl ChoiceValue {
	/// Whether this value may be offered on an option of `kind`. Integer
	/// values are also valid numbers.
	pub fn fits(&self, kind: OptionType) -> bool {
		matches!(
			(self, kind),
			(ChoiceValue::String(_), OptionType::String)
				| (ChoiceValue::Integer(_), OptionType::Integer)
				| (ChoiceValue::Integer(_), OptionType::Number)
				| (ChoiceValue::Number(_), OptionType::Number)
		)
	}
}

impl PartialEq for ChoiceValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(ChoiceValue::Integer(a), ChoiceValue::Integer(b)) => a == b,
			(ChoiceValue::Number(a), ChoiceValue::Number(b)) => a.to_bits() == b.to_bits(),
			(ChoiceValue::String(a), ChoiceValue::String(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for ChoiceValue {}

impl Hash for ChoiceValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			ChoiceValue::Integer(v) => v.hash(state),
			ChoiceValue::Number(v) => v.to_bits().hash(state),
			ChoiceValue::String(v) => v.hash(state),
		}
	}
}

impl fmt::Display for ChoiceValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ChoiceValue::Integer(v) => write!(f, "{}", v),
			ChoiceValue::Number(v) => write!(f, "{}", v),
			ChoiceValue::String(v) => write!(f, "{:?}", v),
		}
	}
}

impl From<&str> for ChoiceValue {
	fn from(value: &str) -> Self {
		ChoiceValue::String(value.to_string())
	}
}

impl From<String> for ChoiceValue {
	fn from(value: String) -> Self {
		ChoiceValue::String(value)
	}
}

impl From<i64> for ChoiceValue {
	fn from(value: i64) -> Self {
		ChoiceValue::Integer(value)
	}
}

impl From<i32> for ChoiceValue {
	fn from(value: i32) -> Self {
		ChoiceValue::Integer(value.into())
	}
}

impl From<f64> for ChoiceValue {
	fn from(value: f64) -> Self {
		ChoiceValue::Number(value)
	}
}

/// A selectable entry shown to the user for an option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandChoice {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_localizations: Option<BTreeMap<String, String>>,
	pub value: ChoiceValue,
}

impl CommandChoice {
	pub fn new(name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
		Self {
			name: name.into(),
			name_localizations: None,
			value: value.into(),
		}
	}

	pub fn with_localizations(mut self, localizations: BTreeMap<String, String>) -> Self {
		self.name_localizations = Some(localizations);
		self
	}
}

/// Numeric bound for `min_value` / `max_value`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
	Integer(i64),
	Number(f64),
}

impl Bound {
	pub fn as_f64(self) -> f64 {
		match self {
			Bound::Integer(v) => v as f64,
			Bound::Number(v) => v,
		}
	}
}

impl PartialEq for Bound {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Bound::Integer(a), Bound::Integer(b)) => a == b,
			(Bound::Number(a), Bound::Number(b)) => a.to_bits() == b.to_bits(),
			_ => false,
		}
	}
}

impl Eq for Bound {}

impl Hash for Bound {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Bound::Integer(v) => v.hash(state),
			Bound::Number(v) => v.to_bits().hash(state),
		}
	}
}

impl fmt::Display for Bound {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Bound::Integer(v) => write!(f, "{}", v),
			Bound::Number(v) => write!(f, "{}", v),
		}
	}
}

macro_rules! bound_from {
	($variant:ident: $($ty:ty),+) => {
		$(
			impl From<$ty> for Bound {
				fn from(value: $ty) -> Self {
					Bound::$variant(value.into())
				}
			}
		)+
	};
}

bound_from!(Integer: i64, i32, i16, i8, u32, u16, u8);
bound_from!(Number: f64, f32);

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(ChoiceValue::from("red"), OptionType::String, true)]
	#[case(ChoiceValue::from("red"), OptionType::Integer, false)]
	#[case(ChoiceValue::from(3), OptionType::Integer, true)]
	#[case(ChoiceValue::from(3), OptionType::Number, true)]
	#[case(ChoiceValue::from(2.5), OptionType::Number, true)]
	#[case(ChoiceValue::from(2.5), OptionType::Integer, false)]
	#[case(ChoiceValue::from(1), OptionType::Boolean, false)]
	fn test_choice_value_fits(
		#[case] value: ChoiceValue,
		#[case] kind: OptionType,
		#[case] expected: bool,
	) {
		assert_eq!(value.fits(kind), expected);
	}

	#[test]
	fn test_choice_serializes_plain_value() {
		let choice = CommandChoice::new("Red", "red");
		assert_eq!(
			serde_json::to_value(&choice).unwrap(),
			serde_json::json!({ "name": "Red", "value": "red" })
		);

		let choice = CommandChoice::new("Six", 6);
		assert_eq!(
			serde_json::to_value(&choice).unwrap(),
			serde_json::json!({ "name": "Six", "value": 6 })
		);
	}

	#[test]
	fn test_bound_keeps_its_kind() {
		assert_eq!(Bound::from(10), Bound::Integer(10));
		assert_eq!(Bound::from(0.5), Bound::Number(0.5));
		assert_ne!(Bound::Integer(1), Bound::Number(1.0));
		assert_eq!(serde_json::to_string(&Bound::Integer(10)).unwrap(), "10");
	}
}
