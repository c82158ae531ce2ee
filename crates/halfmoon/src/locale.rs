//! Localized names and descriptions.

use std::collections::BTreeMap;

/// A string with a fallback and per-locale translations.
///
/// ```
/// use halfmoon::LocaleBuilder;
///
/// let name = LocaleBuilder::new("colour").with("en-US", "color").with("fr", "couleur");
/// assert_eq!(name.fallback(), "colour");
/// assert_eq!(name.localizations().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleBuilder {
	fallback: String,
	localizations: BTreeMap<String, String>,
}

impl LocaleBuilder {
	pub fn new(fallback: impl Into<String>) -> Self {
		Self {
			fallback: fallback.into(),
			localizations: BTreeMap::new(),
		}
	}

	pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
		self.localizations.insert(locale.into(), text.into());
		self
	}

	pub fn fallback(&self) -> &str {
		&self.fallback
	}

	pub fn localizations(&self) -> &BTreeMap<String, String> {
		&self.localizations
	}
}

/// Either plain text or a [`LocaleBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalizedText {
	Plain(String),
	Localized(LocaleBuilder),
}

impl LocalizedText {
	/// Text sent in the `name` / `description` field.
	pub fn fallback(&self) -> &str {
		match self {
			LocalizedText::Plain(text) => text,
			LocalizedText::Localized(builder) => builder.fallback(),
		}
	}

	/// Translations, or `None` when there are none to send.
	pub fn localizations(&self) -> Option<BTreeMap<String, String>> {
		match self {
			LocalizedText::Localized(builder) if !builder.localizations.is_empty() => {
				Some(builder.localizations.clone())
			}
			_ => None,
		}
	}

	/// Every string a reader may see, fallback first.
	pub(crate) fn variants(&self) -> impl Iterator<Item = &str> {
		let translations = match self {
			LocalizedText::Plain(_) => None,
			LocalizedText::Localized(builder) => Some(builder.localizations.values()),
		};
		std::iter::once(self.fallback()).chain(translations.into_iter().flatten().map(String::as_str))
	}

	pub(crate) fn has_empty_locale(&self) -> bool {
		match self {
			LocalizedText::Plain(_) => false,
			LocalizedText::Localized(builder) => builder.localizations.keys().any(|k| k.is_empty()),
		}
	}
}

impl From<&str> for LocalizedText {
	fn from(text: &str) -> Self {
		LocalizedText::Plain(text.to_string())
	}
}

impl From<String> for LocalizedText {
	fn from(text: String) -> Self {
		LocalizedText::Plain(text)
	}
}

impl From<LocaleBuilder> for LocalizedText {
	fn from(builder: LocaleBuilder) -> Self {
		LocalizedText::Localized(builder)
	}
}
