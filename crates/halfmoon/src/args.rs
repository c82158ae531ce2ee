//! Argument metadata attached to command parameters.
//!
//! Each kind wraps one payload and exposes it through `payload()`. Values
//! are immutable; two values of the same kind compare equal and hash the
//! same when their payloads do. Nothing is validated here: whether a piece
//! of metadata fits the option it is attached to is decided by
//! [`crate::builder::OptionBuilder::build`].

use std::any::TypeId;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

use crate::autocomplete::AutocompleteHandler;
use crate::autocomplete::FnHandler;
use crate::context::AutocompleteRequest;
use crate::error::CommandResult;
use crate::locale::LocalizedText;
use crate::schema::Bound;
use crate::schema::ChannelType;
use crate::schema::ChoiceValue;
use crate::schema::CommandChoice;

/// Overrides the option description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description(LocalizedText);

impl Description {
	pub fn new(description: impl Into<LocalizedText>) -> Self {
		Self(description.into())
	}

	pub fn payload(&self) -> &LocalizedText {
		&self.0
	}
}

/// Overrides the option name, which otherwise is the parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(LocalizedText);

impl Name {
	pub fn new(name: impl Into<LocalizedText>) -> Self {
		Self(name.into())
	}

	pub fn payload(&self) -> &LocalizedText {
		&self.0
	}
}

/// Fixed list of values the user picks from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Choices(Vec<CommandChoice>);

impl Choices {
	pub fn new(choices: impl IntoIterator<Item = CommandChoice>) -> Self {
		Self(choices.into_iter().collect())
	}

	/// Builds choices from `(label, value)` pairs.
	pub fn from_pairs<I, N, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (N, V)>,
		N: Into<String>,
		V: Into<ChoiceValue>,
	{
		Self::new(pairs.into_iter().map(|(name, value)| CommandChoice::new(name, value)))
	}

	pub fn payload(&self) -> &[CommandChoice] {
		&self.0
	}
}

/// Restricts a channel option to the given channel kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelTypes(Vec<ChannelType>);

impl ChannelTypes {
	pub fn new(channel_types: impl IntoIterator<Item = ChannelType>) -> Self {
		Self(channel_types.into_iter().collect())
	}

	pub fn payload(&self) -> &[ChannelType] {
		&self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinValue(Bound);

impl MinValue {
	pub fn new(min_value: impl Into<Bound>) -> Self {
		Self(min_value.into())
	}

	pub fn payload(&self) -> Bound {
		self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxValue(Bound);

impl MaxValue {
	pub fn new(max_value: impl Into<Bound>) -> Self {
		Self(max_value.into())
	}

	pub fn payload(&self) -> Bound {
		self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinLength(u16);

impl MinLength {
	pub fn new(min_length: u16) -> Self {
		Self(min_length)
	}

	pub fn payload(&self) -> u16 {
		self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxLength(u16);

impl MaxLength {
	pub fn new(max_length: u16) -> Self {
		Self(max_length)
	}

	pub fn payload(&self) -> u16 {
		self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum HandlerIdentity {
	/// Stateless handlers such as fn items: every instance is the same.
	Type(TypeId),
	/// Stateful handlers compare by allocation.
	Instance(usize),
}

/// Attaches a suggestion handler to an option.
///
/// Two values are equal when they refer to the same handler: the same
/// function, or clones of the same handler instance.
#[derive(Clone)]
pub struct Autocomplete {
	handler: Arc<dyn AutocompleteHandler>,
	identity: HandlerIdentity,
}

impl Autocomplete {
	pub fn new<H: AutocompleteHandler + 'static>(handler: H) -> Self {
		let stateless = std::mem::size_of::<H>() == 0;
		let handler = Arc::new(handler);
		let identity = if stateless {
			HandlerIdentity::Type(TypeId::of::<H>())
		} else {
			HandlerIdentity::Instance(Arc::as_ptr(&handler) as *const () as usize)
		};
		Self { handler, identity }
	}

	/// Wraps an async function.
	///
	/// Passing the function item itself (`from_fn(suggest)`) identifies the
	/// handler by its type, so every call with the same function compares
	/// equal. A `fn` pointer or a capturing closure has a size, and then only
	/// clones of the returned value compare equal.
	pub fn from_fn<F, Fut>(callback: F) -> Self
	where
		F: Fn(AutocompleteRequest) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = CommandResult<Vec<CommandChoice>>> + Send + 'static,
	{
		Self::new(FnHandler(callback))
	}

	pub fn payload(&self) -> &Arc<dyn AutocompleteHandler> {
		&self.handler
	}
}

impl PartialEq for Autocomplete {
	fn eq(&self, other: &Self) -> bool {
		self.identity == other.identity
	}
}

impl Eq for Autocomplete {}

impl Hash for Autocomplete {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.identity.hash(state);
	}
}

impl fmt::Debug for Autocomplete {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Autocomplete")
			.field("identity", &self.identity)
			.finish_non_exhaustive()
	}
}

/// Metadata kinds, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
	Description,
	Name,
	Choices,
	ChannelTypes,
	MinValue,
	MaxValue,
	MinLength,
	MaxLength,
	Autocomplete,
}

impl fmt::Display for ArgKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ArgKind::Description => "description",
			ArgKind::Name => "name",
			ArgKind::Choices => "choices",
			ArgKind::ChannelTypes => "channel_types",
			ArgKind::MinValue => "min_value",
			ArgKind::MaxValue => "max_value",
			ArgKind::MinLength => "min_length",
			ArgKind::MaxLength => "max_length",
			ArgKind::Autocomplete => "autocomplete",
		};
		f.write_str(name)
	}
}

/// Any piece of argument metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgMeta {
	Description(Description),
	Name(Name),
	Choices(Choices),
	ChannelTypes(ChannelTypes),
	MinValue(MinValue),
	MaxValue(MaxValue),
	MinLength(MinLength),
	MaxLength(MaxLength),
	Autocomplete(Autocomplete),
}

impl ArgMeta {
	pub fn kind(&self) -> ArgKind {
		match self {
			ArgMeta::Description(_) => ArgKind::Description,
			ArgMeta::Name(_) => ArgKind::Name,
			ArgMeta::Choices(_) => ArgKind::Choices,
			ArgMeta::ChannelTypes(_) => ArgKind::ChannelTypes,
			ArgMeta::MinValue(_) => ArgKind::MinValue,
			ArgMeta::MaxValue(_) => ArgKind::MaxValue,
			ArgMeta::MinLength(_) => ArgKind::MinLength,
			ArgMeta::MaxLength(_) => ArgKind::MaxLength,
			ArgMeta::Autocomplete(_) => ArgKind::Autocomplete,
		}
	}
}

macro_rules! arg_meta_from {
	($($kind:ident),+) => {
		$(
			impl From<$kind> for ArgMeta {
				fn from(meta: $kind) -> Self {
					ArgMeta::$kind(meta)
				}
			}
		)+
	};
}

arg_meta_from!(
	Description,
	Name,
	Choices,
	ChannelTypes,
	MinValue,
	MaxValue,
	MinLength,
	MaxLength,
	Autocomplete
);
