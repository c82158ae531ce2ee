//! Attribute macros turning `async fn`s into halfmoon commands.
//!
//! Each macro replaces the function with one of the same name that takes
//! no arguments and returns `halfmoon::CommandResult<halfmoon::Command>`.
//! The command is built on the first call and the same result is returned
//! afterwards.

use proc_macro::TokenStream;

mod attrs;
mod command;

use attrs::CommandAttrs;
use attrs::CommandKind;

/// Declares a slash command.
///
/// Supported attributes: `name`, `description`, `guild`,
/// `default_member_permissions`, `nsfw`, `group` and `sub_group`. The
/// description falls back to the first paragraph of the doc comment.
///
/// Parameters after the `Context` become options and accept
/// `#[arg(description, name, choices, channel_types, min_value, max_value,
/// min_length, max_length, autocomplete, default, required)]`.
///
/// ```
/// use halfmoon::Context;
///
/// #[halfmoon::command(description = "Roll a die")]
/// async fn roll(_ctx: Context, #[arg(min_value = 2, default = 6)] sides: i64) {
/// 	let _ = sides;
/// }
///
/// assert!(roll().is_ok());
/// ```
///
/// # Compile errors
///
/// Callbacks must be `async`:
///
/// ```compile_fail
/// use halfmoon::Context;
///
/// #[halfmoon::command]
/// fn ping(_ctx: Context) {}
/// ```
///
/// They are free functions taking the `Context` first:
///
/// ```compile_fail
/// use halfmoon::Context;
///
/// struct Bot;
///
/// impl Bot {
/// 	#[halfmoon::command]
/// 	async fn ping(&self, _ctx: Context) {}
/// }
/// ```
///
/// ```compile_fail
/// #[halfmoon::command]
/// async fn ping() {}
/// ```
///
/// An option with a default cannot also be `required`:
///
/// ```compile_fail
/// use halfmoon::Context;
///
/// #[halfmoon::command]
/// async fn roll(_ctx: Context, #[arg(default = 6, required)] sides: i64) {
/// 	let _ = sides;
/// }
/// ```
///
/// Fixed choices and autocomplete exclude each other:
///
/// ```compile_fail
/// use halfmoon::AutocompleteRequest;
/// use halfmoon::CommandChoice;
/// use halfmoon::CommandResult;
/// use halfmoon::Context;
///
/// async fn suggest(_: AutocompleteRequest) -> CommandResult<Vec<CommandChoice>> {
/// 	Ok(Vec::new())
/// }
///
/// #[halfmoon::command]
/// async fn paint(
/// 	_ctx: Context,
/// 	#[arg(choices = [("Red", "red")], autocomplete = suggest)] colour: String,
/// ) {
/// 	let _ = colour;
/// }
/// ```
///
/// Value bounds need a numeric parameter:
///
/// ```compile_fail
/// use halfmoon::Context;
///
/// #[halfmoon::command]
/// async fn say(_ctx: Context, #[arg(min_value = 1)] text: String) {
/// 	let _ = text;
/// }
/// ```
///
/// Length bounds need a string parameter:
///
/// ```compile_fail
/// use halfmoon::Context;
///
/// #[halfmoon::command]
/// async fn roll(_ctx: Context, #[arg(max_length = 5)] sides: i64) {
/// 	let _ = sides;
/// }
/// ```
///
/// Channel types need a channel parameter:
///
/// ```compile_fail
/// use halfmoon::ChannelType;
/// use halfmoon::Context;
///
/// #[halfmoon::command]
/// async fn roll(_ctx: Context, #[arg(channel_types = [ChannelType::GuildText])] sides: i64) {
/// 	let _ = sides;
/// }
/// ```
///
/// Parameter types must map to an option type:
///
/// ```compile_fail
/// use halfmoon::Context;
///
/// #[halfmoon::command]
/// async fn upload(_ctx: Context, bytes: Vec<u8>) {
/// 	let _ = bytes;
/// }
/// ```
#[proc_macro_attribute]
pub fn command(attr: TokenStream, item: TokenStream) -> TokenStream {
	expand(CommandKind::Slash, attr, item)
}

/// Declares a message context menu command. The second parameter receives
/// the targeted `Message`.
///
/// Exactly one target parameter follows the `Context`:
///
/// ```compile_fail
/// use halfmoon::Context;
///
/// #[halfmoon::message_command]
/// async fn quote(_ctx: Context) {}
/// ```
///
/// ```compile_fail
/// use halfmoon::Context;
/// use halfmoon::Message;
///
/// #[halfmoon::message_command]
/// async fn quote(_ctx: Context, message: Message, extra: String) {
/// 	let _ = (message, extra);
/// }
/// ```
#[proc_macro_attribute]
pub fn message_command(attr: TokenStream, item: TokenStream) -> TokenStream {
	expand(CommandKind::Message, attr, item)
}

/// Declares a user context menu command. The second parameter receives the
/// targeted `User`.
///
/// Slash-only attributes are rejected:
///
/// ```compile_fail
/// use halfmoon::Context;
/// use halfmoon::User;
///
/// #[halfmoon::user_command(description = "Show the avatar")]
/// async fn avatar(_ctx: Context, user: User) {
/// 	let _ = user;
/// }
/// ```
#[proc_macro_attribute]
pub fn user_command(attr: TokenStream, item: TokenStream) -> TokenStream {
	expand(CommandKind::User, attr, item)
}

fn expand(kind: CommandKind, attr: TokenStream, item: TokenStream) -> TokenStream {
	let mut attrs = CommandAttrs::default();
	let parser = syn::meta::parser(|meta| attrs.parse(meta, kind));
	syn::parse_macro_input!(attr with parser);
	let function = syn::parse_macro_input!(item as syn::ItemFn);

	command::expand(kind, attrs, function)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}
