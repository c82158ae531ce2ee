use halfmoon::AppCommand;
use halfmoon::AutocompleteRequest;
use halfmoon::Bound;
use halfmoon::ChannelType;
use halfmoon::ChoiceValue;
use halfmoon::CommandChoice;
use halfmoon::CommandError;
use halfmoon::CommandOption;
use halfmoon::CommandResult;
use halfmoon::CommandType;
use halfmoon::Context;
use halfmoon::FocusedOption;
use halfmoon::Group;
use halfmoon::LocaleBuilder;
use halfmoon::Message;
use halfmoon::OptionType;
use halfmoon::OptionValue;
use halfmoon::PartialChannel;
use halfmoon::Permissions;
use halfmoon::ResolvedOptions;
use halfmoon::Snowflake;
use halfmoon::SubGroup;
use halfmoon::Target;
use halfmoon::User;
use halfmoon::command;
use halfmoon::message_command;
use halfmoon::user_command;
use rstest::rstest;

const SETTINGS: Group = Group::new("settings").description("Bot settings");
const COLOUR: SubGroup = SETTINGS.sub_group("colour").description("Colour settings");

fn user() -> User {
	User::new(7, "tester")
}

#[command(name = "test", description = "1234", guild = 12345678)]
async fn slash_with_guild(_ctx: Context) {}

#[test]
fn test_slash_command() {
	let command = slash_with_guild().unwrap();
	let meta = command.metadata();

	let mut expected = AppCommand::new(CommandType::Slash, "test");
	expected.description = Some("1234".into());
	expected.guild_id = Some(Snowflake(12345678));
	assert_eq!(meta.app, expected);
	assert!(meta.group.is_none());
	assert!(meta.autocomplete.is_empty());
}

#[command(description = "1234")]
async fn annotated(
	_ctx: Context,
	#[arg(description = "1234")] arg_1: String,
	#[arg(description = "1234")] arg_2: Option<String>,
	arg_3: Option<f64>,
) {
}

#[test]
fn test_annotated_command() {
	let command = annotated().unwrap();

	let mut expected = AppCommand::new(CommandType::Slash, "annotated");
	expected.description = Some("1234".into());
	expected.options = vec![
		CommandOption::new(OptionType::String, "arg_1", "1234", true),
		CommandOption::new(OptionType::String, "arg_2", "1234", false),
		CommandOption::new(OptionType::Number, "arg_3", "No Description", false),
	];
	assert_eq!(command.metadata().app, expected);
}

#[command(description = "1234")]
async fn with_metadata(
	_ctx: Context,
	#[arg(description = "1234", name = "name_override")] test_name: String,
	#[arg(description = "1234", min_value = 0, max_value = 10, default = 5)] test_min_and_max: i64,
	#[arg(description = "1234", channel_types = [ChannelType::GuildText])] test_channels: Option<PartialChannel>,
) {
	let _ = (test_name, test_min_and_max, test_channels);
}

#[test]
fn test_argument_metadata() {
	let command = with_metadata().unwrap();
	let options = &command.metadata().app.options;

	assert_eq!(options[0], CommandOption::new(OptionType::String, "name_override", "1234", true));
	assert_eq!(
		options[1],
		CommandOption {
			min_value: Some(Bound::Integer(0)),
			max_value: Some(Bound::Integer(10)),
			..CommandOption::new(OptionType::Integer, "test_min_and_max", "1234", false)
		}
	);
	assert_eq!(
		options[2],
		CommandOption {
			channel_types: Some(vec![ChannelType::GuildText]),
			..CommandOption::new(OptionType::Channel, "test_channels", "1234", false)
		}
	);
}

/// Shows the bot latency
///
/// Longer explanation that is not part of the description.
#[command]
async fn ping(_ctx: Context) {}

#[test]
fn test_description_from_doc_comment() {
	let command = ping().unwrap();
	assert_eq!(command.metadata().app.name, "ping");
	assert_eq!(command.metadata().app.description.as_deref(), Some("Shows the bot latency"));
}

#[command]
async fn undocumented(_ctx: Context) {}

#[test]
fn test_default_description() {
	let command = undocumented().unwrap();
	assert_eq!(command.metadata().app.description.as_deref(), Some("No Description"));
}

#[message_command]
async fn quote(_ctx: Context, _message: Message) {}

#[user_command(name = "Show Avatar", default_member_permissions = Permissions::MANAGE_MESSAGES)]
async fn avatar(_ctx: Context, _user: User) {}

#[test]
fn test_message_command() {
	let command = quote().unwrap();
	assert_eq!(command.metadata().app, AppCommand::new(CommandType::Message, "quote"));
}

#[test]
fn test_user_command() {
	let command = avatar().unwrap();

	let mut expected = AppCommand::new(CommandType::User, "Show Avatar");
	expected.default_member_permissions = Some(Permissions::MANAGE_MESSAGES);
	assert_eq!(command.metadata().app, expected);
}

#[command(
	name = "colour",
	description = LocaleBuilder::new("Pick a colour").with("fr", "Choisis une couleur"),
	nsfw = false
)]
async fn pick_colour(
	_ctx: Context,
	#[arg(choices = [("Red", "red"), ("Green", "green")])] colour: String,
	#[arg(min_length = 1, max_length = 20)] label: Option<String>,
) -> Result<(), String> {
	Err(format!("{}:{}", colour, label.unwrap_or_default()))
}

#[test]
fn test_choices_and_localized_description() {
	let command = pick_colour().unwrap();
	let app = &command.metadata().app;

	assert_eq!(app.name, "colour");
	assert_eq!(app.nsfw, Some(false));
	assert_eq!(
		app.description_localizations.as_ref().and_then(|m| m.get("fr")).map(String::as_str),
		Some("Choisis une couleur")
	);
	assert_eq!(
		app.options[0].choices,
		Some(vec![
			CommandChoice::new("Red", ChoiceValue::String("red".into())),
			CommandChoice::new("Green", ChoiceValue::String("green".into())),
		])
	);
	assert_eq!(app.options[1].min_length, Some(1));
	assert_eq!(app.options[1].max_length, Some(20));
}

#[test]
fn test_build_result_is_cached() {
	assert_eq!(ping().unwrap().metadata(), ping().unwrap().metadata());
}

#[command(description = "Bad bounds")]
async fn inverted_range(_ctx: Context, #[arg(min_value = 10, max_value = 1)] value: i64) {
	let _ = value;
}

#[command(description = "Bad name", name = "Has Spaces")]
async fn bad_name(_ctx: Context) {}

#[command(description = "Bad choice")]
async fn mismatched_choice(_ctx: Context, #[arg(choices = [("one", 1)])] value: String) {
	let _ = value;
}

#[rstest]
#[case(inverted_range(), CommandError::InvalidRange { option: "value".into() })]
#[case(bad_name(), CommandError::InvalidName("Has Spaces".into()))]
#[case(
	mismatched_choice(),
	CommandError::ChoiceTypeMismatch {
		option: "value".into(),
		choice: "one".into(),
		option_type: OptionType::String,
	}
)]
fn test_invalid_definitions_fail(
	#[case] result: CommandResult<halfmoon::Command>,
	#[case] expected: CommandError,
) {
	assert_eq!(result.unwrap_err(), expected);
}

#[tokio::test]
async fn test_invoke_passes_options() {
	let command = pick_colour().unwrap();

	let options = ResolvedOptions::new()
		.with("colour", OptionValue::String("red".into()))
		.with("label", OptionValue::String("warm".into()));
	let result = command.invoke(Context::slash(["colour"], user()), options).await;
	assert_eq!(result, Err(CommandError::Callback("red:warm".into())));

	let options = ResolvedOptions::new().with("colour", OptionValue::String("green".into()));
	let result = command.invoke(Context::slash(["colour"], user()), options).await;
	assert_eq!(result, Err(CommandError::Callback("green:".into())));
}

#[command(description = "Echo numbers")]
async fn echo_number(
	_ctx: Context,
	#[arg(name = "scale-by")] scale: f64,
	#[arg(default = 3)] times: i64,
) -> Result<(), String> {
	Err(format!("{}", times as f64 * scale))
}

#[tokio::test]
async fn test_invoke_uses_default_and_renamed_option() {
	let command = echo_number().unwrap();
	let ctx = Context::slash(["echo_number"], user());

	let options = ResolvedOptions::new().with("scale-by", OptionValue::Integer(2));
	let result = command.invoke(ctx.clone(), options).await;
	assert_eq!(result, Err(CommandError::Callback("6".into())));

	let result = command.invoke(ctx.clone(), ResolvedOptions::new()).await;
	assert_eq!(result, Err(CommandError::MissingOption("scale-by".into())));

	let options = ResolvedOptions::new()
		.with("scale-by", OptionValue::Number(1.0))
		.with("times", OptionValue::String("x".into()));
	let result = command.invoke(ctx, options).await;
	assert_eq!(
		result,
		Err(CommandError::OptionTypeMismatch {
			option: "times".into(),
			expected: OptionType::Integer,
		})
	);
}

#[message_command(name = "Quote Author")]
async fn quote_author(_ctx: Context, message: Message) -> Result<(), String> {
	Err(message.author.username)
}

#[tokio::test]
async fn test_invoke_context_menu_target() {
	let command = quote_author().unwrap();
	let message = Message {
		id: Snowflake(1),
		channel_id: Snowflake(2),
		author: User::new(3, "author"),
		content: "hello".into(),
	};

	let ctx = Context::context_menu("Quote Author", user(), Target::Message(message));
	let result = command.invoke(ctx, ResolvedOptions::new()).await;
	assert_eq!(result, Err(CommandError::Callback("author".into())));

	let ctx = Context::context_menu("Quote Author", user(), Target::User(user()));
	let result = command.invoke(ctx, ResolvedOptions::new()).await;
	assert_eq!(result, Err(CommandError::MissingTarget(CommandType::Message)));
}

async fn suggest_fruit(request: AutocompleteRequest) -> CommandResult<Vec<CommandChoice>> {
	Ok(["apple", "apricot", "banana"]
		.into_iter()
		.filter(|fruit| fruit.starts_with(&request.focused.value))
		.map(|fruit| CommandChoice::new(fruit, fruit))
		.collect())
}

#[command(description = "Pick a fruit")]
async fn fruit(_ctx: Context, #[arg(autocomplete = suggest_fruit)] name: String) {
	let _ = name;
}

#[tokio::test]
async fn test_autocomplete_handler_registered() {
	let command = fruit().unwrap();
	let meta = command.metadata();
	assert_eq!(meta.app.options[0].autocomplete, Some(true));

	let handler = meta.autocomplete.get("name").unwrap();
	let request = AutocompleteRequest {
		command_path: vec!["fruit".into()],
		guild_id: None,
		user: user(),
		focused: FocusedOption {
			name: "name".into(),
			kind: OptionType::String,
			value: "ap".into(),
		},
		options: ResolvedOptions::new(),
	};
	let suggestions = handler.payload().suggest(request).await.unwrap();
	let names: Vec<_> = suggestions.iter().map(|c| c.name.as_str()).collect();
	assert_eq!(names, vec!["apple", "apricot"]);
}

#[command(group = SETTINGS, description = "Show settings")]
async fn show(_ctx: Context) {}

#[command(sub_group = COLOUR, description = "Set the colour")]
async fn set(_ctx: Context, value: String) {
	let _ = value;
}

#[test]
fn test_grouped_commands() {
	let show = show().unwrap();
	assert_eq!(show.metadata().group, Some(SETTINGS));
	assert_eq!(show.metadata().path(), vec!["settings", "show"]);

	let set = set().unwrap();
	assert_eq!(set.metadata().group, Some(SETTINGS));
	assert_eq!(set.metadata().sub_group, Some(COLOUR));
	assert_eq!(set.metadata().path(), vec!["settings", "colour", "set"]);
}
