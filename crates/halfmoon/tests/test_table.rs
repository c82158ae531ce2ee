use std::sync::Arc;

use futures::FutureExt;
use halfmoon::AutocompleteRequest;
use halfmoon::Command;
use halfmoon::CommandChoice;
use halfmoon::CommandError;
use halfmoon::CommandResult;
use halfmoon::CommandTable;
use halfmoon::CommandType;
use halfmoon::Context;
use halfmoon::FocusedOption;
use halfmoon::Group;
use halfmoon::Message;
use halfmoon::OptionType;
use halfmoon::OptionValue;
use halfmoon::Permissions;
use halfmoon::ResolvedOptions;
use halfmoon::Scope;
use halfmoon::Snowflake;
use halfmoon::SubGroup;
use halfmoon::Target;
use halfmoon::User;
use halfmoon::builder::CommandBuilder;
use halfmoon::command;
use halfmoon::message_command;
use rstest::fixture;
use rstest::rstest;

const ADMIN: Group = Group::new("admin").description("Moderation tools");
const ROLES: SubGroup = ADMIN.sub_group("roles");
const LOCAL: Group = Group::new("local").guild(42);

fn user() -> User {
	User::new(1, "tester")
}

/// Replies with pong
#[command]
async fn ping(_ctx: Context) -> Result<(), String> {
	Err("pong".into())
}

#[command(name = "ping", guild = 42)]
async fn guild_ping(_ctx: Context) -> Result<(), String> {
	Err("guild pong".into())
}

#[command(name = "admin")]
async fn admin_plain(_ctx: Context) {}

#[command(group = ADMIN, description = "Ban a user")]
async fn ban(_ctx: Context, target: User, #[arg(default = 0)] days: i64) -> Result<(), String> {
	Err(format!("{} {}", target.username, days))
}

#[command(sub_group = ROLES, description = "Give a role")]
async fn give(_ctx: Context) {}

#[command(sub_group = ROLES, description = "Take a role")]
async fn take(_ctx: Context) {}

#[command(group = LOCAL)]
async fn status(_ctx: Context) {}

async fn suggest(request: AutocompleteRequest) -> CommandResult<Vec<CommandChoice>> {
	Ok(vec![CommandChoice::new(request.focused.value.clone(), request.focused.value)])
}

#[command(description = "Search things")]
async fn search(_ctx: Context, #[arg(autocomplete = suggest)] query: String, page: Option<i64>) {
	let _ = (query, page);
}

#[message_command(name = "Bookmark")]
async fn bookmark(_ctx: Context, message: Message) -> Result<(), String> {
	Err(message.content)
}

#[fixture]
fn table() -> CommandTable {
	let mut table = CommandTable::new();
	for command in [ping(), guild_ping(), ban(), give(), take(), status(), search(), bookmark()] {
		table.register(command).unwrap();
	}
	table
}

#[rstest]
fn test_register_counts(table: CommandTable) {
	assert_eq!(table.len(), 8);
	assert!(!table.is_empty());
	assert!(CommandTable::new().is_empty());
}

#[rstest]
fn test_register_rejects_duplicates(mut table: CommandTable) {
	let err = table.register(ping()).unwrap_err();
	assert_eq!(
		err,
		CommandError::DuplicateCommand {
			command: "ping".into(),
			scope: "global scope".into(),
		}
	);
}

#[rstest]
fn test_register_rejects_group_clash(mut table: CommandTable) {
	let err = table.register(admin_plain()).unwrap_err();
	assert_eq!(
		err,
		CommandError::GroupClash {
			command: "admin".into(),
			scope: "global scope".into(),
		}
	);
}

#[test]
fn test_register_passes_build_errors() {
	let mut table = CommandTable::new();
	let err = table.register(Err(CommandError::InvalidName("Bad".into()))).unwrap_err();
	assert_eq!(err, CommandError::InvalidName("Bad".into()));
	assert!(table.is_empty());
}

fn grouped(name: String, group: Group, sub_group: Option<SubGroup>) -> CommandResult<Command> {
	let builder = match sub_group {
		Some(sub_group) => CommandBuilder::slash(name).sub_group(sub_group),
		None => CommandBuilder::slash(name).group(group),
	};
	let meta = builder.build()?;
	let callback = |_: Context, _: ResolvedOptions| async { CommandResult::<()>::Ok(()) }.boxed();
	Ok(Command::new(meta, Arc::new(callback)))
}

#[rstest]
#[case(Group::new("admin").description("Other tools"), None, "admin")]
#[case(
	Group::new("admin")
		.description("Moderation tools")
		.default_member_permissions(Permissions::BAN_MEMBERS),
	None,
	"admin"
)]
#[case(ADMIN, Some(ADMIN.sub_group("roles").description("Role tools")), "admin roles")]
fn test_register_rejects_mismatched_groups(
	mut table: CommandTable,
	#[case] group: Group,
	#[case] sub_group: Option<SubGroup>,
	#[case] clashing: &str,
) {
	let err = table.register(grouped("kick".into(), group, sub_group)).unwrap_err();
	assert_eq!(
		err,
		CommandError::GroupMismatch {
			group: clashing.into(),
			scope: "global scope".into(),
		}
	);

	// Same name in another scope is a different group.
	let sub_group = sub_group.map(|s| SubGroup {
		parent: s.parent.guild(42),
		..s
	});
	table.register(grouped("kick".into(), group.guild(42), sub_group)).unwrap();
}

#[test]
fn test_register_limits_group_children() {
	const BIG: Group = Group::new("big");
	const NESTED: SubGroup = BIG.sub_group("nested");

	let mut table = CommandTable::new();
	for i in 0..24 {
		table.register(grouped(format!("c{}", i), BIG, None)).unwrap();
	}
	for i in 0..25 {
		table.register(grouped(format!("n{}", i), BIG, Some(NESTED))).unwrap();
	}

	let err = table.register(grouped("n25".into(), BIG, Some(NESTED))).unwrap_err();
	assert_eq!(
		err,
		CommandError::TooManySubCommands {
			group: "big nested".into(),
			count: 26,
		}
	);

	let err = table.register(grouped("c24".into(), BIG, None)).unwrap_err();
	assert_eq!(
		err,
		CommandError::TooManySubCommands {
			group: "big".into(),
			count: 26,
		}
	);
	assert_eq!(table.len(), 49);
	assert_eq!(table.registration_payloads()[&Scope::Global][0].options.len(), 25);
}

#[rstest]
fn test_registration_payloads_merge_groups(table: CommandTable) {
	let payloads = table.registration_payloads();
	assert_eq!(payloads.len(), 2);

	let global = &payloads[&Scope::Global];
	let names: Vec<_> = global.iter().map(|c| c.name.as_str()).collect();
	assert_eq!(names, vec!["ping", "admin", "search", "Bookmark"]);

	let admin = &global[1];
	assert_eq!(admin.description.as_deref(), Some("Moderation tools"));
	assert_eq!(admin.options.len(), 2);

	let ban = &admin.options[0];
	assert_eq!(ban.kind, OptionType::SubCommand);
	assert_eq!(ban.name, "ban");
	assert_eq!(ban.description, "Ban a user");
	let ban_options = ban.options.as_ref().unwrap();
	assert_eq!(ban_options[0].kind, OptionType::User);
	assert!(ban_options[0].required);
	assert!(!ban_options[1].required);

	let roles = &admin.options[1];
	assert_eq!(roles.kind, OptionType::SubCommandGroup);
	assert_eq!(roles.description, "No Description");
	let subs: Vec<_> = roles.options.as_ref().unwrap().iter().map(|o| o.name.as_str()).collect();
	assert_eq!(subs, vec!["give", "take"]);

	let guild = &payloads[&Scope::Guild(Snowflake(42))];
	let names: Vec<_> = guild.iter().map(|c| c.name.as_str()).collect();
	assert_eq!(names, vec!["ping", "local"]);
	assert!(guild.iter().all(|c| c.guild_id.is_none()));
}

#[test]
fn test_default_guild_applies_to_unscoped_commands() {
	let mut table = CommandTable::with_default_guild(Some(Snowflake(7)));
	table.register(ping()).unwrap();
	table.register(guild_ping()).unwrap();
	table.register(give()).unwrap();

	let payloads = table.registration_payloads();
	assert!(!payloads.contains_key(&Scope::Global));
	let names: Vec<_> = payloads[&Scope::Guild(Snowflake(7))]
		.iter()
		.map(|c| c.name.as_str())
		.collect();
	assert_eq!(names, vec!["ping", "admin"]);
	assert_eq!(payloads[&Scope::Guild(Snowflake(42))].len(), 1);
}

#[rstest]
#[case(None, "pong")]
#[case(Some(42), "guild pong")]
#[case(Some(43), "pong")]
#[tokio::test]
async fn test_dispatch_prefers_guild_commands(
	table: CommandTable,
	#[case] guild: Option<u64>,
	#[case] reply: &str,
) {
	let mut ctx = Context::slash(["ping"], user());
	ctx.guild_id = guild.map(Snowflake);
	let result = table.dispatch(ctx, ResolvedOptions::new()).await;
	assert_eq!(result, Err(CommandError::Callback(reply.into())));
}

#[rstest]
#[tokio::test]
async fn test_dispatch_grouped_command(table: CommandTable) {
	let options = ResolvedOptions::new().with("target", OptionValue::User(User::new(5, "spammer")));
	let result = table
		.dispatch(Context::slash(["admin", "ban"], user()), options)
		.await;
	assert_eq!(result, Err(CommandError::Callback("spammer 0".into())));
}

#[rstest]
#[tokio::test]
async fn test_dispatch_context_menu(table: CommandTable) {
	let message = Message {
		id: Snowflake(10),
		channel_id: Snowflake(11),
		author: user(),
		content: "remember this".into(),
	};
	let ctx = Context::context_menu("Bookmark", user(), Target::Message(message));
	let result = table.dispatch(ctx, ResolvedOptions::new()).await;
	assert_eq!(result, Err(CommandError::Callback("remember this".into())));
}

#[rstest]
#[tokio::test]
async fn test_dispatch_unknown_command(table: CommandTable) {
	let result = table
		.dispatch(Context::slash(["admin", "kick"], user()), ResolvedOptions::new())
		.await;
	assert_eq!(result, Err(CommandError::UnknownCommand("admin kick".into())));

	let mut ctx = Context::slash(["Bookmark"], user());
	ctx.command_type = CommandType::User;
	let result = table.dispatch(ctx, ResolvedOptions::new()).await;
	assert_eq!(result, Err(CommandError::UnknownCommand("Bookmark".into())));
}

fn request(option: &str, value: &str) -> AutocompleteRequest {
	AutocompleteRequest {
		command_path: vec!["search".into()],
		guild_id: None,
		user: user(),
		focused: FocusedOption {
			name: option.into(),
			kind: OptionType::String,
			value: value.into(),
		},
		options: ResolvedOptions::new(),
	}
}

#[rstest]
#[tokio::test]
async fn test_autocomplete_routes_to_handler(table: CommandTable) {
	let choices = table.autocomplete(request("query", "rust")).await.unwrap();
	assert_eq!(choices, vec![CommandChoice::new("rust", "rust")]);
}

#[rstest]
#[tokio::test]
async fn test_autocomplete_without_handler(table: CommandTable) {
	let err = table.autocomplete(request("page", "1")).await.unwrap_err();
	assert_eq!(
		err,
		CommandError::NoAutocomplete {
			command: "search".into(),
			option: "page".into(),
		}
	);

	let mut missing = request("query", "x");
	missing.command_path = vec!["nothing".into()];
	let err = table.autocomplete(missing).await.unwrap_err();
	assert_eq!(err, CommandError::UnknownCommand("nothing".into()));
}
