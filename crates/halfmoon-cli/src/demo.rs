//! Commands bundled with the binary.

use halfmoon::AutocompleteRequest;
use halfmoon::ChannelType;
use halfmoon::CommandChoice;
use halfmoon::CommandResult;
use halfmoon::Context;
use halfmoon::Group;
use halfmoon::LocaleBuilder;
use halfmoon::Message;
use halfmoon::PartialChannel;
use halfmoon::Permissions;
use halfmoon::SubGroup;
use halfmoon::User;
use halfmoon::command;
use halfmoon::message_command;
use halfmoon::user_command;
use log::info;

pub const SETTINGS: Group = Group::new("settings")
	.description("Bot settings")
	.default_member_permissions(Permissions::MANAGE_GUILD);
pub const THEME: SubGroup = SETTINGS.sub_group("theme").description("Theme settings");

const TIMEZONES: &[&str] = &[
	"Europe/Berlin",
	"Europe/London",
	"Asia/Shanghai",
	"Asia/Tokyo",
	"America/New_York",
	"America/Los_Angeles",
];

/// Check that the bot is alive
#[command]
pub async fn ping(ctx: Context) {
	info!("pong for {}", ctx.user.username);
}

/// Roll a die
#[command]
pub async fn roll(
	ctx: Context,
	#[arg(description = "Number of sides", min_value = 2, max_value = 120)] sides: Option<i64>,
	#[arg(description = "How many dice", min_value = 1, max_value = 10, default = 1)] count: i64,
) {
	info!("{} rolls {}d{}", ctx.user.username, count, sides.unwrap_or(6));
}

#[command(description = LocaleBuilder::new("Pick a colour").with("en-US", "Pick a color"))]
pub async fn colour(
	_ctx: Context,
	#[arg(choices = [("Red", "red"), ("Green", "green"), ("Blue", "blue")])] colour: String,
	#[arg(description = "Brightness", min_value = 0.0, max_value = 1.0)] brightness: Option<f64>,
) {
	info!("colour {} at {}", colour, brightness.unwrap_or(1.0));
}

async fn suggest_timezone(request: AutocompleteRequest) -> CommandResult<Vec<CommandChoice>> {
	let typed = request.focused.value.to_lowercase();
	Ok(TIMEZONES
		.iter()
		.filter(|zone| zone.to_lowercase().contains(&typed))
		.take(25)
		.map(|zone| CommandChoice::new(*zone, *zone))
		.collect())
}

/// Set your timezone
#[command]
pub async fn timezone(
	ctx: Context,
	#[arg(description = "IANA timezone name", autocomplete = suggest_timezone)] zone: String,
) {
	info!("{} moves to {}", ctx.user.username, zone);
}

/// Post an announcement
#[command(default_member_permissions = Permissions::MANAGE_MESSAGES)]
pub async fn announce(
	_ctx: Context,
	#[arg(description = "What to say", min_length = 1, max_length = 2000)] text: String,
	#[arg(
		description = "Where to post it",
		channel_types = [ChannelType::GuildText, ChannelType::GuildAnnouncement]
	)]
	channel: Option<PartialChannel>,
) {
	match channel {
		Some(channel) => info!("announce in {}: {}", channel.id, text),
		None => info!("announce here: {}", text),
	}
}

/// Show the current settings
#[command(group = SETTINGS)]
pub async fn show(ctx: Context) {
	info!("settings requested in {:?}", ctx.guild_id);
}

/// Change the theme
#[command(sub_group = THEME, name = "set")]
pub async fn set_theme(
	_ctx: Context,
	#[arg(choices = [("Light", "light"), ("Dark", "dark")])] theme: String,
) {
	info!("theme set to {}", theme);
}

/// Reset the theme
#[command(sub_group = THEME)]
pub async fn reset(_ctx: Context) {
	info!("theme reset");
}

#[message_command(name = "Quote")]
pub async fn quote(_ctx: Context, message: Message) {
	info!("{} said: {}", message.author.username, message.content);
}

#[user_command(name = "Avatar")]
pub async fn avatar(_ctx: Context, user: User) {
	info!("avatar of {}", user.username);
}

pub fn all() -> Vec<CommandResult<halfmoon::Command>> {
	vec![
		ping(),
		roll(),
		colour(),
		timezone(),
		announce(),
		show(),
		set_theme(),
		reset(),
		quote(),
		avatar(),
	]
}
