//! The platform's command registration schema.
//!
//! These types mirror the JSON objects the platform accepts when commands
//! are registered. Field names and integer codes are fixed by the platform.

mod kinds;
mod option;
mod snowflake;
mod value;

pub use kinds::ChannelType;
pub use kinds::CommandType;
pub use kinds::OptionType;
pub use option::AppCommand;
pub use option::CommandOption;
pub use snowflake::Permissions;
pub use snowflake::Snowflake;
pub use value::Bound;
pub use value::ChoiceValue;
pub use value::CommandChoice;
