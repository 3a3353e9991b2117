/// Generic embed builders shared across commands.
pub mod embed;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Reaction pagination engine and its Discord adapters.
pub mod pagination;
/// Permission resolution for guild channels.
pub mod permissions;
