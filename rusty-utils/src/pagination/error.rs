//! Error taxonomy for reaction pagination sessions.

use std::time::Duration;

use thiserror::Error;
use twilight_model::id::{Id, marker::UserMarker};

/// Invalid session configuration, raised before any platform I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("a pagination needs at least 2 pages, got {count}")]
    TooFewPages { count: usize },

    #[error("start page {start_page} is out of range, must be between 1 and {count}")]
    StartPageOutOfRange { start_page: usize, count: usize },

    #[error("match budget must be at least 1")]
    ZeroMaxMatches,

    #[error("match budget {max_matches} exceeds the maximum of {limit}")]
    MaxMatchesTooHigh { max_matches: usize, limit: usize },

    #[error("timeout of {}ms exceeds the maximum of {}ms", .timeout.as_millis(), .limit.as_millis())]
    TimeoutTooHigh { timeout: Duration, limit: Duration },

    #[error("navigation emoji {emoji} is assigned to more than one control")]
    DuplicateNavigationEmoji { emoji: String },

    #[error("action button {emoji} is already registered")]
    DuplicateActionButton { emoji: String },

    #[error("action button {emoji} collides with a navigation control")]
    ReservedActionButton { emoji: String },

    #[error("the bot ({user_id}) cannot drive its own pagination")]
    BotPrincipal { user_id: Id<UserMarker> },
}

/// A failed call against the chat platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("discord http request failed: {0}")]
    Http(#[from] twilight_http::Error),

    #[error("failed to deserialize discord response: {0}")]
    Deserialize(#[from] twilight_http::response::DeserializeBodyError),

    #[error("platform rejected the request: {0}")]
    Rejected(String),
}

/// A registered action button failed while being dispatched.
#[derive(Debug, Error)]
pub enum ActionEffectError {
    #[error("action {emoji} failed: {source:#}")]
    Failed {
        emoji: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("action {emoji} panicked")]
    Panicked { emoji: String },
}

/// Errors surfaced to the caller while constructing a session.
#[derive(Debug, Error)]
pub enum PaginationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
