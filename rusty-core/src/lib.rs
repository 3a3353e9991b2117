use std::sync::Arc;

use twilight_http::Client;
use twilight_model::id::{Id, marker::UserMarker};

use rusty_utils::pagination::{PaginationOptions, Platform, ReactionHub};

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    /// Fed by the gateway loop with every reaction the bot sees.
    pub reactions: ReactionHub,
    pub bot_user_id: Id<UserMarker>,
    /// Defaults applied to every pagination a command opens.
    pub pagination: PaginationOptions,
}

impl Context {
    /// Create a new application context.
    pub fn new(
        http: Arc<Client>,
        reactions: ReactionHub,
        bot_user_id: Id<UserMarker>,
        pagination: PaginationOptions,
    ) -> Self {
        Self {
            http,
            reactions,
            bot_user_id,
            pagination,
        }
    }

    /// Platform handles for pagination sessions, backed by the shared HTTP client.
    pub fn platform(&self) -> Platform {
        Platform::twilight(Arc::clone(&self.http), self.bot_user_id)
    }
}
