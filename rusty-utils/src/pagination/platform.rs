//! Narrow interfaces to the chat platform consumed by pagination sessions.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::Client;
use twilight_model::{
    channel::Message,
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker},
    },
};

use super::error::PlatformError;
use super::view::MessagePayload;

/// Location of the message a session controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

/// The message that triggered a pagination and the user allowed to drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    pub author_id: Id<UserMarker>,
    /// `None` for direct messages.
    pub guild_id: Option<Id<GuildMarker>>,
    /// Only reactions from this user are accepted. Defaults to the author.
    pub principal_id: Id<UserMarker>,
}

impl Invocation {
    pub fn new(
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        author_id: Id<UserMarker>,
        guild_id: Option<Id<GuildMarker>>,
    ) -> Self {
        Self {
            channel_id,
            message_id,
            author_id,
            guild_id,
            principal_id: author_id,
        }
    }

    pub fn from_message(message: &Message) -> Self {
        Self::new(
            message.channel_id,
            message.id,
            message.author.id,
            message.guild_id,
        )
    }

    /// Hand control to another user, e.g. when the bot edits its own message for someone.
    pub fn on_behalf_of(mut self, principal_id: Id<UserMarker>) -> Self {
        self.principal_id = principal_id;
        self
    }

    pub fn is_private(&self) -> bool {
        self.guild_id.is_none()
    }

    pub fn handle(&self) -> MessageHandle {
        MessageHandle {
            channel_id: self.channel_id,
            message_id: self.message_id,
        }
    }
}

/// Message and reaction operations.
#[async_trait]
pub trait MessageApi: Send + Sync {
    async fn send(
        &self,
        channel_id: Id<ChannelMarker>,
        payload: &MessagePayload,
    ) -> Result<MessageHandle, PlatformError>;

    async fn edit(&self, message: MessageHandle, payload: &MessagePayload)
    -> Result<(), PlatformError>;

    async fn delete(&self, message: MessageHandle) -> Result<(), PlatformError>;

    async fn add_reaction(&self, message: MessageHandle, emoji: &str) -> Result<(), PlatformError>;

    /// Remove `user_id`'s `emoji` reaction from the message.
    async fn remove_reaction(
        &self,
        message: MessageHandle,
        emoji: &str,
        user_id: Id<UserMarker>,
    ) -> Result<(), PlatformError>;

    async fn remove_all_reactions(&self, message: MessageHandle) -> Result<(), PlatformError>;
}

/// Channel permission lookups. Only queried for guild channels.
#[async_trait]
pub trait PermissionApi: Send + Sync {
    async fn has_permission(
        &self,
        user_id: Id<UserMarker>,
        guild_id: Id<GuildMarker>,
        channel_id: Id<ChannelMarker>,
        required: Permissions,
    ) -> Result<bool, PlatformError>;
}

/// Platform handles plus the identity the bot acts under.
#[derive(Clone)]
pub struct Platform {
    pub messages: Arc<dyn MessageApi>,
    pub permissions: Arc<dyn PermissionApi>,
    pub bot_user_id: Id<UserMarker>,
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("bot_user_id", &self.bot_user_id)
            .finish_non_exhaustive()
    }
}

impl Platform {
    pub fn new(
        messages: Arc<dyn MessageApi>,
        permissions: Arc<dyn PermissionApi>,
        bot_user_id: Id<UserMarker>,
    ) -> Self {
        Self {
            messages,
            permissions,
            bot_user_id,
        }
    }

    /// Use a twilight HTTP client for both messages and permissions.
    pub fn twilight(http: Arc<Client>, bot_user_id: Id<UserMarker>) -> Self {
        let messages: Arc<dyn MessageApi> = http.clone();
        let permissions: Arc<dyn PermissionApi> = http;
        Self::new(messages, permissions, bot_user_id)
    }
}
