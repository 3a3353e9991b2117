//! In-memory platform that records every request a session makes.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use twilight_model::{
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
};
use twilight_util::builder::embed::EmbedBuilder;

use rusty_utils::pagination::{
    Invocation, MessageApi, MessageHandle, MessagePayload, Page, PermissionApi, Platform,
    PlatformError, ReactionEvent,
};

pub const CHANNEL: u64 = 1;
pub const GUILD: u64 = 2;
pub const BOT: u64 = 3;
pub const USER: u64 = 4;
pub const STRANGER: u64 = 5;
pub const INVOKING_MESSAGE: u64 = 10;
pub const SENT_MESSAGE: u64 = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send(MessagePayload),
    Edit(MessageHandle, MessagePayload),
    Delete(MessageHandle),
    AddReaction(String),
    RemoveReaction(String, Id<UserMarker>),
    RemoveAllReactions,
}

#[derive(Debug, Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<Call>>,
    permission_checks: AtomicUsize,
    pub manage_messages: AtomicBool,
    pub fail_sends: AtomicBool,
    pub fail_edits: AtomicBool,
    pub fail_reaction_removal: AtomicBool,
}

impl RecordingPlatform {
    pub fn new(manage_messages: bool) -> Arc<Self> {
        let platform = Self::default();
        platform
            .manage_messages
            .store(manage_messages, Ordering::SeqCst);
        Arc::new(platform)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn edits(&self) -> Vec<MessagePayload> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Edit(_, payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    pub fn reactions_added(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddReaction(emoji) => Some(emoji),
                _ => None,
            })
            .collect()
    }

    pub fn permission_checks(&self) -> usize {
        self.permission_checks.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MessageApi for RecordingPlatform {
    async fn send(
        &self,
        channel_id: Id<ChannelMarker>,
        payload: &MessagePayload,
    ) -> Result<MessageHandle, PlatformError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(PlatformError::Rejected("missing access".to_owned()));
        }

        self.record(Call::Send(payload.clone()));
        Ok(MessageHandle {
            channel_id,
            message_id: Id::new(SENT_MESSAGE),
        })
    }

    async fn edit(
        &self,
        message: MessageHandle,
        payload: &MessagePayload,
    ) -> Result<(), PlatformError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(PlatformError::Rejected("unknown message".to_owned()));
        }

        self.record(Call::Edit(message, payload.clone()));
        Ok(())
    }

    async fn delete(&self, message: MessageHandle) -> Result<(), PlatformError> {
        self.record(Call::Delete(message));
        Ok(())
    }

    async fn add_reaction(&self, _message: MessageHandle, emoji: &str) -> Result<(), PlatformError> {
        self.record(Call::AddReaction(emoji.to_owned()));
        Ok(())
    }

    async fn remove_reaction(
        &self,
        _message: MessageHandle,
        emoji: &str,
        user_id: Id<UserMarker>,
    ) -> Result<(), PlatformError> {
        if self.fail_reaction_removal.load(Ordering::SeqCst) {
            return Err(PlatformError::Rejected("unknown emoji".to_owned()));
        }

        self.record(Call::RemoveReaction(emoji.to_owned(), user_id));
        Ok(())
    }

    async fn remove_all_reactions(&self, _message: MessageHandle) -> Result<(), PlatformError> {
        self.record(Call::RemoveAllReactions);
        Ok(())
    }
}

#[async_trait]
impl PermissionApi for RecordingPlatform {
    async fn has_permission(
        &self,
        _user_id: Id<UserMarker>,
        _guild_id: Id<GuildMarker>,
        _channel_id: Id<ChannelMarker>,
        required: Permissions,
    ) -> Result<bool, PlatformError> {
        self.permission_checks.fetch_add(1, Ordering::SeqCst);
        Ok(required == Permissions::MANAGE_MESSAGES && self.manage_messages.load(Ordering::SeqCst))
    }
}

pub fn platform(recorder: &Arc<RecordingPlatform>) -> Platform {
    let messages: Arc<dyn MessageApi> = recorder.clone();
    let permissions: Arc<dyn PermissionApi> = recorder.clone();
    Platform::new(messages, permissions, Id::new(BOT))
}

pub fn guild_invocation() -> Invocation {
    Invocation::new(
        Id::new(CHANNEL),
        Id::new(INVOKING_MESSAGE),
        Id::new(USER),
        Some(Id::new(GUILD)),
    )
}

pub fn private_invocation() -> Invocation {
    Invocation::new(
        Id::new(CHANNEL),
        Id::new(INVOKING_MESSAGE),
        Id::new(USER),
        None,
    )
}

pub fn sent_message() -> MessageHandle {
    MessageHandle {
        channel_id: Id::new(CHANNEL),
        message_id: Id::new(SENT_MESSAGE),
    }
}

pub fn reaction(emoji: &str) -> ReactionEvent {
    reaction_from(USER, emoji)
}

pub fn reaction_from(user_id: u64, emoji: &str) -> ReactionEvent {
    ReactionEvent {
        channel_id: Id::new(CHANNEL),
        message_id: Id::new(SENT_MESSAGE),
        user_id: Id::new(user_id),
        guild_id: Some(Id::new(GUILD)),
        emoji: emoji.to_owned(),
    }
}

pub fn embed_pages(count: usize) -> Vec<Page> {
    (1..=count)
        .map(|index| Page::Embed(EmbedBuilder::new().title(format!("Page body {index}")).build()))
        .collect()
}
