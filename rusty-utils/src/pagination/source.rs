//! Gateway-fed reaction event source shared by every session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;
use twilight_model::{
    channel::message::EmojiReactionType,
    gateway::GatewayReaction,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker},
    },
};

/// A user added an emoji reaction to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    pub user_id: Id<UserMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    /// Unicode emoji, or `name:id` for custom emoji.
    pub emoji: String,
}

impl ReactionEvent {
    pub fn from_gateway(reaction: &GatewayReaction) -> Self {
        Self {
            channel_id: reaction.channel_id,
            message_id: reaction.message_id,
            user_id: reaction.user_id,
            guild_id: reaction.guild_id,
            emoji: emoji_symbol(&reaction.emoji),
        }
    }
}

/// Symbol used to match a reaction against controls.
pub fn emoji_symbol(emoji: &EmojiReactionType) -> String {
    match emoji {
        EmojiReactionType::Unicode { name } => name.clone(),
        EmojiReactionType::Custom {
            id, name: Some(name), ..
        } => format!("{name}:{id}"),
        EmojiReactionType::Custom { id, name: None, .. } => id.to_string(),
    }
}

#[derive(Debug)]
struct Route {
    principal_id: Id<UserMarker>,
    token: u64,
    sender: mpsc::Sender<ReactionEvent>,
}

#[derive(Debug, Default)]
struct Routes {
    next_token: u64,
    by_message: HashMap<Id<MessageMarker>, Route>,
}

fn lock(routes: &Mutex<Routes>) -> MutexGuard<'_, Routes> {
    routes.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Routes gateway reaction events to the session bound to each message.
///
/// Every session gets its own queue, so traffic on other messages never
/// displaces its events. Cheap to clone; clones share the routing table.
#[derive(Debug, Clone, Default)]
pub struct ReactionHub {
    routes: Arc<Mutex<Routes>>,
}

impl ReactionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route reactions from `principal_id` on `message_id` to a new subscription.
    ///
    /// The queue holds up to `capacity` undelivered events. A later subscription
    /// for the same message replaces this one, which then sees the source close.
    pub fn subscribe(
        &self,
        message_id: Id<MessageMarker>,
        principal_id: Id<UserMarker>,
        capacity: usize,
    ) -> Subscription {
        let (sender, receiver) = mpsc::channel(capacity.max(1));

        let mut routes = lock(&self.routes);
        routes.next_token += 1;
        let token = routes.next_token;
        routes.by_message.insert(
            message_id,
            Route {
                principal_id,
                token,
                sender,
            },
        );

        Subscription {
            receiver,
            message_id,
            principal_id,
            token,
            routes: Arc::downgrade(&self.routes),
        }
    }

    /// Queue an event for the session bound to its message.
    ///
    /// Returns whether a session took the event. Reactions from anyone but the
    /// session's principal are dropped here.
    pub fn publish(&self, event: ReactionEvent) -> bool {
        let routes = lock(&self.routes);
        let Some(route) = routes.by_message.get(&event.message_id) else {
            return false;
        };
        if route.principal_id != event.user_id {
            return false;
        }

        match route.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                debug!(
                    message_id = event.message_id.get(),
                    emoji = %event.emoji,
                    "session queue is full, reaction is past the match budget"
                );
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Number of messages with a live session.
    pub fn listeners(&self) -> usize {
        lock(&self.routes).by_message.len()
    }
}

/// One session's queue of reactions. Dropping it unregisters the route.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<ReactionEvent>,
    message_id: Id<MessageMarker>,
    principal_id: Id<UserMarker>,
    token: u64,
    routes: Weak<Mutex<Routes>>,
}

impl Subscription {
    pub fn message_id(&self) -> Id<MessageMarker> {
        self.message_id
    }

    pub fn principal_id(&self) -> Id<UserMarker> {
        self.principal_id
    }

    /// Next queued event, or `None` once the hub is gone or the route was replaced.
    pub async fn recv(&mut self) -> Option<ReactionEvent> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(routes) = self.routes.upgrade() else {
            return;
        };

        let mut routes = lock(&routes);
        if routes
            .by_message
            .get(&self.message_id)
            .is_some_and(|route| route.token == self.token)
        {
            routes.by_message.remove(&self.message_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(message_id: u64, emoji: &str) -> ReactionEvent {
        ReactionEvent {
            channel_id: Id::new(1),
            message_id: Id::new(message_id),
            user_id: Id::new(7),
            guild_id: None,
            emoji: emoji.to_owned(),
        }
    }

    #[test]
    fn unicode_and_custom_symbols() {
        let unicode = EmojiReactionType::Unicode {
            name: "➡".to_owned(),
        };
        assert_eq!(emoji_symbol(&unicode), "➡");

        let custom = EmojiReactionType::Custom {
            animated: false,
            id: Id::new(42),
            name: Some("pepe".to_owned()),
        };
        assert_eq!(emoji_symbol(&custom), "pepe:42");

        let unnamed = EmojiReactionType::Custom {
            animated: true,
            id: Id::new(43),
            name: None,
        };
        assert_eq!(emoji_symbol(&unnamed), "43");
    }

    fn event_from(message_id: u64, user_id: u64, emoji: &str) -> ReactionEvent {
        ReactionEvent {
            user_id: Id::new(user_id),
            ..event(message_id, emoji)
        }
    }

    #[test]
    fn publish_without_listeners_is_dropped() {
        let hub = ReactionHub::new();
        assert!(!hub.publish(event(1, "➡")));
    }

    #[tokio::test]
    async fn events_reach_only_their_message_and_principal() {
        let hub = ReactionHub::new();
        let mut first = hub.subscribe(Id::new(1), Id::new(7), 4);
        let mut second = hub.subscribe(Id::new(2), Id::new(7), 4);

        assert_eq!(hub.listeners(), 2);
        assert!(hub.publish(event(1, "➡")));
        assert!(!hub.publish(event_from(2, 8, "⬅")));
        assert!(hub.publish(event(2, "⬅")));

        assert_eq!(first.recv().await.unwrap().emoji, "➡");
        assert_eq!(second.recv().await.unwrap().emoji, "⬅");
    }

    #[tokio::test]
    async fn other_messages_cannot_displace_queued_events() {
        let hub = ReactionHub::new();
        let mut subscription = hub.subscribe(Id::new(1), Id::new(7), 1);

        assert!(hub.publish(event(1, "➡")));
        for message_id in 2..500 {
            hub.publish(event(message_id, "⬅"));
        }

        assert_eq!(subscription.recv().await.unwrap().emoji, "➡");
    }

    #[test]
    fn full_queue_rejects_events() {
        let hub = ReactionHub::new();
        let _subscription = hub.subscribe(Id::new(1), Id::new(7), 2);

        assert!(hub.publish(event(1, "➡")));
        assert!(hub.publish(event(1, "➡")));
        assert!(!hub.publish(event(1, "➡")));
    }

    #[test]
    fn dropping_a_subscription_unregisters_it() {
        let hub = ReactionHub::new();
        let subscription = hub.subscribe(Id::new(1), Id::new(7), 2);
        drop(subscription);

        assert_eq!(hub.listeners(), 0);
        assert!(!hub.publish(event(1, "➡")));
    }

    #[tokio::test]
    async fn replaced_subscription_sees_the_source_close() {
        let hub = ReactionHub::new();
        let mut stale = hub.subscribe(Id::new(1), Id::new(7), 2);
        let mut fresh = hub.subscribe(Id::new(1), Id::new(7), 2);

        assert_eq!(stale.recv().await, None);
        drop(stale);

        assert_eq!(hub.listeners(), 1);
        assert!(hub.publish(event(1, "➡")));
        assert_eq!(fresh.recv().await.unwrap().emoji, "➡");
    }
}
