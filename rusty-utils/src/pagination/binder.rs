//! Reaction listener scoped to one message, one user, a match budget and a deadline.

use std::time::Duration;

use tokio::time::{Instant, timeout_at};
use twilight_model::id::{
    Id,
    marker::{MessageMarker, UserMarker},
};

use super::source::{ReactionEvent, Subscription};

/// Why a session stopped listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryReason {
    /// The session lifetime elapsed.
    Timeout,
    /// The match budget was used up.
    MatchBudget,
    /// The delete control ended the session.
    Terminated,
    /// The event source shut down.
    SourceClosed,
}

/// Next thing a binder has to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinderEvent {
    Reacted(ReactionEvent),
    Expired(ExpiryReason),
}

/// A session's view of its reaction queue, bounded by a match budget and a deadline.
#[derive(Debug)]
pub struct ReactionBinder {
    subscription: Option<Subscription>,
    message_id: Id<MessageMarker>,
    principal_id: Id<UserMarker>,
    remaining: usize,
    accepted: usize,
    deadline: Instant,
    expired: Option<ExpiryReason>,
}

impl ReactionBinder {
    /// The timeout starts counting now.
    pub fn new(subscription: Subscription, max_matches: usize, timeout: Duration) -> Self {
        Self {
            message_id: subscription.message_id(),
            principal_id: subscription.principal_id(),
            subscription: Some(subscription),
            remaining: max_matches,
            accepted: 0,
            deadline: Instant::now() + timeout,
            expired: None,
        }
    }

    /// Whether an event belongs to this binder's message and principal.
    pub fn accepts(&self, event: &ReactionEvent) -> bool {
        event.message_id == self.message_id && event.user_id == self.principal_id
    }

    /// Wait for the next accepted reaction or for expiry.
    ///
    /// Once expired, every later call reports the same expiry and queued events
    /// are never delivered.
    pub async fn next(&mut self) -> BinderEvent {
        loop {
            if let Some(reason) = self.expired {
                return BinderEvent::Expired(reason);
            }

            if self.remaining == 0 {
                return BinderEvent::Expired(self.expire(ExpiryReason::MatchBudget));
            }

            if Instant::now() >= self.deadline {
                return BinderEvent::Expired(self.expire(ExpiryReason::Timeout));
            }

            let Some(subscription) = self.subscription.as_mut() else {
                return BinderEvent::Expired(self.expire(ExpiryReason::SourceClosed));
            };

            match timeout_at(self.deadline, subscription.recv()).await {
                Err(_elapsed) => {
                    return BinderEvent::Expired(self.expire(ExpiryReason::Timeout));
                }
                Ok(Some(event)) if self.accepts(&event) => {
                    self.remaining -= 1;
                    self.accepted += 1;
                    return BinderEvent::Reacted(event);
                }
                Ok(Some(_)) => {}
                Ok(None) => {
                    return BinderEvent::Expired(self.expire(ExpiryReason::SourceClosed));
                }
            }
        }
    }

    /// Stop listening and unsubscribe. The first reason sticks.
    pub fn expire(&mut self, reason: ExpiryReason) -> ExpiryReason {
        if let Some(existing) = self.expired {
            return existing;
        }

        self.subscription = None;
        self.expired = Some(reason);
        reason
    }

    pub fn is_expired(&self) -> bool {
        self.expired.is_some()
    }

    /// Reactions delivered so far.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Reactions left in the match budget.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}
