//! Custom action buttons registered on a pagination session.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt as _;
use futures::future::BoxFuture;

use super::error::{ActionEffectError, ConfigurationError};
use super::options::NavigationEmoji;

/// What the session should do after an action ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Leave the message untouched.
    #[default]
    Unchanged,
    /// Render the current page again and edit the message.
    Rerender,
}

type Effect = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<ActionOutcome>> + Send + Sync>;

/// An emoji bound to an asynchronous effect.
#[derive(Clone)]
pub struct ActionButton {
    emoji: String,
    effect: Effect,
}

impl fmt::Debug for ActionButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionButton")
            .field("emoji", &self.emoji)
            .finish_non_exhaustive()
    }
}

impl ActionButton {
    pub fn new<F, Fut>(emoji: impl Into<String>, effect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<ActionOutcome>> + Send + 'static,
    {
        Self {
            emoji: emoji.into(),
            effect: Arc::new(move || effect().boxed()),
        }
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    /// Run the effect, turning errors and panics into [`ActionEffectError`].
    pub async fn invoke(&self) -> Result<ActionOutcome, ActionEffectError> {
        let effect = Arc::clone(&self.effect);
        let outcome = AssertUnwindSafe(async move { effect().await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(source)) => Err(ActionEffectError::Failed {
                emoji: self.emoji.clone(),
                source,
            }),
            Err(_) => Err(ActionEffectError::Panicked {
                emoji: self.emoji.clone(),
            }),
        }
    }
}

/// Ordered set of action buttons keyed by emoji.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    buttons: Vec<ActionButton>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a button. Duplicate and navigation symbols are rejected, never overwritten.
    pub fn register(
        &mut self,
        button: ActionButton,
        reserved: &NavigationEmoji,
    ) -> Result<&mut Self, ConfigurationError> {
        if reserved.is_reserved(button.emoji()) {
            return Err(ConfigurationError::ReservedActionButton {
                emoji: button.emoji,
            });
        }

        if self.resolve(button.emoji()).is_some() {
            return Err(ConfigurationError::DuplicateActionButton {
                emoji: button.emoji,
            });
        }

        self.buttons.push(button);
        Ok(self)
    }

    /// Exact-match lookup on the emoji symbol.
    pub fn resolve(&self, emoji: &str) -> Option<&ActionButton> {
        self.buttons.iter().find(|button| button.emoji == emoji)
    }

    /// Emoji of every button, in registration order.
    pub fn emoji(&self) -> impl Iterator<Item = &str> {
        self.buttons.iter().map(ActionButton::emoji)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
