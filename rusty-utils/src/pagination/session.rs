//! Pagination session lifecycle: construction, reaction dispatch, and expiry cleanup.

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use twilight_model::guild::Permissions;

use super::action::{ActionButton, ActionOutcome, ActionRegistry};
use super::binder::{BinderEvent, ExpiryReason, ReactionBinder};
use super::error::{ConfigurationError, PaginationError};
use super::navigation::{Control, ControlMap, Navigation, step};
use super::options::{DeleteBehavior, PaginationOptions};
use super::page::{Page, PageStore};
use super::platform::{Invocation, MessageHandle, Platform};
use super::source::{ReactionEvent, ReactionHub};
use super::view::{MessagePayload, render};

/// Where a pagination is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Still a [`PaginationBuilder`]; sessions never report it.
    Unstarted,
    Active,
    Expired,
}

/// Whether the session keeps listening after a reaction was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Terminate,
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub message: MessageHandle,
    pub final_page: usize,
    pub page_count: usize,
    pub reason: ExpiryReason,
    /// Reactions accepted from the principal.
    pub reactions_handled: usize,
}

/// Collects pages and action buttons for a pagination that has not started yet.
#[derive(Debug)]
pub struct PaginationBuilder {
    invocation: Invocation,
    options: PaginationOptions,
    store: PageStore,
    actions: ActionRegistry,
}

impl PaginationBuilder {
    pub fn new(invocation: Invocation, options: PaginationOptions) -> Self {
        Self {
            invocation,
            options,
            store: PageStore::new(),
            actions: ActionRegistry::new(),
        }
    }

    pub fn page(mut self, page: impl Into<Page>) -> Self {
        self.store.append(page);
        self
    }

    pub fn pages<I>(mut self, pages: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Page>,
    {
        self.store.append_all(pages);
        self
    }

    /// Register an action button; its emoji must be unique and not a navigation symbol.
    pub fn action_button(mut self, button: ActionButton) -> Result<Self, ConfigurationError> {
        self.actions.register(button, &self.options.emoji)?;
        Ok(self)
    }

    /// Check the configuration without touching the platform.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.options.validate(self.store.count())
    }

    /// Validate, send (or edit) the first page, attach the controls, and start listening.
    ///
    /// Configuration errors are returned before any platform call. The invoking
    /// message is edited in place when the bot wrote it, otherwise a new message is
    /// sent to the invoking channel. The principal must be a user other than the
    /// bot, which would otherwise drive the session with its own control reactions.
    pub async fn construct(
        self,
        platform: &Platform,
        hub: &ReactionHub,
    ) -> Result<PaginationSession, PaginationError> {
        self.validate()?;
        if self.invocation.principal_id == platform.bot_user_id {
            return Err(ConfigurationError::BotPrincipal {
                user_id: platform.bot_user_id,
            }
            .into());
        }

        let Self {
            invocation,
            options,
            mut store,
            actions,
        } = self;

        store.set_cursor(options.start_page);
        let payload = render(store.pages(), store.current_index(), &options);

        let message = if invocation.author_id == platform.bot_user_id {
            let handle = invocation.handle();
            platform.messages.edit(handle, &payload).await?;
            handle
        } else {
            platform
                .messages
                .send(invocation.channel_id, &payload)
                .await?
        };

        let binder = ReactionBinder::new(
            hub.subscribe(message.message_id, invocation.principal_id, options.max_matches),
            options.max_matches,
            options.timeout,
        );

        let controls = ControlMap::new(&options, &actions, invocation.is_private());
        for emoji in controls.reactions() {
            platform.messages.add_reaction(message, emoji).await?;
        }

        info!(
            message_id = message.message_id.get(),
            channel_id = message.channel_id.get(),
            principal_id = invocation.principal_id.get(),
            pages = store.count(),
            start_page = store.current_index(),
            "pagination session started"
        );

        Ok(PaginationSession {
            store,
            options,
            actions,
            controls,
            invocation,
            message,
            platform: platform.clone(),
            binder,
            state: LifecycleState::Active,
            reactions_cleared: false,
            message_deleted: false,
        })
    }

    /// Construct the session and run it on a background task.
    pub async fn start(
        self,
        platform: &Platform,
        hub: &ReactionHub,
    ) -> Result<JoinHandle<SessionReport>, PaginationError> {
        Ok(self.construct(platform, hub).await?.spawn())
    }
}

/// A live pagination bound to one message.
#[derive(Debug)]
pub struct PaginationSession {
    store: PageStore,
    options: PaginationOptions,
    actions: ActionRegistry,
    controls: ControlMap,
    invocation: Invocation,
    message: MessageHandle,
    platform: Platform,
    binder: ReactionBinder,
    state: LifecycleState,
    reactions_cleared: bool,
    message_deleted: bool,
}

impl PaginationSession {
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Page on display, 1-based.
    pub fn current_page(&self) -> usize {
        self.store.current_index()
    }

    pub fn page_count(&self) -> usize {
        self.store.count()
    }

    pub fn message(&self) -> MessageHandle {
        self.message
    }

    /// Render the page under the cursor.
    pub fn render(&self) -> MessagePayload {
        render(self.store.pages(), self.store.current_index(), &self.options)
    }

    /// Listen until the binder expires or the delete control is used, then clean up.
    pub async fn run(mut self) -> SessionReport {
        let reason = loop {
            match self.binder.next().await {
                BinderEvent::Reacted(event) => {
                    if self.dispatch(&event).await == Dispatch::Terminate {
                        break self.binder.expire(ExpiryReason::Terminated);
                    }
                }
                BinderEvent::Expired(reason) => break reason,
            }
        };

        self.finish(reason).await
    }

    pub fn spawn(self) -> JoinHandle<SessionReport> {
        tokio::spawn(self.run())
    }

    /// Apply one reaction to the session.
    ///
    /// Platform failures are logged and never end the session; the cursor moves
    /// even when the edit that would show it fails.
    pub async fn dispatch(&mut self, event: &ReactionEvent) -> Dispatch {
        if self.state != LifecycleState::Active {
            return Dispatch::Terminate;
        }

        let Some(control) = self.controls.resolve(&event.emoji).cloned() else {
            debug!(
                message_id = self.message.message_id.get(),
                emoji = %event.emoji,
                "ignoring unrecognized reaction"
            );
            return Dispatch::Continue;
        };

        match control {
            Control::Navigate(navigation) => {
                self.navigate(navigation, &event.emoji).await;
                Dispatch::Continue
            }
            Control::Delete => {
                self.delete().await;
                Dispatch::Terminate
            }
            Control::Action(emoji) => {
                self.run_action(&emoji).await;
                Dispatch::Continue
            }
        }
    }

    async fn navigate(&mut self, navigation: Navigation, emoji: &str) {
        self.remove_trigger_reaction(emoji).await;

        let cursor = self.store.current_index();
        let Some(target) = step(navigation, cursor, self.store.count(), self.options.cycling)
        else {
            debug!(
                message_id = self.message.message_id.get(),
                ?navigation,
                cursor,
                "navigation is a no-op at this page"
            );
            return;
        };

        if self.store.set_cursor(target) {
            debug!(
                message_id = self.message.message_id.get(),
                ?navigation,
                from = cursor,
                to = target,
                "page changed"
            );
            self.rerender().await;
        }
    }

    async fn run_action(&mut self, emoji: &str) {
        let Some(button) = self.actions.resolve(emoji).cloned() else {
            return;
        };

        match button.invoke().await {
            Ok(ActionOutcome::Rerender) => self.rerender().await,
            Ok(ActionOutcome::Unchanged) => {}
            Err(source) => {
                warn!(
                    ?source,
                    message_id = self.message.message_id.get(),
                    "action button failed"
                );
            }
        }
    }

    async fn rerender(&self) {
        let payload = self.render();
        if let Err(source) = self.platform.messages.edit(self.message, &payload).await {
            warn!(
                ?source,
                message_id = self.message.message_id.get(),
                page = self.store.current_index(),
                "failed to edit paginated message"
            );
        }
    }

    async fn remove_trigger_reaction(&self, emoji: &str) {
        if !self.can_manage_messages().await {
            return;
        }

        if let Err(source) = self
            .platform
            .messages
            .remove_reaction(self.message, emoji, self.invocation.principal_id)
            .await
        {
            warn!(
                ?source,
                message_id = self.message.message_id.get(),
                emoji,
                "failed to remove navigation reaction"
            );
        }
    }

    async fn delete(&mut self) {
        match self.options.delete_behavior {
            DeleteBehavior::DeleteMessage => {
                match self.platform.messages.delete(self.message).await {
                    Ok(()) => self.message_deleted = true,
                    Err(source) => warn!(
                        ?source,
                        message_id = self.message.message_id.get(),
                        "failed to delete paginated message"
                    ),
                }
            }
            DeleteBehavior::ClearReactions => self.clear_reactions().await,
        }
    }

    async fn clear_reactions(&mut self) {
        if self.reactions_cleared || self.message_deleted {
            return;
        }

        if !self.can_manage_messages().await {
            debug!(
                message_id = self.message.message_id.get(),
                "missing manage messages permission, leaving reactions in place"
            );
            return;
        }

        match self.platform.messages.remove_all_reactions(self.message).await {
            Ok(()) => self.reactions_cleared = true,
            Err(source) => warn!(
                ?source,
                message_id = self.message.message_id.get(),
                "failed to clear reactions"
            ),
        }
    }

    /// Direct messages never qualify.
    async fn can_manage_messages(&self) -> bool {
        let Some(guild_id) = self.invocation.guild_id else {
            return false;
        };

        match self
            .platform
            .permissions
            .has_permission(
                self.platform.bot_user_id,
                guild_id,
                self.message.channel_id,
                Permissions::MANAGE_MESSAGES,
            )
            .await
        {
            Ok(allowed) => allowed,
            Err(source) => {
                warn!(
                    ?source,
                    guild_id = guild_id.get(),
                    channel_id = self.message.channel_id.get(),
                    "failed to resolve bot permissions"
                );
                false
            }
        }
    }

    async fn finish(&mut self, reason: ExpiryReason) -> SessionReport {
        self.binder.expire(reason);
        self.state = LifecycleState::Expired;
        self.clear_reactions().await;

        let report = SessionReport {
            message: self.message,
            final_page: self.store.current_index(),
            page_count: self.store.count(),
            reason,
            reactions_handled: self.binder.accepted(),
        };

        info!(
            message_id = self.message.message_id.get(),
            ?reason,
            final_page = report.final_page,
            reactions = report.reactions_handled,
            "pagination session expired"
        );

        report
    }
}
