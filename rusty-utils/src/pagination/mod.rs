//! Reaction-driven pagination of a single message.
//!
//! A [`PaginationBuilder`] collects pages and action buttons, then `construct`
//! validates everything, sends the first page and attaches the reaction controls.
//! The resulting [`PaginationSession`] listens to the [`ReactionHub`] until its
//! match budget or timeout runs out.

mod action;
mod binder;
mod error;
mod navigation;
mod options;
mod page;
mod platform;
pub mod respond;
mod session;
mod source;
mod view;

pub use action::{ActionButton, ActionOutcome, ActionRegistry};
pub use binder::{BinderEvent, ExpiryReason, ReactionBinder};
pub use error::{ActionEffectError, ConfigurationError, PaginationError, PlatformError};
pub use navigation::{Control, ControlMap, Navigation, step};
pub use options::{
    DEFAULT_MAX_MATCHES, DEFAULT_TIMEOUT, DeleteBehavior, MAX_MATCHES_LIMIT, NavigationEmoji,
    PaginationOptions, TIMEOUT_LIMIT,
};
pub use page::{Page, PageStore, chunk_items, page_window, parse_one_based_page, total_pages};
pub use platform::{Invocation, MessageApi, MessageHandle, PermissionApi, Platform};
pub use session::{Dispatch, LifecycleState, PaginationBuilder, PaginationSession, SessionReport};
pub use source::{ReactionEvent, ReactionHub, Subscription, emoji_symbol};
pub use view::{MessagePayload, page_label, render};
