//! Session configuration and its validation rules.

use std::time::Duration;

use super::error::ConfigurationError;

/// Hard ceiling for the number of reactions a session will process.
pub const MAX_MATCHES_LIMIT: usize = 100;
/// Default number of reactions a session will process.
pub const DEFAULT_MAX_MATCHES: usize = 50;
/// Hard ceiling for the lifetime of a session.
pub const TIMEOUT_LIMIT: Duration = Duration::from_millis(900_000);
/// Default lifetime of a session.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Emoji symbols bound to the built-in navigation controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEmoji {
    pub back: String,
    pub forth: String,
    pub first: String,
    pub last: String,
    pub delete: String,
}

impl Default for NavigationEmoji {
    fn default() -> Self {
        Self {
            back: "⬅".to_owned(),
            forth: "➡".to_owned(),
            first: "⏮".to_owned(),
            last: "⏭".to_owned(),
            delete: "🗑".to_owned(),
        }
    }
}

impl NavigationEmoji {
    /// All five symbols, in the order they are attached in extended mode.
    pub fn all(&self) -> [&str; 5] {
        [
            self.first.as_str(),
            self.back.as_str(),
            self.forth.as_str(),
            self.last.as_str(),
            self.delete.as_str(),
        ]
    }

    /// Whether `emoji` is one of the navigation symbols.
    ///
    /// Every symbol counts, whether or not extended controls are enabled.
    pub fn is_reserved(&self, emoji: &str) -> bool {
        self.all().contains(&emoji)
    }
}

/// What the delete control does before the session terminates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteBehavior {
    /// Delete the paginated message.
    #[default]
    DeleteMessage,
    /// Remove every reaction from the message and leave its content in place.
    ClearReactions,
}

/// Options for a single pagination session.
///
/// A session takes its own copy at construction time, so a value can be reused
/// as a template for any number of sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Prefix the content with `Page X of Y`.
    pub show_page_numbers: bool,
    /// Offer first/last/delete controls besides back/forth.
    pub extended_buttons: bool,
    /// Wrap around when going back from the first page or forth from the last.
    pub cycling: bool,
    /// Number of accepted reactions before the session expires.
    pub max_matches: usize,
    /// Lifetime of the session.
    pub timeout: Duration,
    /// Page shown first, 1-based.
    pub start_page: usize,
    pub emoji: NavigationEmoji,
    pub delete_behavior: DeleteBehavior,
    /// Offer the delete control in direct messages when extended controls are on.
    pub delete_in_private: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            show_page_numbers: true,
            extended_buttons: false,
            cycling: false,
            max_matches: DEFAULT_MAX_MATCHES,
            timeout: DEFAULT_TIMEOUT,
            start_page: 1,
            emoji: NavigationEmoji::default(),
            delete_behavior: DeleteBehavior::default(),
            delete_in_private: true,
        }
    }
}

impl PaginationOptions {
    /// Check these options against a page count.
    pub fn validate(&self, page_count: usize) -> Result<(), ConfigurationError> {
        if page_count < 2 {
            return Err(ConfigurationError::TooFewPages { count: page_count });
        }

        if self.start_page < 1 || self.start_page > page_count {
            return Err(ConfigurationError::StartPageOutOfRange {
                start_page: self.start_page,
                count: page_count,
            });
        }

        if self.max_matches == 0 {
            return Err(ConfigurationError::ZeroMaxMatches);
        }

        if self.max_matches > MAX_MATCHES_LIMIT {
            return Err(ConfigurationError::MaxMatchesTooHigh {
                max_matches: self.max_matches,
                limit: MAX_MATCHES_LIMIT,
            });
        }

        if self.timeout > TIMEOUT_LIMIT {
            return Err(ConfigurationError::TimeoutTooHigh {
                timeout: self.timeout,
                limit: TIMEOUT_LIMIT,
            });
        }

        let symbols = self.emoji.all();
        for (index, emoji) in symbols.iter().enumerate() {
            if symbols[..index].contains(emoji) {
                return Err(ConfigurationError::DuplicateNavigationEmoji {
                    emoji: (*emoji).to_owned(),
                });
            }
        }

        Ok(())
    }

    /// Whether the delete control is offered for a session in the given scope.
    pub fn offers_delete(&self, private_scope: bool) -> bool {
        self.extended_buttons && (self.delete_in_private || !private_scope)
    }
}
