//! Reaction controls and the cursor transitions they drive.

use super::action::ActionRegistry;
use super::options::PaginationOptions;

/// Cursor movements offered by the navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Back,
    Forth,
    First,
    Last,
}

/// What a reaction emoji means to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Navigate(Navigation),
    Delete,
    Action(String),
}

/// Emoji-to-control table for one session.
///
/// Navigation symbols are resolved before the action registry. First/last/delete
/// are only present when extended controls are on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMap {
    entries: Vec<(String, Control)>,
}

impl ControlMap {
    /// Build the table for a session in a guild (`private_scope = false`) or a DM.
    pub fn new(options: &PaginationOptions, actions: &ActionRegistry, private_scope: bool) -> Self {
        let emoji = &options.emoji;
        let mut entries = Vec::with_capacity(5 + actions.len());

        if options.extended_buttons {
            entries.push((emoji.first.clone(), Control::Navigate(Navigation::First)));
        }
        entries.push((emoji.back.clone(), Control::Navigate(Navigation::Back)));
        entries.push((emoji.forth.clone(), Control::Navigate(Navigation::Forth)));
        if options.extended_buttons {
            entries.push((emoji.last.clone(), Control::Navigate(Navigation::Last)));
        }
        if options.offers_delete(private_scope) {
            entries.push((emoji.delete.clone(), Control::Delete));
        }

        entries.extend(
            actions
                .emoji()
                .map(|symbol| (symbol.to_owned(), Control::Action(symbol.to_owned()))),
        );

        Self { entries }
    }

    /// Resolve an emoji to its control. Unknown emoji resolve to `None`.
    pub fn resolve(&self, emoji: &str) -> Option<&Control> {
        self.entries
            .iter()
            .find(|(symbol, _)| symbol == emoji)
            .map(|(_, control)| control)
    }

    /// Emoji to attach as reactions, in attachment order.
    pub fn reactions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(symbol, _)| symbol.as_str())
    }
}

/// Target cursor for a navigation step, or `None` when the step is a no-op.
///
/// `cycling` only affects back/forth at the boundaries.
pub fn step(navigation: Navigation, cursor: usize, count: usize, cycling: bool) -> Option<usize> {
    match navigation {
        Navigation::Back if cursor > 1 => Some(cursor - 1),
        Navigation::Back if cursor == 1 && cycling => Some(count),
        Navigation::Back => None,

        Navigation::Forth if cursor < count => Some(cursor + 1),
        Navigation::Forth if cursor == count && cycling => Some(1),
        Navigation::Forth => None,

        Navigation::First if cursor > 1 => Some(1),
        Navigation::First => None,

        Navigation::Last if cursor < count => Some(count),
        Navigation::Last => None,
    }
}
