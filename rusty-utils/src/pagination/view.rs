//! Message payload composition for the page under the cursor.

use twilight_model::channel::message::embed::Embed;

use crate::embed::build_footer_embed;

use super::options::PaginationOptions;
use super::page::Page;

/// Content and embeds of one rendered message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePayload {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

impl MessagePayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

/// Label shown for page `cursor` of `count`.
pub fn page_label(cursor: usize, count: usize) -> String {
    format!("Page {cursor} of {count}")
}

/// Render page `cursor` (1-based) of `pages`.
///
/// A cursor outside the pages renders an empty payload; sessions never hold one.
pub fn render(pages: &[Page], cursor: usize, options: &PaginationOptions) -> MessagePayload {
    let Some(page) = cursor.checked_sub(1).and_then(|index| pages.get(index)) else {
        return MessagePayload::default();
    };

    let label = options
        .show_page_numbers
        .then(|| page_label(cursor, pages.len()));

    match page {
        Page::Embed(embed) => MessagePayload {
            content: label,
            embeds: vec![embed.clone()],
        },
        Page::Text(text) => MessagePayload {
            content: Some(text.clone()),
            embeds: label.map(build_footer_embed).into_iter().collect(),
        },
        Page::Message(payload) => payload.clone(),
    }
}
