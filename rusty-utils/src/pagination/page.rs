//! Page content, the page store, and pure page-window helpers.

use twilight_model::channel::message::embed::Embed;

use super::view::MessagePayload;

/// One item of paginated content.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// A rich embed; the page label goes in the message content.
    Embed(Embed),
    /// Plain message content; the page label goes in a footer-only embed.
    Text(String),
    /// A complete message shape, sent as-is.
    Message(MessagePayload),
}

impl From<Embed> for Page {
    fn from(embed: Embed) -> Self {
        Self::Embed(embed)
    }
}

impl From<String> for Page {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Page {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<MessagePayload> for Page {
    fn from(payload: MessagePayload) -> Self {
        Self::Message(payload)
    }
}

/// Ordered pages plus the 1-based cursor of the page on display.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStore {
    pages: Vec<Page>,
    cursor: usize,
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PageStore {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            cursor: 1,
        }
    }

    /// Add one page at the end.
    pub fn append(&mut self, page: impl Into<Page>) -> &mut Self {
        self.pages.push(page.into());
        self
    }

    /// Add pages at the end, keeping their order.
    pub fn append_all<I>(&mut self, pages: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Page>,
    {
        self.pages.extend(pages.into_iter().map(Into::into));
        self
    }

    /// Cursor of the page on display, 1-based.
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The page under the cursor, if the store is not empty.
    pub fn current(&self) -> Option<&Page> {
        self.pages.get(self.cursor.checked_sub(1)?)
    }

    /// Move the cursor. Targets outside `1..=count` are refused.
    pub(crate) fn set_cursor(&mut self, cursor: usize) -> bool {
        if cursor < 1 || cursor > self.pages.len() {
            return false;
        }
        self.cursor = cursor;
        true
    }
}

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Return start/end indices for a page window.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(safe_per_page);
    let end = start.saturating_add(safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Split items into consecutive chunks of at most `per_page`.
pub fn chunk_items<T>(items: &[T], per_page: usize) -> Vec<&[T]> {
    (1..=total_pages(items.len(), per_page))
        .map(|page| {
            let (start, end) = page_window(items.len(), per_page, page);
            &items[start..end]
        })
        .collect()
}

/// Parse a one-based page argument.
///
/// Returns `Some(page)` when the value is valid (`>= 1`), otherwise `None`.
pub fn parse_one_based_page(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value.trim().parse::<usize>().ok().filter(|page| *page >= 1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_order_and_chains() {
        let mut store = PageStore::new();
        store.append("one").append("two").append_all(["three", "four"]);

        assert_eq!(store.count(), 4);
        assert_eq!(store.pages()[0], Page::Text("one".to_owned()));
        assert_eq!(store.pages()[3], Page::Text("four".to_owned()));
    }

    #[test]
    fn append_all_with_nothing_is_a_no_op() {
        let mut store = PageStore::new();
        store.append("one");
        store.append_all(Vec::<Page>::new());

        assert_eq!(store.count(), 1);
        assert_eq!(store.current_index(), 1);
    }

    #[test]
    fn cursor_refuses_out_of_range_targets() {
        let mut store = PageStore::new();
        store.append_all(["a", "b", "c"]);

        assert!(!store.set_cursor(0));
        assert!(!store.set_cursor(4));
        assert_eq!(store.current_index(), 1);

        assert!(store.set_cursor(3));
        assert_eq!(store.current(), Some(&Page::Text("c".to_owned())));
    }

    #[test]
    fn empty_store_has_no_current_page() {
        assert_eq!(PageStore::new().current(), None);
    }

    #[test]
    fn chunks_cover_every_item() {
        let items: Vec<u32> = (1..=7).collect();
        let chunks = chunk_items(&items, 3);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], &[1, 2, 3]);
        assert_eq!(chunks[2], &[7]);
    }

    #[test]
    fn parses_page_arguments() {
        assert_eq!(parse_one_based_page(None), Some(1));
        assert_eq!(parse_one_based_page(Some(" 4 ")), Some(4));
        assert_eq!(parse_one_based_page(Some("0")), None);
        assert_eq!(parse_one_based_page(Some("two")), None);
    }
}
