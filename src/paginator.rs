//! Page state for the data table.
//!
//! Pages are 1-based, matching what the user sees. The paginator never
//! renders content itself; it only tracks the page and hands out slice bounds.
//! Navigation is a no-op at the respective bound, and the current page is
//! clamped whenever the item count changes so it can never point past the
//! last page.
//!
//! ```rust
//! use bubbletea_datatable::paginator::Model;
//!
//! let mut paginator = Model::new().with_per_page(10).with_total_items(95);
//! assert_eq!(paginator.total_pages, 10);
//!
//! paginator.last_page();
//! assert_eq!(paginator.get_slice_bounds(95), (90, 95));
//!
//! // Shrinking the result set pulls the page back in bounds.
//! paginator.set_total_items(12);
//! assert_eq!(paginator.page, 2);
//! ```

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;

/// How the page indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// `Page 3 of 10`.
    #[default]
    Arabic,
    /// `○ ○ ● ○ ○`.
    Dots,
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Jump to page 1.
    pub first_page: key::Binding,
    /// Go back one page.
    pub prev_page: key::Binding,
    /// Go forward one page.
    pub next_page: key::Binding,
    /// Jump to the last page.
    pub last_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            first_page: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "first page"),
            prev_page: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Char('p')])
                .with_help("p/pgup", "prev page"),
            next_page: key::Binding::new(vec![KeyCode::PageDown, KeyCode::Char('n')])
                .with_help("n/pgdn", "next page"),
            last_page: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last page"),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![
            &self.first_page,
            &self.prev_page,
            &self.next_page,
            &self.last_page,
        ]]
    }
}

/// Pagination state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Indicator style.
    pub paginator_type: Type,
    /// Current page, 1-based.
    pub page: usize,
    /// Items per page, at least 1.
    pub per_page: usize,
    /// Number of pages; 0 when there are no items.
    pub total_pages: usize,
    /// Active page marker in dots mode.
    pub active_dot: String,
    /// Inactive page marker in dots mode.
    pub inactive_dot: String,
    /// Format for arabic mode; the two `%d` are the page and the page count.
    pub arabic_format: String,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 1,
            per_page: 10,
            total_pages: 0,
            active_dot: "●".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "Page %d of %d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a paginator on page 1 with 10 items per page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size (builder pattern). Values below 1 become 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.set_per_page(per_page);
        self
    }

    /// Sets the item count (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the page size. Values below 1 become 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Recomputes the page count as `ceil(items / per_page)` and clamps the page.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = items.div_ceil(self.per_page);
        self.clamp();
    }

    /// Moves to `page`, clamped into the valid range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.total_pages.max(1));
    }

    /// `[start, end)` of the current page within `length` items.
    pub fn get_slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Number of items on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.get_slice_bounds(total_items);
        end - start
    }

    /// True when there is no earlier page.
    pub fn on_first_page(&self) -> bool {
        self.page <= 1
    }

    /// True when there is no later page.
    pub fn on_last_page(&self) -> bool {
        self.page >= self.total_pages.max(1)
    }

    /// Jumps to page 1.
    pub fn first_page(&mut self) {
        self.page = 1;
    }

    /// Goes back one page; no-op on the first page.
    pub fn prev_page(&mut self) {
        if !self.on_first_page() {
            self.page -= 1;
        }
    }

    /// Goes forward one page; no-op on the last page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Jumps to the last page.
    pub fn last_page(&mut self) {
        self.page = self.total_pages.max(1);
    }

    /// Handles navigation keys. Returns true if the page changed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        self.handle_key(key_msg)
    }

    /// Handles a navigation key. Returns true if the page changed.
    pub fn handle_key(&mut self, key_msg: &KeyMsg) -> bool {
        let before = self.page;
        if self.keymap.first_page.matches(key_msg) {
            self.first_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        } else if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.last_page.matches(key_msg) {
            self.last_page();
        }
        before != self.page
    }

    /// Renders the page indicator.
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Arabic => self
                .arabic_format
                .replacen("%d", &self.page.to_string(), 1)
                .replacen("%d", &self.total_pages.max(1).to_string(), 1),
            Type::Dots => (1..=self.total_pages.max(1))
                .map(|i| {
                    if i == self.page {
                        self.active_dot.as_str()
                    } else {
                        self.inactive_dot.as_str()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(c: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: c,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    #[test]
    fn test_page_count_is_ceiling() {
        let p = Model::new().with_per_page(2).with_total_items(3);
        assert_eq!(p.total_pages, 2);
        let p = Model::new().with_per_page(2).with_total_items(4);
        assert_eq!(p.total_pages, 2);
        let p = Model::new().with_per_page(2).with_total_items(0);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_per_page_clamped_to_one() {
        let p = Model::new().with_per_page(0);
        assert_eq!(p.per_page, 1);
    }

    #[test]
    fn test_navigation_is_noop_at_bounds() {
        let mut p = Model::new().with_per_page(10).with_total_items(25);
        p.prev_page();
        assert_eq!(p.page, 1);
        p.first_page();
        assert_eq!(p.page, 1);
        p.next_page();
        p.next_page();
        assert_eq!(p.page, 3);
        p.next_page();
        assert_eq!(p.page, 3);
        p.last_page();
        assert_eq!(p.page, 3);
        assert!(p.on_last_page());
    }

    #[test]
    fn test_page_clamped_when_items_shrink() {
        let mut p = Model::new().with_per_page(10).with_total_items(100);
        p.last_page();
        assert_eq!(p.page, 10);
        p.set_total_items(15);
        assert_eq!(p.page, 2);
        p.set_total_items(0);
        assert_eq!(p.page, 1);
        assert_eq!(p.get_slice_bounds(0), (0, 0));
    }

    #[test]
    fn test_slice_bounds_cover_everything_once() {
        let mut p = Model::new().with_per_page(4).with_total_items(10);
        let mut seen = Vec::new();
        for page in 1..=p.total_pages {
            p.set_page(page);
            let (start, end) = p.get_slice_bounds(10);
            seen.extend(start..end);
        }
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert_eq!(p.items_on_page(10), 2);
    }

    #[test]
    fn test_update_handles_keys() {
        let mut p = Model::new().with_per_page(1).with_total_items(3);
        assert!(p.update(&key(KeyCode::Char('n'))));
        assert_eq!(p.page, 2);
        assert!(p.update(&key(KeyCode::End)));
        assert_eq!(p.page, 3);
        assert!(!p.update(&key(KeyCode::PageDown)));
        assert!(p.update(&key(KeyCode::Home)));
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_views() {
        let mut p = Model::new().with_per_page(10).with_total_items(30);
        assert_eq!(p.view(), "Page 1 of 3");
        p.paginator_type = Type::Dots;
        p.next_page();
        assert_eq!(p.view(), "○ ● ○");
    }
}
