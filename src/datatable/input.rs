//! Key handling for each focus region.
//!
//! Invalid key-driven operations (sorting an unsortable column, toggling on
//! an empty page) are logged and ignored; they never reach the caller.

use super::types::Focus;
use super::Model;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::{trace, warn};
use unicode_segmentation::UnicodeSegmentation;

impl Model {
    pub(super) fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        trace!("Key {:?} in {:?}", key_msg.key, self.focus);
        match self.focus {
            Focus::Table => self.handle_table_key(key_msg),
            Focus::Search => {
                self.handle_search_key(key_msg);
                None
            }
            Focus::Filter(index) => {
                self.handle_filter_key(index, key_msg);
                None
            }
            Focus::Overflow => self.handle_menu_key(key_msg),
        }
    }

    fn handle_table_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let keys = &self.keymap;
        if keys.cursor_up.matches(key_msg) {
            self.cursor_up();
        } else if keys.cursor_down.matches(key_msg) {
            self.cursor_down();
        } else if keys.column_left.matches(key_msg) {
            self.column_cursor = self.column_cursor.saturating_sub(1);
        } else if keys.column_right.matches(key_msg) {
            if self.column_cursor + 1 < self.columns.len() {
                self.column_cursor += 1;
            }
        } else if keys.sort.matches(key_msg) {
            let Some(column) = self.columns.get(self.column_cursor) else {
                return None;
            };
            let key = column.key.clone();
            if let Err(err) = self.sort_by(&key) {
                warn!("Ignoring sort key: {}", err);
            }
        } else if keys.toggle_row.matches(key_msg) {
            if let Err(err) = self.toggle_row(self.cursor) {
                warn!("Ignoring select key: {}", err);
            }
        } else if keys.toggle_all.matches(key_msg) {
            self.toggle_select_all();
        } else if keys.pages.next_page.matches(key_msg) {
            self.next_page();
        } else if keys.pages.prev_page.matches(key_msg) {
            self.prev_page();
        } else if keys.pages.first_page.matches(key_msg) {
            self.first_page();
        } else if keys.pages.last_page.matches(key_msg) {
            self.last_page();
        } else if keys.search.matches(key_msg) {
            self.focus = Focus::Search;
        } else if keys.filters.matches(key_msg) {
            if !self.filters.is_empty() {
                self.focus = Focus::Filter(0);
            }
        } else if keys.activate.matches(key_msg) || keys.action_one.matches(key_msg) {
            return self.run_inline_action(0);
        } else if keys.action_two.matches(key_msg) {
            return self.run_inline_action(1);
        } else if keys.more_actions.matches(key_msg) {
            self.open_overflow_menu();
        } else if keys.export.matches(key_msg) {
            return self.export();
        } else if keys.copy.matches(key_msg) {
            return self.copy_row();
        } else if keys.help.matches(key_msg) {
            self.help.show_all = !self.help.show_all;
        }
        None
    }

    // The cursor spills onto the neighbouring page at either edge.
    fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.can_go_prev() {
            self.prev_page();
            self.cursor = self.view.page_indices().len().saturating_sub(1);
        }
    }

    fn cursor_down(&mut self) {
        if self.cursor + 1 < self.view.page_indices().len() {
            self.cursor += 1;
        } else if self.can_go_next() {
            self.next_page();
            self.cursor = 0;
        }
    }

    fn run_inline_action(&self, n: usize) -> Option<Cmd> {
        let row = self.cursor_row()?;
        let id = self.inline_actions(row).get(n)?.id.clone();
        match self.invoke_action(&id, self.cursor) {
            Ok(cmd) => cmd,
            Err(err) => {
                warn!("Ignoring action key: {}", err);
                None
            }
        }
    }

    /// Opens the overflow menu for the cursor row.
    ///
    /// No-op when the row has two or fewer visible actions.
    pub fn open_overflow_menu(&mut self) {
        if !self.overflow_actions_at_cursor().is_empty() {
            self.focus = Focus::Overflow;
            self.menu_cursor = 0;
        }
    }

    /// Closes the overflow menu.
    pub fn close_overflow_menu(&mut self) {
        if self.focus == Focus::Overflow {
            self.focus = Focus::Table;
        }
    }

    /// The highlighted overflow menu entry.
    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    fn handle_search_key(&mut self, key_msg: &KeyMsg) {
        if self.keymap.accept_search.matches(key_msg) {
            self.focus = Focus::Table;
        } else if self.keymap.cancel_search.matches(key_msg) {
            self.set_search("");
            self.focus = Focus::Table;
        } else if key_msg.key == KeyCode::Backspace {
            let mut term = self.query.search.clone();
            let last = term.grapheme_indices(true).next_back().map(|(at, _)| at);
            if let Some(at) = last {
                term.truncate(at);
            }
            self.set_search(&term);
        } else if let KeyCode::Char(c) = key_msg.key {
            if key_msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                return;
            }
            let mut term = self.query.search.clone();
            term.push(c);
            self.set_search(&term);
        }
    }

    fn handle_filter_key(&mut self, index: usize, key_msg: &KeyMsg) {
        let count = self.filters.len();
        if count == 0 {
            self.focus = Focus::Table;
            return;
        }

        let keys = &self.keymap;
        if keys.option_prev.matches(key_msg) {
            self.cycle_filter(index, false);
        } else if keys.option_next.matches(key_msg) {
            self.cycle_filter(index, true);
        } else if keys.filter_prev.matches(key_msg) {
            self.focus = Focus::Filter((index + count - 1) % count);
        } else if keys.filter_next.matches(key_msg) {
            self.focus = Focus::Filter((index + 1) % count);
        } else if keys.filter_clear.matches(key_msg) {
            if let Some(filter) = self.filters.get(index) {
                let key = filter.key.clone();
                self.clear_filter(&key);
            }
        } else if keys.filter_done.matches(key_msg) {
            self.focus = Focus::Table;
        }
    }

    // Options cycle through "all" (no constraint) followed by each option.
    fn cycle_filter(&mut self, index: usize, forward: bool) {
        let Some(filter) = self.filters.get(index) else {
            return;
        };
        let mut values: Vec<String> = std::iter::once(String::new())
            .chain(filter.options.iter().map(|o| o.value.clone()))
            .collect();
        let key = filter.key.clone();

        let current = self.filter_value(&key).unwrap_or("");
        let pos = values.iter().position(|v| v == current).unwrap_or(0);
        let len = values.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };

        let value = values.swap_remove(next);
        if let Err(err) = self.set_filter(&key, &value) {
            warn!("Ignoring filter key: {}", err);
        }
    }

    fn handle_menu_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let count = self.overflow_actions_at_cursor().len();
        if count == 0 {
            self.focus = Focus::Table;
            return None;
        }

        if self.keymap.menu_up.matches(key_msg) {
            self.menu_cursor = self.menu_cursor.saturating_sub(1);
        } else if self.keymap.menu_down.matches(key_msg) {
            self.menu_cursor = (self.menu_cursor + 1).min(count - 1);
        } else if self.keymap.menu_close.matches(key_msg) {
            self.focus = Focus::Table;
        } else if self.keymap.menu_select.matches(key_msg) {
            let actions = self.overflow_actions_at_cursor();
            let id = actions.get(self.menu_cursor.min(count - 1))?.id.clone();
            self.focus = Focus::Table;
            return match self.invoke_action(&id, self.cursor) {
                Ok(cmd) => cmd,
                Err(err) => {
                    warn!("Ignoring menu key: {}", err);
                    None
                }
            };
        }
        None
    }
}
