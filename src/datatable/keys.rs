//! Key bindings for the data table.
//!
//! ## Table keys
//!
//! - **Cursor**: `↑/k` `↓/j` (row), `←/h` `→/l` (column)
//! - **Sorting**: `s` (sort by the focused column)
//! - **Selection**: `space` (toggle row), `a` (toggle all on page)
//! - **Pages**: `n/pgdn`, `p/pgup`, `g/home`, `G/end`
//! - **Controls**: `/` (search), `tab` (filters), `e` (export), `y` (copy row)
//! - **Actions**: `enter` (first action), `1`/`2` (inline actions), `.` (more)
//!
//! ## Control keys
//!
//! While searching, characters edit the term, `enter` accepts and `esc` clears.
//! On the filter strip `←/→` cycle options and `tab/shift+tab` move between
//! filters. In the overflow menu `↑/↓` move and `enter` activates.
//!
//! ```rust
//! use bubbletea_datatable::datatable::TableKeyMap;
//! use bubbletea_datatable::key::KeyMap;
//!
//! let keymap = TableKeyMap::default();
//! assert!(!keymap.short_help().is_empty());
//! ```

use crate::key;
use crate::paginator::PaginatorKeyMap;
use crossterm::event::KeyCode;

/// Key bindings for every focus region of the table.
#[derive(Debug, Clone)]
pub struct TableKeyMap {
    /// Move the row cursor up.
    pub cursor_up: key::Binding,
    /// Move the row cursor down.
    pub cursor_down: key::Binding,
    /// Focus the previous column.
    pub column_left: key::Binding,
    /// Focus the next column.
    pub column_right: key::Binding,
    /// Sort by the focused column.
    pub sort: key::Binding,
    /// Toggle selection of the cursor row.
    pub toggle_row: key::Binding,
    /// Toggle selection of the whole page.
    pub toggle_all: key::Binding,
    /// Page navigation.
    pub pages: PaginatorKeyMap,
    /// Focus the search box.
    pub search: key::Binding,
    /// Focus the filter strip.
    pub filters: key::Binding,
    /// Run the first inline action on the cursor row.
    pub activate: key::Binding,
    /// Run the first inline action.
    pub action_one: key::Binding,
    /// Run the second inline action.
    pub action_two: key::Binding,
    /// Open the overflow action menu.
    pub more_actions: key::Binding,
    /// Fire the export callback.
    pub export: key::Binding,
    /// Copy the cursor row to the clipboard.
    pub copy: key::Binding,
    /// Toggle the expanded help.
    pub help: key::Binding,

    /// Accept the search term.
    pub accept_search: key::Binding,
    /// Clear the search term and leave the box.
    pub cancel_search: key::Binding,

    /// Previous option of the focused filter.
    pub option_prev: key::Binding,
    /// Next option of the focused filter.
    pub option_next: key::Binding,
    /// Focus the next filter.
    pub filter_next: key::Binding,
    /// Focus the previous filter.
    pub filter_prev: key::Binding,
    /// Clear the focused filter.
    pub filter_clear: key::Binding,
    /// Return from the filter strip to the table.
    pub filter_done: key::Binding,

    /// Move up in the overflow menu.
    pub menu_up: key::Binding,
    /// Move down in the overflow menu.
    pub menu_down: key::Binding,
    /// Run the highlighted overflow action.
    pub menu_select: key::Binding,
    /// Close the overflow menu.
    pub menu_close: key::Binding,
}

impl Default for TableKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            column_left: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev column"),
            column_right: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next column"),
            sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            toggle_row: key::new_binding(vec![
                key::with_keys_str(&["space"]),
                key::with_help("space", "select"),
            ]),
            toggle_all: key::Binding::new(vec![KeyCode::Char('a')]).with_help("a", "select page"),
            pages: PaginatorKeyMap::default(),
            search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            filters: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "filters"),
            activate: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "open"),
            action_one: key::Binding::new(vec![KeyCode::Char('1')]).with_help("1", "action 1"),
            action_two: key::Binding::new(vec![KeyCode::Char('2')]).with_help("2", "action 2"),
            more_actions: key::Binding::new(vec![KeyCode::Char('.')]).with_help(".", "more"),
            export: key::Binding::new(vec![KeyCode::Char('e')]).with_help("e", "export"),
            copy: key::Binding::new(vec![KeyCode::Char('y')]).with_help("y", "copy row"),
            help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "help"),

            accept_search: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply"),
            cancel_search: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear"),

            option_prev: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev option"),
            option_next: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next option"),
            filter_next: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "next filter"),
            filter_prev: key::new_binding(vec![
                key::with_keys_str(&["shift+tab"]),
                key::with_help("shift+tab", "prev filter"),
            ]),
            filter_clear: key::Binding::new(vec![KeyCode::Backspace, KeyCode::Delete])
                .with_help("backspace", "clear"),
            filter_done: key::Binding::new(vec![KeyCode::Enter, KeyCode::Esc])
                .with_help("enter/esc", "done"),

            menu_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            menu_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            menu_select: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "run"),
            menu_close: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "close"),
        }
    }
}

impl key::KeyMap for TableKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.sort,
            &self.toggle_row,
            &self.search,
            &self.help,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.column_left,
                &self.column_right,
                &self.sort,
            ],
            vec![
                &self.pages.next_page,
                &self.pages.prev_page,
                &self.pages.first_page,
                &self.pages.last_page,
            ],
            vec![&self.toggle_row, &self.toggle_all, &self.search, &self.filters],
            vec![
                &self.activate,
                &self.more_actions,
                &self.export,
                &self.copy,
                &self.help,
            ],
        ]
    }
}
