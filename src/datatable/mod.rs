//! Interactive data table for admin-style management screens.
//!
//! The table shows an in-memory collection of [`Row`]s through [`Column`]
//! descriptors and derives what is visible from a small view state:
//!
//! 1. **Search**: case-insensitive substring (or fuzzy) match over every field
//! 2. **Filters**: exact match per configured [`Filter`], combined with AND
//! 3. **Sort**: stable sort on one column, cycling ascending, descending, off
//! 4. **Pages**: fixed-size pages with the current page always in range
//!
//! Rows can be selected in bulk (selection is keyed by [`RowId`] and survives
//! search, sort and paging) and each row offers [`Action`]s. The first two
//! visible actions are drawn inline; the rest live in an overflow menu.
//!
//! ## Focus regions
//!
//! Keys go to one region at a time: the table itself, the search box, the
//! filter strip or the overflow menu. See [`TableKeyMap`] for the bindings.
//!
//! ## Help integration
//!
//! The model implements [`key::KeyMap`], so the embedded help footer always
//! shows the bindings of the focused region.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_datatable::datatable::{Action, Column, Filter, Model, Row};
//!
//! let mut table = Model::new(vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("role", "Role"),
//! ])
//! .with_rows(vec![
//!     Row::new().with("id", 1).with("name", "Bob").with("role", "admin"),
//!     Row::new().with("id", 2).with("name", "Ann").with("role", "user"),
//! ])
//! .with_filters(vec![Filter::new("role", "All roles")
//!     .with_option("admin", "Admin")
//!     .with_option("user", "User")])
//! .with_actions(vec![Action::new("view", "View", |_| None)])
//! .with_row_key("id");
//!
//! table.set_filter("role", "user").unwrap();
//! assert_eq!(table.page_rows()[0].get("name").to_string(), "Ann");
//! ```

mod api;
mod input;
pub mod keys;
mod model;
pub mod pipeline;
mod rendering;
pub mod selection;
pub mod style;
mod types;

#[cfg(test)]
mod tests;

pub use api::{csv_cell, CopyMsg};
pub use keys::TableKeyMap;
pub use model::Model;
pub use rendering::{display_width, pad, truncate};
pub use style::TableStyles;
pub use types::{
    default_actions, Action, ActionFn, ActionVariant, Column, ExportFn, Filter, FilterOption,
    Focus, RenderFn, Row, RowId, SearchMode, ShowFn, SortDirection, SortSpec, Value,
};

use crate::key::{self, KeyMap as _};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use tracing::{debug, warn};

impl Model {
    /// Processes a message.
    ///
    /// Keys are routed to the focused region. Everything is ignored while
    /// loading or when the component is blurred.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.loading {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focused {
                return None;
            }
            self.status_message = None;
            return self.handle_key(key_msg);
        }

        if let Some(CopyMsg(result)) = msg.downcast_ref::<CopyMsg>() {
            self.status_message = Some(match result {
                Ok(_) => {
                    debug!("Row copied to clipboard");
                    "Row copied to clipboard".to_string()
                }
                Err(err) => {
                    warn!("Copy failed: {}", err);
                    err.to_string()
                }
            });
        }
        None
    }

    /// Renders the table, or the loading skeleton.
    pub fn view(&self) -> String {
        self.view_all()
    }
}

// Help follows the focused region
impl key::KeyMap for Model {
    fn short_help(&self) -> Vec<&key::Binding> {
        let keys = &self.keymap;
        match self.focus {
            Focus::Table => keys.short_help(),
            Focus::Search => vec![&keys.accept_search, &keys.cancel_search],
            Focus::Filter(_) => vec![
                &keys.option_prev,
                &keys.option_next,
                &keys.filter_next,
                &keys.filter_clear,
                &keys.filter_done,
            ],
            Focus::Overflow => vec![
                &keys.menu_up,
                &keys.menu_down,
                &keys.menu_select,
                &keys.menu_close,
            ],
        }
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        match self.focus {
            Focus::Table => self.keymap.full_help(),
            _ => vec![self.short_help()],
        }
    }
}

impl BubbleTeaModel for Model {
    /// An empty table without columns.
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Vec::new()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
        self.focus = Focus::Table;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
