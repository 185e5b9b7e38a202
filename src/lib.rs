#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-datatable/")]

//! # bubbletea-datatable
//!
//! An interactive data table component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications, built for admin-style management screens: users, bookings,
//! products and the like.
//!
//! ## Overview
//!
//! The table displays an in-memory collection of records and lets the user
//! search, filter, sort, page through and bulk-select them, and run per-row
//! actions. It follows the Elm Architecture with `init()`, `update()` and
//! `view()`, so it drops into any bubbletea-rs model.
//!
//! ## Features
//!
//! - **Client-side derivation**: search, filters, sort and pagination computed
//!   in one pure pass over the rows
//! - **Stable selection** keyed by row identity, surviving sort and paging
//! - **Row actions** with visibility predicates and an overflow menu
//! - **Type-safe key bindings** with contextual help
//! - **Theming** through adaptive lipgloss styles
//!
//! ## Quick start
//!
//! ```rust
//! use bubbletea_datatable::prelude::*;
//!
//! let mut table = DataTable::new(vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("age", "Age").sortable(),
//! ])
//! .with_rows(vec![
//!     Row::new().with("name", "Bob").with("age", 30),
//!     Row::new().with("name", "Ann").with("age", 25),
//!     Row::new().with("name", "Cid").with("age", 40),
//! ])
//! .with_page_size(2);
//!
//! table.sort_by("age").unwrap();
//! table.toggle_select_all();
//! assert_eq!(table.selected_page_indices(), vec![0, 1]);
//! ```
//!
//! ## Focus management
//!
//! The table implements [`Component`], so a parent model can route keys to it
//! only while it is focused:
//!
//! ```rust
//! use bubbletea_datatable::prelude::*;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut table = DataTable::new(vec![Column::new("name", "Name")]);
//! handle_focus(&mut table);
//! ```
//!
//! ## Key bindings
//!
//! Bindings come from the `key` module and can be replaced wholesale through
//! [`datatable::TableKeyMap`]:
//!
//! ```rust
//! use bubbletea_datatable::datatable::{Column, Model, TableKeyMap};
//! use bubbletea_datatable::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! let mut keymap = TableKeyMap::default();
//! keymap.toggle_row = Binding::new(vec![KeyCode::Char('x')]).with_help("x", "select");
//!
//! let table = Model::new(vec![Column::new("name", "Name")]).with_keymap(keymap);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `datatable` | The table component |
//! | `key` | Key bindings and the `KeyMap` help trait |
//! | `help` | Help footer rendered from a `KeyMap` |
//! | `paginator` | 1-based page state |
//! | `error` | Error type of the programmatic API |

pub mod datatable;
pub mod error;
pub mod help;
pub mod key;
pub mod paginator;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused component receives keyboard input and draws itself as active;
/// a blurred one ignores keys.
///
/// ## Examples
///
/// ```rust
/// use bubbletea_datatable::Component;
/// use bubbletea_rs::Cmd;
///
/// struct Panel {
///     focused: bool,
/// }
///
/// impl Component for Panel {
///     fn focus(&mut self) -> Option<Cmd> {
///         self.focused = true;
///         None
///     }
///
///     fn blur(&mut self) {
///         self.focused = false;
///     }
///
///     fn focused(&self) -> bool {
///         self.focused
///     }
/// }
/// ```
pub trait Component {
    /// Gives the component keyboard focus. May return an initialization command.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes keyboard focus.
    fn blur(&mut self);

    /// Whether the component currently has focus.
    fn focused(&self) -> bool;
}

pub use datatable::Model as DataTable;
pub use datatable::{
    Action, ActionVariant, Column, Filter, FilterOption, Row, RowId, SearchMode, SortDirection,
    SortSpec, TableKeyMap, TableStyles, Value,
};
pub use error::{Error, Result};
pub use help::Model as HelpModel;
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use paginator::Model as Paginator;

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_datatable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::datatable::Model as DataTable;
    pub use crate::datatable::{
        Action, ActionVariant, Column, CopyMsg, Filter, FilterOption, Focus, Row, RowId,
        SearchMode, SortDirection, SortSpec, TableKeyMap, TableStyles, Value,
    };
    pub use crate::error::Error;
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::paginator::Model as Paginator;
    pub use crate::Component;
}
