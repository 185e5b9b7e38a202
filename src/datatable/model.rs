//! Main Model struct, construction and derived-state accessors.
//!
//! Configuration is applied through `with_*` builders at construction time and
//! `set_*` methods afterwards. Every change that affects what is visible ends
//! in [`Model::refresh`], which re-runs the derivation pipeline and clamps the
//! row cursor to the new page.

use super::keys::TableKeyMap;
use super::pipeline::{self, DerivedView, Query};
use super::selection::{duplicate_keys, row_id, Selection};
use super::style::TableStyles;
use super::types::{
    default_actions, Action, Column, ExportFn, Filter, Focus, Row, RowId, SearchMode,
};
use crate::help;
use bubbletea_rs::Cmd;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// An interactive, searchable, sortable, filterable and paginated table.
///
/// Rows are opaque [`Row`] records; [`Column`] descriptors decide which fields
/// are shown and how. Search, filters, sort and the current page form the view
/// state, from which the visible page is derived on every change.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::datatable::{Column, Model, Row};
///
/// let table = Model::new(vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("age", "Age").sortable(),
/// ])
/// .with_rows(vec![
///     Row::new().with("name", "Bob").with("age", 30),
///     Row::new().with("name", "Ann").with("age", 25),
/// ])
/// .with_page_size(1);
///
/// assert_eq!(table.result_count(), 2);
/// assert_eq!(table.total_pages(), 2);
/// ```
pub struct Model {
    pub(super) title: Option<String>,
    pub(super) columns: Vec<Column>,
    pub(super) rows: Vec<Row>,
    pub(super) actions: Vec<Action>,
    pub(super) filters: Vec<Filter>,
    pub(super) search_placeholder: String,
    pub(super) loading: bool,
    pub(super) on_export: Option<ExportFn>,
    pub(super) row_key: Option<String>,
    pub(super) duplicate_keys: BTreeSet<String>,
    pub(super) width: usize,
    pub(super) max_column_width: usize,
    pub(super) styles: TableStyles,
    pub(super) keymap: TableKeyMap,
    pub(super) help: help::Model,

    // View state and the snapshot derived from it
    pub(super) query: Query,
    pub(super) view: DerivedView,
    pub(super) selection: Selection,

    // Terminal-only state
    pub(super) focus: Focus,
    pub(super) focused: bool,
    pub(super) cursor: usize,
    pub(super) column_cursor: usize,
    pub(super) menu_cursor: usize,
    pub(super) status_message: Option<String>,
}

impl Model {
    /// Creates an empty, focused table with the given columns.
    ///
    /// Defaults: page size 10, placeholder `"Search..."`, substring search,
    /// columns capped at 30 cells, and the `view`/`edit`/`delete` actions.
    pub fn new(columns: Vec<Column>) -> Self {
        let mut model = Self {
            title: None,
            columns,
            rows: Vec::new(),
            actions: default_actions(),
            filters: Vec::new(),
            search_placeholder: "Search...".to_string(),
            loading: false,
            on_export: None,
            row_key: None,
            duplicate_keys: BTreeSet::new(),
            width: 0,
            max_column_width: 30,
            styles: TableStyles::default(),
            keymap: TableKeyMap::default(),
            help: help::Model::new(),
            query: Query::default(),
            view: DerivedView::default(),
            selection: Selection::new(),
            focus: Focus::Table,
            focused: true,
            cursor: 0,
            column_cursor: 0,
            menu_cursor: 0,
            status_message: None,
        };
        model.refresh();
        model
    }

    /// Sets the rows (builder pattern).
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Sets the row actions (builder pattern). An empty list keeps the defaults.
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.set_actions(actions);
        self
    }

    /// Sets the filters (builder pattern).
    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.set_filters(filters);
        self
    }

    /// Sets the search box placeholder (builder pattern).
    pub fn with_search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Starts the table in the loading state (builder pattern).
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    /// Sets the page size (builder pattern). Values below 1 become 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Installs the export callback (builder pattern).
    ///
    /// The export affordance only renders when a callback is present.
    pub fn with_on_export<F>(mut self, on_export: F) -> Self
    where
        F: Fn() -> Option<Cmd> + Send + Sync + 'static,
    {
        self.on_export = Some(Arc::new(on_export));
        self
    }

    /// Names the field holding a stable row key (builder pattern).
    ///
    /// Without it, rows are identified by their position in the row set.
    /// Key values should be unique: rows sharing a value are identified by
    /// position instead, so selecting one never selects the other.
    pub fn with_row_key(mut self, key: &str) -> Self {
        self.row_key = Some(key.to_string());
        self.index_row_keys();
        self.selection.clear();
        self
    }

    /// Chooses substring or fuzzy search (builder pattern).
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.query.search_mode = mode;
        self.refresh();
        self
    }

    /// Sets a title drawn above the controls (builder pattern).
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Sets the render width (builder pattern). 0 means unconstrained.
    pub fn with_width(mut self, width: usize) -> Self {
        self.set_width(width);
        self
    }

    /// Caps the width of every data column (builder pattern). Minimum 1.
    pub fn with_max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width.max(1);
        self
    }

    /// Replaces the styles (builder pattern).
    pub fn with_styles(mut self, styles: TableStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the key bindings (builder pattern).
    pub fn with_keymap(mut self, keymap: TableKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the row set.
    ///
    /// Selected ids that no longer exist are dropped. Search, filters, sort
    /// and page are kept; the page is clamped if the result shrank.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        debug!("Replacing {} rows with {}", self.rows.len(), rows.len());
        self.rows = rows;
        self.index_row_keys();
        let existing: BTreeSet<RowId> = (0..self.rows.len()).map(|i| self.row_id(i)).collect();
        self.selection.retain(|id| existing.contains(id));
        self.refresh();
    }

    /// Replaces the actions. An empty list restores the defaults.
    pub fn set_actions(&mut self, actions: Vec<Action>) {
        self.actions = if actions.is_empty() {
            default_actions()
        } else {
            actions
        };
        self.menu_cursor = 0;
    }

    /// Replaces the filters. Selected values of removed filters are dropped.
    pub fn set_filters(&mut self, filters: Vec<Filter>) {
        self.query
            .filters
            .retain(|key, _| filters.iter().any(|f| f.key == *key));
        self.filters = filters;
        if let Focus::Filter(_) = self.focus {
            self.focus = Focus::Table;
        }
        self.refresh();
    }

    /// Switches the loading state. Leaving it re-derives the view.
    pub fn set_loading(&mut self, loading: bool) {
        debug!("Loading: {}", loading);
        self.loading = loading;
        self.refresh();
    }

    /// Sets the page size. Values below 1 become 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.page_size = page_size.max(1);
        self.refresh();
    }

    /// Sets the render width. 0 means unconstrained.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
        self.help.width = width;
    }

    /// Whether the loading skeleton is shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The column descriptors.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The full, underived row set.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The configured actions, or the defaults.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The filter descriptors.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Which control receives key input.
    pub fn focus_region(&self) -> Focus {
        self.focus
    }

    /// Row cursor position on the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the focused column.
    pub fn column_cursor(&self) -> usize {
        self.column_cursor
    }

    /// Last transient status, such as a copy confirmation.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// The current page, 1-based.
    pub fn page(&self) -> usize {
        self.view.page()
    }

    /// The number of pages; 0 when there are no results.
    pub fn total_pages(&self) -> usize {
        self.view.total_pages()
    }

    /// The rows per page.
    pub fn page_size(&self) -> usize {
        self.query.page_size
    }

    /// Number of rows surviving search and filters.
    pub fn result_count(&self) -> usize {
        self.view.result_count()
    }

    /// Rows of the current page, in display order.
    pub fn page_rows(&self) -> Vec<&Row> {
        self.view
            .page_indices()
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// Every row surviving search and filters, sorted, across all pages.
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.view.indices().iter().map(|&i| &self.rows[i]).collect()
    }

    /// The row under the cursor.
    pub fn cursor_row(&self) -> Option<&Row> {
        self.page_row(self.cursor)
    }

    pub(super) fn page_row(&self, page_pos: usize) -> Option<&Row> {
        self.view
            .page_indices()
            .get(page_pos)
            .map(|&i| &self.rows[i])
    }

    pub(super) fn row_id(&self, index: usize) -> RowId {
        row_id(
            self.row_key.as_deref(),
            &self.duplicate_keys,
            index,
            &self.rows[index],
        )
    }

    fn index_row_keys(&mut self) {
        self.duplicate_keys = duplicate_keys(self.row_key.as_deref(), &self.rows);
        if !self.duplicate_keys.is_empty() {
            warn!(
                "{} row key values are not unique; those rows are identified by position",
                self.duplicate_keys.len()
            );
        }
    }

    pub(super) fn page_ids(&self) -> Vec<RowId> {
        self.view
            .page_indices()
            .iter()
            .map(|&i| self.row_id(i))
            .collect()
    }

    /// Re-derives the visible page from the current view state.
    ///
    /// Nothing is derived while loading: the view is emptied so no stale
    /// source index outlives a row change. Clamps the stored page and the
    /// row cursor.
    pub fn refresh(&mut self) {
        if self.loading {
            self.view = DerivedView::default();
            self.cursor = 0;
            if self.focus == Focus::Overflow {
                self.focus = Focus::Table;
            }
            return;
        }
        self.view = pipeline::derive(&self.rows, &self.query);
        self.query.page = self.view.page();

        let on_page = self.view.page_indices().len();
        self.cursor = self.cursor.min(on_page.saturating_sub(1));
        self.column_cursor = self
            .column_cursor
            .min(self.columns.len().saturating_sub(1));
        if self.focus == Focus::Overflow && self.overflow_actions_at_cursor().is_empty() {
            self.focus = Focus::Table;
        }
    }

    pub(super) fn overflow_actions_at_cursor(&self) -> Vec<&Action> {
        self.cursor_row()
            .map(|row| self.overflow_actions(row))
            .unwrap_or_default()
    }
}
