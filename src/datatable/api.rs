//! Programmatic operations: search, sort, filters, pages, selection, actions.
//!
//! Every mutating operation here ends in a single [`Model::refresh`], so the
//! page, cursor and derived rows stay consistent with the view state.

use super::types::{Action, Row, RowId, SearchMode, SortDirection, SortSpec};
use super::Model;
use crate::error::{Error, Result};
use bubbletea_rs::{Cmd, Msg};
use std::time::Duration;
use tracing::{debug, trace};

/// Result of a clipboard copy started with [`Model::copy_row`].
#[derive(Debug, Clone)]
pub struct CopyMsg(pub Result<String>);

impl Model {
    // ----- search -----

    /// Sets the search term and returns to page 1.
    pub fn set_search(&mut self, term: &str) {
        if self.query.search == term {
            return;
        }
        trace!("Search: {:?}", term);
        self.query.search = term.to_string();
        self.query.page = 1;
        self.refresh();
    }

    /// The current search term.
    pub fn search(&self) -> &str {
        &self.query.search
    }

    /// The search matching mode.
    pub fn search_mode(&self) -> SearchMode {
        self.query.search_mode
    }

    // ----- sort -----

    /// Sorts by `key` with header-click semantics.
    ///
    /// Repeated calls on the same column cycle ascending, descending and
    /// unsorted. Another column always starts ascending.
    ///
    /// ```rust
    /// use bubbletea_datatable::datatable::{Column, Model, SortDirection};
    ///
    /// let mut table = Model::new(vec![Column::new("age", "Age").sortable()]);
    /// table.sort_by("age").unwrap();
    /// assert_eq!(table.sort_spec().unwrap().direction, SortDirection::Ascending);
    /// table.sort_by("age").unwrap();
    /// table.sort_by("age").unwrap();
    /// assert!(table.sort_spec().is_none());
    /// ```
    pub fn sort_by(&mut self, key: &str) -> Result<()> {
        let column = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| Error::UnknownColumn(key.to_string()))?;
        if !column.sortable {
            return Err(Error::NotSortable(key.to_string()));
        }

        self.query.sort = match self.query.sort.take() {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Ascending => Some(SortSpec {
                    direction: SortDirection::Descending,
                    ..spec
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec {
                key: key.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
        debug!("Sort: {:?}", self.query.sort);
        self.refresh();
        Ok(())
    }

    /// The active sort, if any.
    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.query.sort.as_ref()
    }

    // ----- filters -----

    /// Selects `value` for the filter `key` and returns to page 1.
    ///
    /// An empty value clears the filter. Other values must be one of the
    /// filter's options.
    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<()> {
        let filter = self
            .filters
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| Error::UnknownFilter(key.to_string()))?;
        if value.is_empty() {
            self.clear_filter(key);
            return Ok(());
        }
        if filter.option_label(value).is_none() {
            return Err(Error::UnknownFilterOption {
                filter: key.to_string(),
                value: value.to_string(),
            });
        }

        debug!("Filter {} = {:?}", key, value);
        self.query.filters.insert(key.to_string(), value.to_string());
        self.query.page = 1;
        self.refresh();
        Ok(())
    }

    /// Clears one filter and returns to page 1.
    pub fn clear_filter(&mut self, key: &str) {
        if self.query.filters.remove(key).is_some() {
            debug!("Filter {} cleared", key);
            self.query.page = 1;
            self.refresh();
        }
    }

    /// Clears every filter and returns to page 1.
    pub fn clear_filters(&mut self) {
        if !self.query.filters.is_empty() {
            self.query.filters.clear();
            self.query.page = 1;
            self.refresh();
        }
    }

    /// The selected value of a filter, if one is set.
    pub fn filter_value(&self, key: &str) -> Option<&str> {
        self.query.filters.get(key).map(String::as_str)
    }

    // ----- pages -----

    /// Whether there is an earlier page.
    pub fn can_go_prev(&self) -> bool {
        !self.view.paginator.on_first_page()
    }

    /// Whether there is a later page.
    pub fn can_go_next(&self) -> bool {
        !self.view.paginator.on_last_page()
    }

    /// Jumps to page 1.
    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    /// Goes back one page; no-op on the first page.
    pub fn prev_page(&mut self) {
        if self.can_go_prev() {
            self.go_to_page(self.page() - 1);
        }
    }

    /// Goes forward one page; no-op on the last page.
    pub fn next_page(&mut self) {
        if self.can_go_next() {
            self.go_to_page(self.page() + 1);
        }
    }

    /// Jumps to the last page.
    pub fn last_page(&mut self) {
        self.go_to_page(self.total_pages().max(1));
    }

    /// Moves to `page`, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        if page != self.page() {
            trace!("Page {} -> {}", self.page(), page);
            self.query.page = page;
            self.cursor = 0;
            self.refresh();
        }
    }

    // ----- selection -----

    /// Selects the whole page, or clears the selection if it is already
    /// entirely selected.
    ///
    /// Selecting replaces the selection with exactly the page's rows. An
    /// empty page selects nothing.
    pub fn toggle_select_all(&mut self) {
        let ids = self.page_ids();
        if self.selection.contains_all(&ids) {
            self.selection.clear();
        } else {
            self.selection.replace(ids);
        }
        debug!("Selected {} rows", self.selection.len());
    }

    /// Flips selection of the row at `page_pos` on the current page.
    pub fn toggle_row(&mut self, page_pos: usize) -> Result<()> {
        let index = *self
            .view
            .page_indices()
            .get(page_pos)
            .ok_or(Error::RowOutOfRange(page_pos))?;
        let id = self.row_id(index);
        self.selection.toggle(id);
        Ok(())
    }

    /// Whether the row at `page_pos` on the current page is selected.
    pub fn is_selected(&self, page_pos: usize) -> bool {
        self.view
            .page_indices()
            .get(page_pos)
            .is_some_and(|&i| self.selection.contains(&self.row_id(i)))
    }

    /// Whether the page is non-empty and every row on it is selected.
    pub fn all_on_page_selected(&self) -> bool {
        self.selection.contains_all(&self.page_ids())
    }

    /// Selected ids in source order.
    pub fn selected_ids(&self) -> Vec<RowId> {
        (0..self.rows.len())
            .map(|i| self.row_id(i))
            .filter(|id| self.selection.contains(id))
            .collect()
    }

    /// Selected rows in source order, including ones hidden by search or filters.
    pub fn selected_rows(&self) -> Vec<&Row> {
        (0..self.rows.len())
            .filter(|&i| self.selection.contains(&self.row_id(i)))
            .map(|i| &self.rows[i])
            .collect()
    }

    /// Page positions of selected rows on the current page.
    pub fn selected_page_indices(&self) -> Vec<usize> {
        (0..self.view.page_indices().len())
            .filter(|&pos| self.is_selected(pos))
            .collect()
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ----- actions -----

    /// Actions whose visibility predicate accepts `row`, in configured order.
    pub fn visible_actions(&self, row: &Row) -> Vec<&Action> {
        self.actions.iter().filter(|a| a.is_visible(row)).collect()
    }

    /// The first two visible actions, drawn inline.
    pub fn inline_actions(&self, row: &Row) -> Vec<&Action> {
        self.visible_actions(row).into_iter().take(2).collect()
    }

    /// Visible actions past the first two, reachable via the overflow menu.
    pub fn overflow_actions(&self, row: &Row) -> Vec<&Action> {
        self.visible_actions(row).into_iter().skip(2).collect()
    }

    /// Runs the visible action `id` on the row at `page_pos`.
    pub fn invoke_action(&self, id: &str, page_pos: usize) -> Result<Option<Cmd>> {
        let row = self
            .page_row(page_pos)
            .ok_or(Error::RowOutOfRange(page_pos))?;
        let action = self
            .visible_actions(row)
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::UnknownAction(id.to_string()))?;
        debug!("Action {} on page row {}", id, page_pos);
        Ok((action.on_click)(row))
    }

    // ----- export -----

    /// Whether an export callback is installed.
    pub fn has_export(&self) -> bool {
        self.on_export.is_some()
    }

    /// Fires the export callback, if any.
    pub fn export(&self) -> Option<Cmd> {
        let on_export = self.on_export.as_ref()?;
        debug!("Export requested");
        on_export()
    }

    // ----- copy -----

    /// The cursor row as one CSV line in column order.
    pub fn cursor_row_csv(&self) -> Option<String> {
        let row = self.cursor_row()?;
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|c| csv_cell(&row.get(&c.key).to_string()))
            .collect();
        Some(cells.join(","))
    }

    /// Copies the cursor row to the system clipboard as CSV.
    ///
    /// The copy runs as a command and reports back with a [`CopyMsg`].
    pub fn copy_row(&self) -> Option<Cmd> {
        let line = self.cursor_row_csv()?;
        Some(bubbletea_rs::tick(Duration::from_nanos(1), move |_| {
            Box::new(CopyMsg(write_clipboard(line.clone()))) as Msg
        }))
    }
}

/// Quotes a CSV cell containing whitespace, commas or quotes.
pub fn csv_cell(content: &str) -> String {
    if content.contains([' ', '\t', ',', '"']) {
        format!("\"{}\"", content.replace('"', "\"\""))
    } else {
        content.to_string()
    }
}

#[cfg(feature = "clipboard-support")]
fn write_clipboard(contents: String) -> Result<String> {
    use clipboard::{ClipboardContext, ClipboardProvider};
    let mut ctx: ClipboardContext = ClipboardProvider::new()
        .map_err(|e| Error::Clipboard(format!("failed to create clipboard context: {}", e)))?;
    ctx.set_contents(contents.clone())
        .map_err(|e| Error::Clipboard(format!("failed to write clipboard: {}", e)))?;
    Ok(contents)
}

#[cfg(not(feature = "clipboard-support"))]
fn write_clipboard(_contents: String) -> Result<String> {
    Err(Error::Clipboard("clipboard support not enabled".to_string()))
}
