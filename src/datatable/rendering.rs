//! View rendering for the data table.
//!
//! The view is composed top to bottom from: title, controls (search box,
//! filter strip, export), results and selection lines, the table itself,
//! the pagination row, the overflow menu and the help footer. While loading
//! only a skeleton is drawn.

use super::style::{ARROW_DOWN, ARROW_UP, ELLIPSIS, KEBAB};
use super::types::{ActionVariant, Focus, SortDirection};
use super::Model;
use lipgloss_extras::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SKELETON_ROWS: usize = 5;
const SKELETON_WIDTH: usize = 60;
const SKELETON_BLOCK: &str = "░";
const COLUMN_GAP: &str = "  ";

/// Terminal cell width of `s`, ignoring ANSI escape sequences.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi_escapes::strip_str(s).as_str())
}

/// Cuts `s` down to `width` cells, ending in an ellipsis when shortened.
///
/// Styled text that needs cutting loses its styling.
pub fn truncate(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let plain = strip_ansi_escapes::strip_str(s);
    let budget = width - ELLIPSIS.width();
    let mut out = String::new();
    let mut used = 0;
    for ch in plain.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Right-pads `s` with spaces to `width` cells.
pub fn pad(s: &str, width: usize) -> String {
    let w = display_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

fn render(style: &Style, s: &str) -> String {
    style.clone().inline(true).render(s)
}

impl Model {
    pub(super) fn view_skeleton(&self) -> String {
        let width = if self.width > 0 {
            self.width
        } else {
            SKELETON_WIDTH
        };
        let bar = render(&self.styles.skeleton, &SKELETON_BLOCK.repeat(width / 3));
        let row = render(&self.styles.skeleton, &SKELETON_BLOCK.repeat(width));

        let mut lines = vec![bar, String::new()];
        lines.extend(std::iter::repeat(row).take(SKELETON_ROWS));
        lines.join("\n")
    }

    pub(super) fn view_title(&self) -> Option<String> {
        self.title
            .as_ref()
            .map(|title| render(&self.styles.title, title))
    }

    pub(super) fn view_controls(&self) -> String {
        let mut parts = vec![self.view_search_box()];

        for (i, filter) in self.filters.iter().enumerate() {
            let (text, style) = match self.filter_value(&filter.key) {
                Some(value) => (
                    filter.option_label(value).unwrap_or(value).to_string(),
                    &self.styles.filter_active,
                ),
                None => (filter.label.clone(), &self.styles.filter),
            };
            let style = if self.focus == Focus::Filter(i) {
                &self.styles.filter_focused
            } else {
                style
            };
            parts.push(render(style, &format!("[{} ▾]", text)));
        }

        if self.has_export() {
            parts.push(render(&self.styles.export, "[Export]"));
        }

        parts.join(COLUMN_GAP)
    }

    fn view_search_box(&self) -> String {
        let focused = self.focus == Focus::Search;
        let style = if focused {
            &self.styles.search_focused
        } else {
            &self.styles.search_blurred
        };
        let prompt = render(style, "/ ");

        let term = self.search();
        let body = if term.is_empty() && !focused {
            render(&self.styles.placeholder, &self.search_placeholder)
        } else if focused {
            format!("{}█", render(style, term))
        } else {
            render(style, term)
        };
        format!("{}{}", prompt, body)
    }

    /// The `Showing a to b of n results` line.
    pub fn results_line(&self) -> String {
        let count = self.result_count();
        if count == 0 {
            return "0 results".to_string();
        }
        let (start, end) = self.view.bounds();
        format!("Showing {} to {} of {} results", start + 1, end, count)
    }

    pub(super) fn view_status(&self) -> String {
        let mut lines = vec![render(&self.styles.status, &self.results_line())];
        if self.selected_count() > 0 {
            lines.push(render(
                &self.styles.status,
                &format!("{} items selected", self.selected_count()),
            ));
        }
        if let Some(message) = &self.status_message {
            lines.push(render(&self.styles.status, message));
        }
        lines.join("\n")
    }

    fn header_label(&self, index: usize) -> String {
        let column = &self.columns[index];
        match self.sort_spec() {
            Some(spec) if spec.key == column.key => {
                let arrow = match spec.direction {
                    SortDirection::Ascending => ARROW_UP,
                    SortDirection::Descending => ARROW_DOWN,
                };
                format!("{} {}", column.label, arrow)
            }
            _ => column.label.clone(),
        }
    }

    fn actions_cell(&self, page_pos: usize) -> String {
        let Some(row) = self.page_row(page_pos) else {
            return String::new();
        };
        let mut parts: Vec<String> = self
            .inline_actions(row)
            .iter()
            .map(|action| {
                let style = match action.variant {
                    ActionVariant::Default => &self.styles.action,
                    ActionVariant::Danger => &self.styles.action_danger,
                };
                render(style, &action.caption())
            })
            .collect();
        let more = self.overflow_actions(row).len();
        if more > 0 {
            parts.push(render(&self.styles.overflow, &format!("{} +{}", KEBAB, more)));
        }
        parts.join(" ")
    }

    pub(super) fn view_table(&self) -> String {
        let page_len = self.view.page_indices().len();
        let rows = self.page_rows();

        // Cell text per page row, per column, before styling
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| truncate(&c.display(row), self.max_column_width))
                    .collect()
            })
            .collect();
        let headers: Vec<String> = (0..self.columns.len())
            .map(|i| truncate(&self.header_label(i), self.max_column_width))
            .collect();
        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                cells
                    .iter()
                    .map(|r| display_width(&r[i]))
                    .chain(std::iter::once(display_width(h)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let actions: Vec<String> = (0..page_len).map(|pos| self.actions_cell(pos)).collect();
        let actions_label = "Actions";
        let actions_width = actions
            .iter()
            .map(|a| display_width(a))
            .chain(std::iter::once(actions_label.width()))
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(page_len + 2);

        let check_all = if self.all_on_page_selected() { "[x]" } else { "[ ]" };
        let mut header = vec![format!("  {}", render(&self.styles.header, check_all))];
        for (i, label) in headers.iter().enumerate() {
            let style = if i == self.column_cursor && self.focus == Focus::Table {
                &self.styles.header_focused
            } else {
                &self.styles.header
            };
            header.push(render(style, &pad(label, widths[i])));
        }
        header.push(render(&self.styles.header, &pad(actions_label, actions_width)));
        lines.push(header.join(COLUMN_GAP));

        let rule_width: usize =
            5 + widths.iter().sum::<usize>() + actions_width + COLUMN_GAP.len() * (widths.len() + 1);
        lines.push(render(&self.styles.skeleton, &"─".repeat(rule_width)));

        for (pos, row_cells) in cells.iter().enumerate() {
            let is_cursor = pos == self.cursor && self.focus != Focus::Search;
            let selected = self.is_selected(pos);
            let marker = if is_cursor {
                render(&self.styles.cursor_row, "›")
            } else {
                " ".to_string()
            };
            let checkbox = if selected {
                render(&self.styles.selected_row, "[x]")
            } else {
                "[ ]".to_string()
            };

            let mut line = vec![format!("{} {}", marker, checkbox)];
            for (i, text) in row_cells.iter().enumerate() {
                let style = if is_cursor {
                    &self.styles.cursor_row
                } else if let Some(style) = &self.columns[i].style {
                    style
                } else if selected {
                    &self.styles.selected_row
                } else {
                    &self.styles.cell
                };
                line.push(render(style, &pad(text, widths[i])));
            }
            line.push(actions[pos].clone());
            lines.push(line.join(COLUMN_GAP));
        }

        lines.join("\n")
    }

    pub(super) fn view_pagination(&self) -> Option<String> {
        if self.total_pages() <= 1 {
            return None;
        }

        let control = |label: &str, enabled: bool| {
            if enabled {
                render(&self.styles.page_control, label)
            } else {
                render(&self.styles.page_control_disabled, label)
            }
        };
        let prev = self.can_go_prev();
        let next = self.can_go_next();

        Some(
            [
                render(&self.styles.page_label, &self.view.paginator.view()),
                control("«", prev),
                control("‹", prev),
                render(&self.styles.page_control, &format!("[{}]", self.page())),
                control("›", next),
                control("»", next),
            ]
            .join(" "),
        )
    }

    pub(super) fn view_menu(&self) -> Option<String> {
        if self.focus != Focus::Overflow {
            return None;
        }
        let actions = self.overflow_actions_at_cursor();
        if actions.is_empty() {
            return None;
        }

        let lines: Vec<String> = actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                if i == self.menu_cursor {
                    render(&self.styles.menu_cursor, &format!("› {}", action.caption()))
                } else {
                    let style = match action.variant {
                        ActionVariant::Default => &self.styles.action,
                        ActionVariant::Danger => &self.styles.action_danger,
                    };
                    format!("  {}", render(style, &action.caption()))
                }
            })
            .collect();
        Some(self.styles.menu.clone().render(&lines.join("\n")))
    }

    pub(super) fn view_help(&self) -> String {
        self.styles.help.clone().render(&self.help.view(self))
    }

    /// Renders the whole component.
    pub(super) fn view_all(&self) -> String {
        if self.loading {
            return self.view_skeleton();
        }

        let mut sections = Vec::new();
        if let Some(title) = self.view_title() {
            sections.push(title);
        }
        sections.push(self.view_controls());
        sections.push(self.view_status());
        sections.push(self.view_table());
        if let Some(pagination) = self.view_pagination() {
            sections.push(pagination);
        }
        if let Some(menu) = self.view_menu() {
            sections.push(menu);
        }
        sections.push(self.view_help());
        sections.join("\n")
    }
}
