//! Styling for the data table.
//!
//! All defaults use `AdaptiveColor`, so the table reads well on light and dark
//! terminals alike.
//!
//! ```rust
//! use bubbletea_datatable::datatable::TableStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = TableStyles::default();
//! styles.header = Style::new().bold(true);
//! ```

use lipgloss_extras::prelude::*;

/// Truncation marker for cells wider than their column.
pub const ELLIPSIS: &str = "…";

/// Overflow menu indicator drawn in the actions column.
pub const KEBAB: &str = "⋮";

/// Sort marker for ascending order.
pub const ARROW_UP: &str = "↑";

/// Sort marker for descending order.
pub const ARROW_DOWN: &str = "↓";

/// Styles for every part of the table.
#[derive(Debug, Clone)]
pub struct TableStyles {
    /// Table title.
    pub title: Style,
    /// Search box while it has focus.
    pub search_focused: Style,
    /// Search box without focus.
    pub search_blurred: Style,
    /// Placeholder text of the empty search box.
    pub placeholder: Style,
    /// A filter without a selected value.
    pub filter: Style,
    /// A filter with a selected value.
    pub filter_active: Style,
    /// The focused filter.
    pub filter_focused: Style,
    /// Export affordance.
    pub export: Style,
    /// Results and selection lines.
    pub status: Style,
    /// Header cells.
    pub header: Style,
    /// Header cell of the focused column.
    pub header_focused: Style,
    /// Body cells.
    pub cell: Style,
    /// The cursor row.
    pub cursor_row: Style,
    /// Selected rows.
    pub selected_row: Style,
    /// Regular action labels.
    pub action: Style,
    /// Destructive action labels.
    pub action_danger: Style,
    /// Overflow indicator.
    pub overflow: Style,
    /// Overflow menu box.
    pub menu: Style,
    /// Highlighted overflow menu entry.
    pub menu_cursor: Style,
    /// Page indicator.
    pub page_label: Style,
    /// Enabled pagination controls.
    pub page_control: Style,
    /// Disabled pagination controls.
    pub page_control_disabled: Style,
    /// Loading placeholder blocks.
    pub skeleton: Style,
    /// Help footer.
    pub help: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let very_subdued = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };
        let accent = AdaptiveColor {
            Light: "#EE6FF8",
            Dark: "#EE6FF8",
        };
        let text = AdaptiveColor {
            Light: "#1a1a1a",
            Dark: "#dddddd",
        };

        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            search_focused: Style::new().foreground(accent.clone()),
            search_blurred: Style::new().foreground(text.clone()),
            placeholder: Style::new().foreground(subdued.clone()),
            filter: Style::new().foreground(subdued.clone()),
            filter_active: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            filter_focused: Style::new().foreground(accent.clone()).underline(true),
            export: Style::new().foreground(text.clone()).bold(true),
            status: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            header: Style::new().foreground(text.clone()).bold(true),
            header_focused: Style::new().foreground(accent.clone()).bold(true),
            cell: Style::new().foreground(text),
            cursor_row: Style::new().foreground(accent.clone()),
            selected_row: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#04B575",
            }),
            action: Style::new().foreground(Color::from("62")),
            action_danger: Style::new().foreground(AdaptiveColor {
                Light: "#D70000",
                Dark: "#FF5F5F",
            }),
            overflow: Style::new().foreground(subdued.clone()),
            menu: Style::new().padding(0, 1, 0, 1),
            menu_cursor: Style::new().foreground(accent).bold(true),
            page_label: Style::new().foreground(subdued.clone()),
            page_control: Style::new().foreground(Color::from("62")),
            page_control_disabled: Style::new().foreground(subdued).faint(true),
            skeleton: Style::new().foreground(very_subdued),
            help: Style::new().padding(1, 0, 0, 0),
        }
    }
}
