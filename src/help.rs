//! Help line rendered from a [`KeyMap`].
//!
//! The table embeds a help [`Model`] in its footer. In compact mode the
//! enabled bindings are laid out on a single line separated by bullets; in
//! expanded mode each group returned by [`KeyMap::full_help`] becomes a column.
//! Content that does not fit `width` is cut off with an ellipsis.

use crate::key;
pub use crate::key::KeyMap;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Truncation marker.
    pub ellipsis: Style,
    /// Key labels in the compact view.
    pub short_key: Style,
    /// Descriptions in the compact view.
    pub short_desc: Style,
    /// Separator between compact items.
    pub short_separator: Style,
    /// Key labels in the expanded view.
    pub full_key: Style,
    /// Descriptions in the expanded view.
    pub full_desc: Style,
    /// Gap between expanded columns.
    pub full_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// Help view state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Show the expanded, multi-column help.
    pub show_all: bool,
    /// Maximum width; 0 means unlimited.
    pub width: usize,
    /// Separator between compact items.
    pub short_separator: String,
    /// Separator between expanded columns.
    pub full_separator: String,
    /// Truncation marker.
    pub ellipsis: String,
    /// Styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help model with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders compact or expanded help depending on `show_all`.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    /// Renders bindings on a single line.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self
            .styles
            .short_separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        let mut out = String::new();
        let mut total_width = 0;
        for kb in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = kb.help();
            let item = format!(
                "{}{} {}",
                sep,
                self.styles.short_key.clone().inline(true).render(&help.key),
                self.styles.short_desc.clone().inline(true).render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.overflow_tail(total_width, item_width) {
                out.push_str(&tail);
                break;
            }
            total_width += item_width;
            out.push_str(&item);
        }
        out
    }

    /// Renders binding groups as columns.
    pub fn full_help_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        let separator = self
            .styles
            .full_separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        let mut columns: Vec<String> = Vec::new();
        let mut total_width = 0;
        for group in groups {
            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    format!(
                        "{} {}",
                        self.styles.full_key.clone().inline(true).render(&help.key),
                        self.styles.full_desc.clone().inline(true).render(&help.desc)
                    )
                })
                .collect();
            if rows.is_empty() {
                continue;
            }

            let column = rows.join("\n");
            let column_width = lipgloss::width_visible(&column);
            if let Some(tail) = self.overflow_tail(total_width, column_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }
            total_width += column_width;
            columns.push(column);
        }

        let mut parts: Vec<&str> = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(column.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    // Some(tail) when the next item does not fit; the tail is the ellipsis if
    // there is room for it, empty otherwise.
    fn overflow_tail(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(
            " {}",
            self.styles.ellipsis.clone().inline(true).render(&self.ellipsis)
        );
        if total_width + lipgloss::width_visible(&tail) < self.width {
            Some(tail)
        } else {
            Some(String::new())
        }
    }
}
