//! Core types for the data table.
//!
//! This module contains the row model and the declarative descriptors that
//! configure a table:
//! - `Value` and `Row` for the opaque, field-keyed records being displayed
//! - `RowId` for stable selection identity
//! - `Column`, `Action` and `Filter` descriptors
//! - `SortSpec`, `SortDirection` and `SearchMode` for view state

use bubbletea_rs::Cmd;
use lipgloss_extras::prelude::Style;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A dynamically typed cell value.
///
/// # Ordering
///
/// [`Value::compare`] orders numbers numerically (integers and floats mix),
/// text by code point and booleans `false < true`. Values of different kinds
/// have no natural order; they are ranked `Null < Bool < Number < Text`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing or empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
        }
    }

    /// Total order used for sorting.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

static NULL: Value = Value::Null;

/// One record: an insertion-ordered bag of named values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Adds or replaces a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    /// The value of a field; missing fields read as [`Value::Null`].
    pub fn get(&self, key: &str) -> &Value {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .unwrap_or(&NULL)
    }

    /// Whether the field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Iterates fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

/// Stable identity of a row, used as the selection key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowId {
    /// String form of the configured key field.
    Key(String),
    /// Index in the source collection.
    Position(usize),
}

/// Renders a cell from its raw value and the whole row.
pub type RenderFn = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Handler run when an action is activated on a row.
pub type ActionFn = Arc<dyn Fn(&Row) -> Option<Cmd> + Send + Sync>;

/// Visibility predicate of an action.
pub type ShowFn = Arc<dyn Fn(&Row) -> bool + Send + Sync>;

/// Handler run when the export affordance is activated.
pub type ExportFn = Arc<dyn Fn() -> Option<Cmd> + Send + Sync>;

/// Describes how one field is labelled, sorted and rendered.
#[derive(Clone)]
pub struct Column {
    /// Field key in the row.
    pub key: String,
    /// Header label.
    pub label: String,
    /// Whether the header can be used for sorting.
    pub sortable: bool,
    /// Custom cell renderer.
    pub render: Option<RenderFn>,
    /// Style applied to body cells of this column.
    pub style: Option<Style>,
}

impl Column {
    /// Creates a plain, unsortable column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            render: None,
            style: None,
        }
    }

    /// Marks the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets a custom renderer.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Sets the body cell style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// The text shown for this column in `row`.
    pub fn display(&self, row: &Row) -> String {
        let value = row.get(&self.key);
        match &self.render {
            Some(render) => render(value, row),
            None => value.to_string(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Visual variant of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    /// Regular action.
    #[default]
    Default,
    /// Destructive action, drawn in the danger color.
    Danger,
}

/// A per-row action.
#[derive(Clone)]
pub struct Action {
    /// Identifier passed to [`invoke_action`](super::Model::invoke_action).
    pub id: String,
    /// Label shown in the actions column.
    pub label: String,
    /// Optional glyph drawn before the label.
    pub icon: Option<String>,
    /// Handler.
    pub on_click: ActionFn,
    /// Visual variant.
    pub variant: ActionVariant,
    /// Visibility predicate; `None` means always visible.
    pub show: Option<ShowFn>,
}

impl Action {
    /// Creates an action.
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, on_click: F) -> Self
    where
        F: Fn(&Row) -> Option<Cmd> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            on_click: Arc::new(on_click),
            variant: ActionVariant::Default,
            show: None,
        }
    }

    /// Sets the icon glyph.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Marks the action destructive.
    pub fn danger(mut self) -> Self {
        self.variant = ActionVariant::Danger;
        self
    }

    /// Only shows the action for rows matching `show`.
    pub fn with_show<F>(mut self, show: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        self.show = Some(Arc::new(show));
        self
    }

    /// Whether the action applies to `row`.
    pub fn is_visible(&self, row: &Row) -> bool {
        self.show.as_ref().map_or(true, |show| show(row))
    }

    /// The text drawn for this action.
    pub fn caption(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {}", icon, self.label),
            None => self.label.clone(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("variant", &self.variant)
            .field("show", &self.show.is_some())
            .finish()
    }
}

/// The `{view, edit, delete}` triple used when no actions are configured.
pub fn default_actions() -> Vec<Action> {
    vec![
        Action::new("view", "View", |_| None).with_icon("👁"),
        Action::new("edit", "Edit", |_| None).with_icon("✎"),
        Action::new("delete", "Delete", |_| None).with_icon("🗑").danger(),
    ]
}

/// One entry of a filter select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Value compared against the field.
    pub value: String,
    /// Label shown in the select.
    pub label: String,
}

impl FilterOption {
    /// Creates an option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// An exact-match, single-select filter over one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field key in the row.
    pub key: String,
    /// Label shown while nothing is selected.
    pub label: String,
    /// Selectable options.
    pub options: Vec<FilterOption>,
}

impl Filter {
    /// Creates a filter without options.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            options: Vec::new(),
        }
    }

    /// Adds an option (builder pattern).
    pub fn with_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(FilterOption::new(value, label));
        self
    }

    /// Label of the option with `value`.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Non-decreasing.
    Ascending,
    /// Non-increasing.
    Descending,
}

/// Active sort: which field and which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field key.
    pub key: String,
    /// Direction.
    pub direction: SortDirection,
}

/// How the search term is matched against field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Skim-style fuzzy match.
    Fuzzy,
}

/// Which control receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Row and column navigation.
    #[default]
    Table,
    /// Typing into the search box.
    Search,
    /// Choosing an option of the filter at this index.
    Filter(usize),
    /// Choosing an entry of the overflow action menu.
    Overflow,
}
