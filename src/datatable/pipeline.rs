//! Pure derivation of the visible page from rows and view state.
//!
//! [`derive`] runs search, filter, sort and pagination over index vectors in
//! one pass, so every field of a [`DerivedView`] comes from the same
//! [`Query`] snapshot. The source rows are never reordered or copied.

use super::types::{Row, SearchMode, SortDirection, SortSpec};
use crate::paginator;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// The view state that drives derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Search term; empty matches everything.
    pub search: String,
    /// How the term is matched.
    pub search_mode: SearchMode,
    /// Selected value per filter key. Empty values are ignored.
    pub filters: BTreeMap<String, String>,
    /// Active sort, if any.
    pub sort: Option<SortSpec>,
    /// Requested page, 1-based. Clamped by [`derive`].
    pub page: usize,
    /// Rows per page, at least 1.
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            search_mode: SearchMode::default(),
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size: 10,
        }
    }
}

/// One snapshot of the pipeline output.
#[derive(Debug, Clone)]
pub struct DerivedView {
    indices: Arc<Vec<usize>>,
    /// Page state, already clamped against the result count.
    pub paginator: paginator::Model,
}

impl Default for DerivedView {
    fn default() -> Self {
        Self {
            indices: Arc::new(Vec::new()),
            paginator: paginator::Model::new(),
        }
    }
}

impl DerivedView {
    /// Source indices of every result, in display order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Source indices of the current page.
    pub fn page_indices(&self) -> &[usize] {
        let (start, end) = self.bounds();
        &self.indices[start..end]
    }

    /// `[start, end)` of the current page within the results.
    pub fn bounds(&self) -> (usize, usize) {
        self.paginator.get_slice_bounds(self.indices.len())
    }

    /// Number of rows surviving search and filters.
    pub fn result_count(&self) -> usize {
        self.indices.len()
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.paginator.page
    }

    /// Number of pages; 0 when there are no results.
    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages
    }
}

/// Runs search, filter, sort and pagination.
///
/// ```rust
/// use bubbletea_datatable::datatable::pipeline::{derive, Query};
/// use bubbletea_datatable::datatable::{Row, SortDirection, SortSpec};
///
/// let rows = vec![
///     Row::new().with("name", "Bob").with("age", 30),
///     Row::new().with("name", "Ann").with("age", 25),
///     Row::new().with("name", "Cid").with("age", 40),
/// ];
/// let query = Query {
///     sort: Some(SortSpec { key: "age".into(), direction: SortDirection::Ascending }),
///     page_size: 2,
///     ..Query::default()
/// };
///
/// let view = derive(&rows, &query);
/// assert_eq!(view.page_indices(), &[1, 0]);
/// assert_eq!(view.total_pages(), 2);
/// ```
pub fn derive(rows: &[Row], query: &Query) -> DerivedView {
    let mut indices = search(rows, &query.search, query.search_mode);
    indices.retain(|&i| passes_filters(&rows[i], &query.filters));
    if let Some(spec) = &query.sort {
        sort(rows, &mut indices, spec);
    }

    let mut paginator = paginator::Model::new()
        .with_per_page(query.page_size)
        .with_total_items(indices.len());
    paginator.set_page(query.page);

    trace!(
        "Derived {} of {} rows, page {}/{}",
        indices.len(),
        rows.len(),
        paginator.page,
        paginator.total_pages
    );

    DerivedView {
        indices: Arc::new(indices),
        paginator,
    }
}

/// Indices of rows where any non-null field matches `term`.
pub fn search(rows: &[Row], term: &str, mode: SearchMode) -> Vec<usize> {
    if term.is_empty() {
        return (0..rows.len()).collect();
    }

    match mode {
        SearchMode::Substring => {
            let needle = term.to_lowercase();
            matching(rows, |text| text.to_lowercase().contains(&needle))
        }
        SearchMode::Fuzzy => {
            let matcher = SkimMatcherV2::default();
            matching(rows, |text| matcher.fuzzy_match(text, term).is_some())
        }
    }
}

fn matching(rows: &[Row], mut hit: impl FnMut(&str) -> bool) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.values()
                .filter(|v| !v.is_null())
                .any(|v| hit(&v.to_string()))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Whether the row's string form equals every non-empty filter value.
pub fn passes_filters(row: &Row, filters: &BTreeMap<String, String>) -> bool {
    filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .all(|(key, value)| row.get(key).to_string() == *value)
}

/// Stable sort of `indices` by the raw field value.
pub fn sort(rows: &[Row], indices: &mut [usize], spec: &SortSpec) {
    indices.sort_by(|&a, &b| {
        let (a, b) = (rows[a].get(&spec.key), rows[b].get(&spec.key));
        match spec.direction {
            SortDirection::Ascending => a.compare(b),
            SortDirection::Descending => b.compare(a),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatable::types::Value;

    fn people() -> Vec<Row> {
        vec![
            Row::new().with("name", "Bob").with("age", 30),
            Row::new().with("name", "Ann").with("age", 25),
            Row::new().with("name", "Cid").with("age", 40),
        ]
    }

    fn by(key: &str, direction: SortDirection) -> Option<SortSpec> {
        Some(SortSpec {
            key: key.to_string(),
            direction,
        })
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let rows = people();
        assert_eq!(search(&rows, "an", SearchMode::Substring), vec![1]);
        assert_eq!(search(&rows, "AN", SearchMode::Substring), vec![1]);
        assert_eq!(search(&rows, "40", SearchMode::Substring), vec![2]);
        assert_eq!(search(&rows, "", SearchMode::Substring), vec![0, 1, 2]);
        assert!(search(&rows, "zzz", SearchMode::Substring).is_empty());
    }

    #[test]
    fn test_search_skips_null_fields() {
        let rows = vec![Row::new().with("name", "x").with("note", Value::Null)];
        assert!(search(&rows, "null", SearchMode::Substring).is_empty());
        assert_eq!(search(&rows, "x", SearchMode::Substring), vec![0]);
    }

    #[test]
    fn test_fuzzy_search() {
        let rows = people();
        assert_eq!(search(&rows, "cd", SearchMode::Fuzzy), vec![2]);
    }

    #[test]
    fn test_filters_compare_string_form() {
        let rows = people();
        let mut filters = BTreeMap::new();
        filters.insert("age".to_string(), "30".to_string());
        let hits: Vec<usize> = (0..3).filter(|&i| passes_filters(&rows[i], &filters)).collect();
        assert_eq!(hits, vec![0]);

        filters.insert("age".to_string(), String::new());
        assert!(rows.iter().all(|r| passes_filters(r, &filters)));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let rows = vec![
            Row::new().with("role", "admin").with("status", "active"),
            Row::new().with("role", "admin").with("status", "suspended"),
            Row::new().with("role", "user").with("status", "active"),
        ];
        let mut filters = BTreeMap::new();
        filters.insert("role".to_string(), "admin".to_string());
        filters.insert("status".to_string(), "active".to_string());
        let hits: Vec<usize> = (0..3).filter(|&i| passes_filters(&rows[i], &filters)).collect();
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let rows = vec![
            Row::new().with("k", 1).with("n", "a"),
            Row::new().with("k", 0).with("n", "b"),
            Row::new().with("k", 1).with("n", "c"),
            Row::new().with("k", 0).with("n", "d"),
        ];
        let mut asc = vec![0, 1, 2, 3];
        sort(&rows, &mut asc, &by("k", SortDirection::Ascending).unwrap());
        assert_eq!(asc, vec![1, 3, 0, 2]);

        let mut desc = vec![0, 1, 2, 3];
        sort(&rows, &mut desc, &by("k", SortDirection::Descending).unwrap());
        assert_eq!(desc, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_derive_paginates_sorted_results() {
        let rows = people();
        let mut query = Query {
            sort: by("age", SortDirection::Ascending),
            page_size: 2,
            ..Query::default()
        };
        let view = derive(&rows, &query);
        assert_eq!(view.page_indices(), &[1, 0]);
        assert_eq!(view.total_pages(), 2);

        query.page = 2;
        let view = derive(&rows, &query);
        assert_eq!(view.page_indices(), &[2]);
        assert_eq!(view.bounds(), (2, 3));
    }

    #[test]
    fn test_derive_clamps_page() {
        let rows = people();
        let query = Query {
            search: "Ann".to_string(),
            page: 7,
            page_size: 1,
            ..Query::default()
        };
        let view = derive(&rows, &query);
        assert_eq!(view.page(), 1);
        assert_eq!(view.page_indices(), &[1]);

        let empty = derive(&[], &Query::default());
        assert_eq!(empty.page(), 1);
        assert_eq!(empty.total_pages(), 0);
        assert!(empty.page_indices().is_empty());
    }

    #[test]
    fn test_search_and_filter_never_reorder() {
        let rows = people();
        let query = Query {
            search: "i".to_string(),
            ..Query::default()
        };
        assert_eq!(derive(&rows, &query).indices(), &[2]);
        let all = derive(&rows, &Query::default());
        assert_eq!(all.indices(), &[0, 1, 2]);
    }
}
