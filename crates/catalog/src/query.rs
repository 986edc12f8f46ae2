//! List filtering and sorting over records.
//!
//! Filters on the same path are alternatives (OR); filters on different
//! paths must all hold (AND). Text comparison ignores case.

use bookshelf_validator::form::{Record, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// FILTER
// ============================================================================

/// How a filter compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Field text contains the value.
    Contains,
    /// Field text equals the value.
    Eq,
}

/// A predicate on one record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Record key.
    pub path: String,
    /// Comparison.
    pub op: FilterOperator,
    /// Value to compare with.
    pub value: String,
}

impl Filter {
    /// `path` contains `value`.
    pub fn contains(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            op: FilterOperator::Contains,
            value: value.into(),
        }
    }

    /// `path` equals `value`.
    pub fn equals(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            op: FilterOperator::Eq,
            value: value.into(),
        }
    }

    /// Tests one record.
    pub fn matches(&self, record: &Record) -> bool {
        let field = record.text(&self.path).to_lowercase();
        let needle = self.value.to_lowercase();
        match self.op {
            FilterOperator::Contains => field.contains(&needle),
            FilterOperator::Eq => field == needle,
        }
    }
}

// ============================================================================
// SORTER
// ============================================================================

/// Orders records by one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorter {
    /// Record key.
    pub path: String,
    /// Largest first.
    #[serde(default)]
    pub descending: bool,
}

impl Sorter {
    /// Ascending by `path`.
    pub fn ascending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            descending: false,
        }
    }

    /// Descending by `path`.
    pub fn descending(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            descending: true,
        }
    }

    /// Compares two records.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = compare_values(a.get(&self.path), b.get(&self.path));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Missing and `Null` first, then numbers, dates and text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::Date(_)) => 2,
            Some(Value::Text(_)) => 3,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x.total_cmp(y),
        (Some(Value::Date(x)), Some(Value::Date(y))) => x.cmp(y),
        (Some(Value::Text(x)), Some(Value::Text(y))) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        _ => rank(a).cmp(&rank(b)),
    }
}

// ============================================================================
// QUERY
// ============================================================================

/// Filters plus an optional sorter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    /// Filters, grouped by path when applied.
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Sort order; insertion order when absent.
    #[serde(default)]
    pub sorter: Option<Sorter>,
}

impl Query {
    /// Matches everything, unsorted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter.
    #[must_use = "builder methods must be chained or built"]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the sorter.
    #[must_use = "builder methods must be chained or built"]
    pub fn sort_by(mut self, sorter: Sorter) -> Self {
        self.sorter = Some(sorter);
        self
    }

    /// Query for the book list: name search plus genre selection.
    ///
    /// Empty inputs add no filter.
    pub fn from_list_state(name_filter: &str, genre: &str) -> Self {
        let mut query = Self::new();
        if !name_filter.is_empty() {
            query = query.filter(Filter::contains("Name", name_filter));
        }
        if !genre.is_empty() {
            query = query.filter(Filter::equals("Genre", genre));
        }
        query
    }

    /// Tests one record against every filter group.
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().enumerate().all(|(i, filter)| {
            let first_of_path = self.filters[..i].iter().all(|f| f.path != filter.path);
            !first_of_path
                || self
                    .filters
                    .iter()
                    .filter(|f| f.path == filter.path)
                    .any(|f| f.matches(record))
        })
    }

    /// Filters and sorts `(id, record)` pairs. Sorting is stable.
    pub fn apply<T>(&self, rows: impl IntoIterator<Item = (T, Record)>) -> Vec<(T, Record)> {
        let mut kept: Vec<_> = rows
            .into_iter()
            .filter(|(_, record)| self.matches(record))
            .collect();
        if let Some(sorter) = &self.sorter {
            kept.sort_by(|(_, a), (_, b)| sorter.compare(a, b));
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_validator::record;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rows() -> Vec<(usize, Record)> {
        vec![
            (0, record! { "Name" => "Code of the North", "Genre" => "Technology", "Qty" => 5 }),
            (1, record! { "Name" => "Tech Patterns", "Genre" => "Technology", "Qty" => 7 }),
            (2, record! { "Name" => "Midnight Letters", "Genre" => "Romance", "Qty" => 0 }),
            (3, record! { "Name" => "The Silent Harbor", "Genre" => "Drama" }),
        ]
    }

    fn ids(query: &Query) -> Vec<usize> {
        query.apply(rows()).into_iter().map(|(id, _)| id).collect()
    }

    #[rstest]
    #[case("", "", vec![0, 1, 2, 3])]
    #[case("tech", "", vec![1])]
    #[case("T", "Technology", vec![0, 1])]
    #[case("", "romance", vec![2])]
    #[case("harbor", "Technology", vec![])]
    fn list_state(#[case] name: &str, #[case] genre: &str, #[case] expected: Vec<usize>) {
        assert_eq!(ids(&Query::from_list_state(name, genre)), expected);
    }

    #[test]
    fn same_path_filters_are_alternatives() {
        let query = Query::new()
            .filter(Filter::equals("Genre", "Drama"))
            .filter(Filter::equals("Genre", "Romance"))
            .filter(Filter::contains("Name", "e"));
        assert_eq!(ids(&query), vec![2, 3]);
    }

    #[test]
    fn sort_by_number_puts_missing_first() {
        let query = Query::new().sort_by(Sorter::ascending("Qty"));
        assert_eq!(ids(&query), vec![3, 2, 0, 1]);

        let query = Query::new().sort_by(Sorter::descending("Qty"));
        assert_eq!(ids(&query), vec![1, 0, 2, 3]);
    }

    #[test]
    fn sort_by_unknown_path_keeps_order() {
        let query = Query::new().sort_by(Sorter::descending("All"));
        assert_eq!(ids(&query), vec![0, 1, 2, 3]);
    }

    #[test]
    fn sort_text_ignores_case_and_dates_chronologically() {
        let day = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let rows = vec![
            (0, record! { "Name" => "beta", "Released" => day(2020) }),
            (1, record! { "Name" => "Alpha", "Released" => day(2010) }),
            (2, record! { "Name" => "gamma", "Released" => day(2015) }),
        ];

        let by_name: Vec<_> = Query::new()
            .sort_by(Sorter::ascending("Name"))
            .apply(rows.clone())
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(by_name, vec![1, 0, 2]);

        let by_date: Vec<_> = Query::new()
            .sort_by(Sorter::descending("Released"))
            .apply(rows)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(by_date, vec![0, 2, 1]);
    }
}
