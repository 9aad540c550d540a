//! Key classification.
//!
//! Partitions the request's keys against the table's column set into the
//! disjoint groups the predicate builder consumes. All output vectors
//! follow table-column order so generated clauses are deterministic
//! regardless of request iteration order.

use crate::params::{RESERVED_PARAMS, RequestParams};
use std::collections::HashSet;

/// Configuration for one filtering call.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Keys removed from consideration before anything else.
    pub excluded_keys: Vec<String>,
    /// Columns filtered by substring match instead of equality.
    pub like_keys: Vec<String>,
}

impl FilterOptions {
    /// Options with no exclusions and no like-columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the excluded keys.
    pub fn with_excluded<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.excluded_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the substring-match keys.
    pub fn with_like<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.like_keys = keys.into_iter().map(Into::into).collect();
        self
    }
}

/// Disjoint partition of request keys and table columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyClassification {
    /// Requested columns matched by substring.
    pub like_keys: Vec<String>,
    /// Requested columns matched by equality or set membership.
    pub equality_keys: Vec<String>,
    /// Columns eligible for substring matching during global search:
    /// table columns minus like-designated minus excluded.
    pub like_diff_columns: Vec<String>,
    /// Like-designated columns that exist on the table, minus excluded.
    pub like_columns: Vec<String>,
}

/// Partition request keys against the table's columns.
///
/// Exclusion wins over everything: an excluded key is invisible to every
/// later step even if it is also like-designated or present in the
/// request. Reserved control parameters (`q`, `sortBy`, `sortByDesc`) are
/// never filterable. Names in `excluded_keys`/`like_keys` that match no
/// real column are silently ignored.
pub fn classify(
    params: &RequestParams,
    table_columns: &[String],
    options: &FilterOptions,
) -> KeyClassification {
    let excluded: HashSet<&str> = options.excluded_keys.iter().map(String::as_str).collect();
    let like: HashSet<&str> = options.like_keys.iter().map(String::as_str).collect();

    // Request key universe after step 1: reserved and excluded keys gone.
    let requested: HashSet<&str> = params
        .keys()
        .filter(|k| !RESERVED_PARAMS.contains(k))
        .filter(|k| !excluded.contains(k))
        .collect();

    let mut classification = KeyClassification::default();

    for column in table_columns {
        let col = column.as_str();
        if excluded.contains(col) {
            continue;
        }

        if like.contains(col) {
            classification.like_columns.push(column.clone());
        } else {
            classification.like_diff_columns.push(column.clone());
        }

        if requested.contains(col) {
            if like.contains(col) {
                classification.like_keys.push(column.clone());
            } else {
                classification.equality_keys.push(column.clone());
            }
        }
    }

    tracing::debug!(
        like_keys = classification.like_keys.len(),
        equality_keys = classification.equality_keys.len(),
        like_diff_columns = classification.like_diff_columns.len(),
        "classified request keys"
    );

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partitions_request_keys_by_like_designation() {
        let params = RequestParams::from_pairs([("name", "Jo"), ("status", "active")]);
        let cols = columns(&["id", "name", "email", "status"]);
        let options = FilterOptions::new().with_like(["name"]);

        let c = classify(&params, &cols, &options);

        assert_eq!(c.like_keys, vec!["name"]);
        assert_eq!(c.equality_keys, vec!["status"]);
        assert_eq!(c.like_diff_columns, vec!["id", "email", "status"]);
        assert_eq!(c.like_columns, vec!["name"]);
    }

    #[test]
    fn like_and_equality_keys_are_disjoint_subsets_of_columns() {
        let params = RequestParams::from_pairs([
            ("id", "1"),
            ("name", "Jo"),
            ("email", "jo@example.com"),
            ("unknown", "x"),
        ]);
        let cols = columns(&["id", "name", "email", "status"]);
        let options = FilterOptions::new().with_like(["name", "email"]);

        let c = classify(&params, &cols, &options);

        for key in &c.like_keys {
            assert!(!c.equality_keys.contains(key));
            assert!(cols.contains(key));
        }
        for key in &c.equality_keys {
            assert!(cols.contains(key));
        }
        assert!(!c.equality_keys.contains(&"unknown".to_string()));
    }

    #[test]
    fn exclusion_beats_like_designation_and_request_presence() {
        let params = RequestParams::from_pairs([("name", "Jo"), ("secret", "x")]);
        let cols = columns(&["id", "name", "secret"]);
        let options = FilterOptions::new()
            .with_excluded(["secret", "name"])
            .with_like(["name"]);

        let c = classify(&params, &cols, &options);

        assert!(c.like_keys.is_empty());
        assert!(c.equality_keys.is_empty());
        assert!(c.like_columns.is_empty());
        assert_eq!(c.like_diff_columns, vec!["id"]);
    }

    #[test]
    fn reserved_params_are_never_filterable() {
        // Even a real column named "q" is shadowed by the control parameter.
        let params = RequestParams::from_pairs([("q", "search"), ("sortBy", "name")]);
        let cols = columns(&["id", "q", "sortBy"]);

        let c = classify(&params, &cols, &FilterOptions::new());

        assert!(c.equality_keys.is_empty());
        assert!(c.like_keys.is_empty());
    }

    #[test]
    fn output_follows_table_column_order() {
        let params = RequestParams::from_pairs([("c", "3"), ("a", "1"), ("b", "2")]);
        let cols = columns(&["a", "b", "c"]);

        let c = classify(&params, &cols, &FilterOptions::new());

        assert_eq!(c.equality_keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_names_in_options_are_ignored() {
        let params = RequestParams::from_pairs([("name", "Jo")]);
        let cols = columns(&["id", "name"]);
        let options = FilterOptions::new()
            .with_excluded(["ghost"])
            .with_like(["phantom"]);

        let c = classify(&params, &cols, &options);

        assert_eq!(c.equality_keys, vec!["name"]);
        assert_eq!(c.like_diff_columns, vec!["id", "name"]);
        assert!(c.like_columns.is_empty());
    }
}
