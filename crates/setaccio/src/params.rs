//! Request parameter types.
//!
//! Incoming key/value parameters are untyped: a key may carry a single
//! scalar or an ordered list of scalars (`?status=active` vs
//! `?status[]=active&status[]=pending`). `ParamValue` makes that an
//! explicit sum type so every consumer branches exhaustively instead of
//! probing at runtime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved parameter: global free-text search value.
pub const GLOBAL_SEARCH_PARAM: &str = "q";

/// Reserved parameter: ascending sort column(s).
pub const SORT_BY_PARAM: &str = "sortBy";

/// Reserved parameter: descending sort column(s).
pub const SORT_BY_DESC_PARAM: &str = "sortByDesc";

/// Control parameters that are never treated as filterable columns,
/// even when a same-named column exists on the table.
pub const RESERVED_PARAMS: [&str; 3] = [GLOBAL_SEARCH_PARAM, SORT_BY_PARAM, SORT_BY_DESC_PARAM];

/// A single request parameter value: scalar or list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Single string value.
    Scalar(String),
    /// Ordered collection of string values.
    List(Vec<String>),
}

impl ParamValue {
    /// Whether this value should produce a filter condition.
    ///
    /// Empty strings and empty lists count as not filled.
    pub fn is_filled(&self) -> bool {
        match self {
            ParamValue::Scalar(s) => !s.is_empty(),
            ParamValue::List(items) => !items.is_empty(),
        }
    }

    /// View the value as a list of string slices (one element for scalars).
    pub fn as_slice(&self) -> Vec<&str> {
        match self {
            ParamValue::Scalar(s) => vec![s.as_str()],
            ParamValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Immutable map of request parameters for one filtering call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams {
    params: HashMap<String, ParamValue>,
}

impl RequestParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an iterator of key/value pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Insert or replace a parameter.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Look up a parameter value.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Whether the key is present at all.
    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Whether the key is present with a non-empty value.
    pub fn is_filled(&self, key: &str) -> bool {
        self.params.get(key).is_some_and(ParamValue::is_filled)
    }

    /// Get the value only when it is filled.
    pub fn filled(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key).filter(|v| v.is_filled())
    }

    /// Iterate over all parameter keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_list_deserialize_untagged() {
        let v: ParamValue = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(v, ParamValue::Scalar("active".to_string()));

        let v: ParamValue = serde_json::from_str(r#"["active", "pending"]"#).unwrap();
        assert_eq!(
            v,
            ParamValue::List(vec!["active".to_string(), "pending".to_string()])
        );
    }

    #[test]
    fn request_params_deserialize_from_json_map() {
        let json = r#"{"name": "Jo", "status": ["active", "pending"]}"#;
        let params: RequestParams = serde_json::from_str(json).unwrap();

        assert_eq!(params.get("name"), Some(&ParamValue::from("Jo")));
        assert!(params.is_filled("status"));
    }

    #[test]
    fn empty_values_are_not_filled() {
        let params = RequestParams::from_pairs([
            ("empty", ParamValue::from("")),
            ("empty_list", ParamValue::List(vec![])),
            ("filled", ParamValue::from("x")),
        ]);

        assert!(params.has("empty"));
        assert!(!params.is_filled("empty"));
        assert!(!params.is_filled("empty_list"));
        assert!(!params.is_filled("absent"));
        assert!(params.is_filled("filled"));
    }

    #[test]
    fn filled_filters_empty_values() {
        let mut params = RequestParams::new();
        params.set("a", "");
        params.set("b", "value");

        assert!(params.filled("a").is_none());
        assert_eq!(params.filled("b"), Some(&ParamValue::from("value")));
    }

    #[test]
    fn as_slice_unifies_scalar_and_list() {
        assert_eq!(ParamValue::from("x").as_slice(), vec!["x"]);
        assert_eq!(ParamValue::from(vec!["a", "b"]).as_slice(), vec!["a", "b"]);
    }
}
