//! Typed filter sets for list endpoints.
//!
//! Filters are an explicit mapping from filter-field name to value, checked
//! against a per-endpoint allow-list before any request is built. Keys are
//! written in snake_case by the caller and translated to the server's
//! camelCase on the wire.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use mstr_core::error::{MstrError, MstrResult};

/// A single filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// String-valued filter (names, ids, owners).
    Str(String),
    /// Integer-valued filter (types, subtypes, versions).
    Int(i64),
    /// Boolean-valued filter (certified flags).
    Bool(bool),
    /// Date-valued filter (creation/modification ranges).
    Date(NaiveDate),
}

impl FilterValue {
    /// Render the value for the query string.
    fn to_query_value(&self) -> String {
        match self {
            FilterValue::Str(s) => s.clone(),
            FilterValue::Int(i) => i.to_string(),
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Str(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Str(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(v: NaiveDate) -> Self {
        FilterValue::Date(v)
    }
}

/// An open mapping from filter-field name to value.
///
/// No validation is applied beyond the endpoint allow-list; values pass
/// through to the server with standard query serialization.
#[derive(Debug, Clone, Default)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, replacing any previous value for the same field.
    pub fn with(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    /// Whether the set contains no filters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject filter fields the endpoint does not support.
    ///
    /// Runs before any request is built, so an unknown key surfaces as a
    /// configuration error rather than a server-side rejection.
    pub fn validate(&self, allowed: &[&str]) -> MstrResult<()> {
        for key in self.0.keys() {
            if !allowed.contains(&key.as_str()) {
                return Err(MstrError::Config(format!(
                    "unknown filter field '{key}'; supported fields: {}",
                    allowed.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Serialize the filters as query parameters with camelCase keys.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (snake_to_camel(k), v.to_query_value()))
            .collect()
    }
}

/// Translate a snake_case field name to the server's camelCase.
fn snake_to_camel(field: &str) -> String {
    let mut parts = field.split('_');
    let mut out = String::with_capacity(field.len());
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        let mut chars = part.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
