//! Redirect rule data model.
//!
//! # Responsibilities
//! - Represent a single redirect rule (host, path, query constraints, destination)
//! - Represent a rule's required query parameters (one value per key)
//! - Represent an inbound request's query parameters (a key may repeat)
//! - Count satisfied constraints for specificity ranking
//!
//! # Design Decisions
//! - Constraints are key -> exactly one required value; a repeated key in the
//!   source URL keeps the first value
//! - Request parameters keep all values for a key; any one equal value
//!   satisfies that key's constraint
//! - Extra request parameters never disqualify a rule

use std::borrow::Cow;
use std::collections::HashMap;

/// Query parameters a rule requires for a scored match.
///
/// An empty set marks the rule as the default for its host+path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryConstraint {
    required: HashMap<String, String>,
}

impl QueryConstraint {
    /// Build from decoded query pairs. When a key repeats, the first value wins.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    {
        let mut required = HashMap::new();
        for (key, value) in pairs {
            required.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self { required }
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    /// Count how many required parameters the request satisfies.
    ///
    /// A key is satisfied when the request supplies it with at least one value
    /// equal to the required value; a key contributes at most 1 no matter how
    /// often the request repeats it.
    pub fn match_count(&self, params: &QueryParams) -> usize {
        self.required
            .iter()
            .filter(|(key, required)| params.values(key).any(|v| v == required.as_str()))
            .count()
    }
}

/// Query parameters of an inbound request, decoded from the raw query string.
///
/// Keys may repeat with distinct values. Order is preserved from the wire but
/// carries no meaning for matching.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw (percent-encoded) query string, e.g. `a=1&b=2&a=3`.
    pub fn parse(raw: &str) -> Self {
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// All values the request supplies for `key`, in wire order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A single redirect rule.
///
/// Host and path are exact-match only. The destination is an opaque string
/// copied verbatim from the rules file; it is never rebuilt or extended with
/// the request's own query string.
#[derive(Debug, Clone)]
pub struct RedirectRule {
    pub host: String,
    pub path: String,
    pub constraints: QueryConstraint,
    pub destination: String,
}
