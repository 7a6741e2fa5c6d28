//! Rule index construction and lookup.
//!
//! # Responsibilities
//! - Validate source URLs (parseable, http or https)
//! - Store rules keyed by exact host+path concatenation
//! - Preserve insertion order within a key (defaults and tie-breaks depend on it)
//!
//! # Design Decisions
//! - Two-phase lifecycle: a builder owns all mutation during load, then a
//!   one-way `build()` freezes the index for lock-free concurrent reads
//! - The scheme is validated and discarded; `http://h/p` and `https://h/p`
//!   index to the same key
//! - No deduplication: identical rules both remain, the earlier one wins ties

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

use crate::rules::rule::{QueryConstraint, RedirectRule};

/// Why a source entry was rejected. Both cases are per-row and non-fatal to
/// the surrounding load.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid source format: {0}")]
    InvalidSourceFormat(String),

    #[error("invalid source scheme: {0}")]
    InvalidSourceScheme(String),
}

/// Mutable rule table used during the load phase.
///
/// Consumed by `build()`; there is no way to mutate the index afterwards.
#[derive(Debug, Default)]
pub struct RuleIndexBuilder {
    table: HashMap<String, Vec<RedirectRule>>,
    rule_count: usize,
}

impl RuleIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a source URL and append a rule for it.
    ///
    /// The destination is stored verbatim. Rules at the same key accumulate
    /// in call order; nothing is overwritten or reordered.
    pub fn add(&mut self, source: &str, destination: &str) -> Result<(), RuleError> {
        let url = Url::parse(source)
            .map_err(|_| RuleError::InvalidSourceFormat(source.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(RuleError::InvalidSourceScheme(source.to_string()));
        }

        let host = match url.port() {
            Some(port) => format!("{}:{}", url.host_str().unwrap_or(""), port),
            None => url.host_str().unwrap_or("").to_string(),
        };
        let path = url.path().to_string();
        let constraints = QueryConstraint::from_pairs(url.query_pairs());

        let key = format!("{host}{path}");
        let rule = RedirectRule {
            host,
            path,
            constraints,
            destination: destination.to_string(),
        };

        tracing::debug!(key = %key, destination = %rule.destination, "Rule added");

        self.table.entry(key).or_default().push(rule);
        self.rule_count += 1;
        Ok(())
    }

    /// Freeze the table. One-way transition from building to serving.
    pub fn build(self) -> RuleIndex {
        RuleIndex {
            table: self.table,
            rule_count: self.rule_count,
        }
    }
}

/// Immutable rule table shared by all request tasks.
#[derive(Debug)]
pub struct RuleIndex {
    table: HashMap<String, Vec<RedirectRule>>,
    rule_count: usize,
}

impl RuleIndex {
    /// Candidate rules for a host+path key, in the order they were added.
    pub fn lookup(&self, key: &str) -> Option<&[RedirectRule]> {
        self.table.get(key).map(Vec::as_slice)
    }

    /// Number of distinct host+path keys.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total number of rules across all keys.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }
}
