//! Redirect rule subsystem.
//!
//! # Data Flow
//! ```text
//! rules file (comma-delimited, ordered)
//!     → loader.rs (read rows, skip bad rows)
//!     → index.rs (builder appends per host+path key)
//!     → RuleIndex (frozen, shared via Arc)
//!
//! Incoming request (host, path, query)
//!     → resolver.rs (scan candidates, rank by specificity)
//!     → Return: destination or no match
//! ```
//!
//! # Design Decisions
//! - Rules are compiled once at startup, immutable at runtime
//! - Candidate order within a key is a contract: it selects the default and
//!   breaks specificity ties
//! - Exact host+path keys only, no wildcards or regex
//! - Resolution is pure and lock-free

pub mod index;
pub mod loader;
pub mod resolver;
pub mod rule;

pub use index::{RuleError, RuleIndex, RuleIndexBuilder};
pub use loader::{load_rules, RulesFileError};
pub use rule::{QueryConstraint, QueryParams, RedirectRule};
