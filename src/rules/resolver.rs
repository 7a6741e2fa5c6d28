//! Best-match resolution.
//!
//! # Responsibilities
//! - Look up candidate rules for a request's host+path
//! - Rank fully-covering candidates by how many constraints they satisfy
//! - Fall back to the first default rule when nothing scores
//! - Return the winning destination or an explicit no-match
//!
//! # Design Decisions
//! - Candidates are scanned in insertion order; the order decides both which
//!   default applies and which rule wins a specificity tie
//! - A rule matches all-or-nothing on the parameters it requires
//! - Resolution is a pure read: no allocation beyond the key, no locking,
//!   no I/O, cost linear in candidates and their constraints

use crate::rules::index::RuleIndex;
use crate::rules::rule::QueryParams;

impl RuleIndex {
    /// Resolve a request to a redirect destination, or `None` when no rule
    /// applies.
    pub fn resolve(&self, host: &str, path: &str, params: &QueryParams) -> Option<&str> {
        let key = format!("{host}{path}");
        let candidates = self.lookup(&key)?;

        let mut best: Option<&str> = None;
        let mut best_score = 0;

        for rule in candidates {
            // The first rule with no constraints becomes the default, unless
            // a destination has already been chosen.
            if rule.constraints.is_empty() && best.is_none() {
                tracing::debug!(destination = %rule.destination, "Default destination found");
                best = Some(rule.destination.as_str());
            }

            let matched = rule.constraints.match_count(params);
            if matched == 0 {
                continue;
            }
            // All-or-nothing: a rule must cover every parameter it requires.
            if matched < rule.constraints.len() {
                tracing::debug!(
                    host = %rule.host,
                    path = %rule.path,
                    matched,
                    required = rule.constraints.len(),
                    "Rule skipped, not all required parameters matched"
                );
                continue;
            }
            // Strictly more satisfied constraints wins. On a tie the rule
            // added earlier keeps priority.
            if matched > best_score {
                best_score = matched;
                best = Some(rule.destination.as_str());
                tracing::debug!(destination = %rule.destination, matched, "Best candidate updated");
            }
        }

        best
    }
}
