//! Append-only log of prior case narratives with keyword recall.
//!
//! Recall is a coarse token-overlap heuristic, not semantic search: a stored
//! narrative matches when any of its lowercase whitespace-delimited tokens is
//! a substring of the lowercased query. The newest match wins.

use std::collections::VecDeque;

/// Message returned when no stored narrative matches.
pub const NO_SIMILAR_CASE: &str = "No similar past case found.";

/// Chronological log of symptom narratives.
///
/// Unbounded by default. With [`CaseMemory::with_capacity_limit`] the oldest
/// narratives are evicted once the limit is reached.
#[derive(Debug, Clone, Default)]
pub struct CaseMemory {
    cases: VecDeque<String>,
    capacity: Option<usize>,
}

impl CaseMemory {
    /// Create an empty, unbounded memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty memory that keeps at most `capacity` narratives.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            cases: VecDeque::new(),
            capacity: Some(capacity.max(1)),
        }
    }

    /// Add a narrative to the end of the log.
    pub fn append(&mut self, narrative: impl Into<String>) {
        if let Some(limit) = self.capacity {
            while self.cases.len() >= limit {
                self.cases.pop_front();
            }
        }
        self.cases.push_back(narrative.into());
    }

    /// Most recent stored narrative sharing a token with `query`.
    pub fn find_similar(&self, query: &str) -> Option<&str> {
        let query = query.to_lowercase();
        self.cases
            .iter()
            .rev()
            .find(|case| {
                case.to_lowercase()
                    .split_whitespace()
                    .any(|token| query.contains(token))
            })
            .map(String::as_str)
    }

    /// Recall text for the doctor's context.
    pub fn retrieve_similar(&self, query: &str) -> String {
        match self.find_similar(query) {
            Some(case) => format!("Similar past case found: {}", case),
            None => NO_SIMILAR_CASE.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Stored narratives, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(String::as_str)
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }
}

impl<S: Into<String>> Extend<S> for CaseMemory {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for narrative in iter {
            self.append(narrative);
        }
    }
}
