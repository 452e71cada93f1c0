//! Filter & rank
//!
//! Scores indexed rows against a query: status pre-filter, synonym
//! expansion, weighted fuzzy scoring per field, then a stable descending sort.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use super::fuzzy::fuzzy_score;
use super::index::IndexedRow;
use super::normalize::normalize;
use super::synonyms::SynonymMap;

/// Per-field score multipliers
///
/// Fields without an entry weigh 1. Only finite, positive weights are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weights(BTreeMap<String, f64>);

impl Weights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Weights::set`]
    pub fn with(mut self, field: &str, weight: f64) -> Self {
        self.set(field, weight);
        self
    }

    /// Set the multiplier for a field; returns false if the weight was rejected
    pub fn set(&mut self, field: &str, weight: f64) -> bool {
        if !weight.is_finite() || weight <= 0.0 {
            return false;
        }
        self.0.insert(field.to_string(), weight);
        true
    }

    /// Multiplier for a field, defaulting to 1
    pub fn weight(&self, field: &str) -> f64 {
        self.0.get(field).copied().unwrap_or(1.0)
    }

    /// Overlay `other` on top of these weights
    pub fn merge(&mut self, other: &Weights) {
        for (field, weight) in &other.0 {
            self.0.insert(field.clone(), *weight);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(field, weight)| (field.as_str(), *weight))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Options for a single ranking call
#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    /// Synonyms used to expand each query token
    pub synonyms: SynonymMap,
    /// Field multipliers
    pub weights: Weights,
    /// Status value rows must contain, ignored without `status_field_key`
    pub status: Option<String>,
    /// Field holding the row status
    pub status_field_key: Option<String>,
    /// Only the first N query tokens are scored when set; 0 means no cap
    pub max_query_tokens: Option<usize>,
}

impl RankOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_synonyms(mut self, synonyms: SynonymMap) -> Self {
        self.synonyms = synonyms;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_status_field_key(mut self, key: impl Into<String>) -> Self {
        self.status_field_key = Some(key.into());
        self
    }

    pub fn with_max_query_tokens(mut self, max: usize) -> Self {
        self.max_query_tokens = Some(max);
        self
    }
}

/// A ranked row with its score and position in the index
#[derive(Debug, Clone)]
pub struct Ranked<'a, T> {
    pub row: &'a T,
    /// Accumulated weighted score; 0 for unscored (empty query) results
    pub score: f64,
    /// Position of the row in the index it came from
    pub position: usize,
}

/// Filter and rank, returning the original rows in ranked order
pub fn filter_and_rank<'a, T>(index: &'a [IndexedRow<T>], query: &str, options: &RankOptions) -> Vec<&'a T> {
    rank(index, query, options).into_iter().map(|ranked| ranked.row).collect()
}

/// Filter and rank, keeping each row's score and index position
///
/// Rows with a zero score are dropped. Equal scores keep index order.
/// An empty normalized query returns the status-filtered rows unscored,
/// in index order.
pub fn rank<'a, T>(index: &'a [IndexedRow<T>], query: &str, options: &RankOptions) -> Vec<Ranked<'a, T>> {
    rank_with_status(index, query, options, options.status.as_deref())
}

/// [`rank`] with the status filter value supplied separately from `options`
pub(crate) fn rank_with_status<'a, T>(
    index: &'a [IndexedRow<T>],
    query: &str,
    options: &RankOptions,
    status: Option<&str>,
) -> Vec<Ranked<'a, T>> {
    let status_filter = status
        .map(normalize)
        .filter(|status| !status.is_empty())
        .zip(options.status_field_key.as_deref());

    let candidates = index.iter().enumerate().filter(|(_, entry)| match &status_filter {
        Some((status, key)) => entry.field(key).contains(status.as_str()),
        None => true,
    });

    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        let unscored: Vec<Ranked<'a, T>> = candidates
            .map(|(position, entry)| Ranked {
                row: &entry.row,
                score: 0.0,
                position,
            })
            .collect();
        debug!("Empty query, returning {} of {} rows unscored", unscored.len(), index.len());
        return unscored;
    }

    let tokens = expand_query(&normalized_query, options);

    let mut ranked: Vec<Ranked<'a, T>> = candidates
        .filter_map(|(position, entry)| {
            let score = score_row(entry, &tokens, &options.weights);
            (score > 0.0).then_some(Ranked {
                row: &entry.row,
                score,
                position,
            })
        })
        .collect();

    // sort_by is stable: ties stay in index order
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    debug!(
        "Query '{}' expanded to {} tokens, {} of {} rows matched",
        normalized_query,
        tokens.len(),
        ranked.len(),
        index.len()
    );

    ranked
}

/// Query tokens followed by their synonyms, flattened in query order
fn expand_query(normalized_query: &str, options: &RankOptions) -> Vec<String> {
    let limit = options.max_query_tokens.filter(|max| *max > 0).unwrap_or(usize::MAX);
    normalized_query
        .split(' ')
        .take(limit)
        .flat_map(|token| options.synonyms.expand(token))
        .collect()
}

fn score_row<T>(entry: &IndexedRow<T>, tokens: &[String], weights: &Weights) -> f64 {
    let mut score = 0.0;
    for (key, text) in &entry.fields {
        let weight = weights.weight(key);
        for token in tokens {
            score += weight * fuzzy_score(token, text);
        }
    }
    score
}
