//! Synonym expansion for query tokens
//!
//! A synonym table is an explicit value handed to the ranker. Keys and values
//! are stored normalized, so lookups use the exact normalized query token.

use std::collections::BTreeMap;

use super::normalize::normalize;

/// Default synonym table for Maglo invoice and transaction tables
const MAGLO_SYNONYMS: &[(&str, &[&str])] = &[
    ("paid", &["settled", "completed", "success"]),
    ("unpaid", &["pending", "due", "overdue"]),
    ("pending", &["processing", "awaiting", "unpaid"]),
    ("failed", &["declined", "rejected", "cancelled"]),
    ("cancelled", &["canceled", "void"]),
    ("invoice", &["bill", "inv"]),
    ("transaction", &["payment", "transfer", "txn"]),
    ("refund", &["reversal", "chargeback"]),
    ("income", &["credit", "deposit", "received"]),
    ("expense", &["debit", "withdrawal", "spent"]),
    ("subscription", &["recurring", "monthly"]),
];

/// Mapping from a normalized token to its ordered, normalized synonyms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl SynonymMap {
    /// Create an empty synonym map
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table used by the Maglo tables
    pub fn maglo_defaults() -> Self {
        MAGLO_SYNONYMS
            .iter()
            .map(|(token, synonyms)| (*token, synonyms.iter().copied()))
            .collect()
    }

    /// Builder-style variant of [`SynonymMap::insert`]
    pub fn with_entry<I, S>(mut self, token: &str, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert(token, synonyms);
        self
    }

    /// Append synonyms for `token`, keeping existing ones first
    ///
    /// Empty tokens and synonyms (after normalization) are ignored, and
    /// a synonym already registered for the token is not added twice.
    pub fn insert<I, S>(&mut self, token: &str, synonyms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = normalize(token);
        if key.is_empty() {
            return;
        }

        let entry = self.entries.entry(key).or_default();
        for synonym in synonyms {
            let synonym = normalize(synonym.as_ref());
            if !synonym.is_empty() && !entry.contains(&synonym) {
                entry.push(synonym);
            }
        }
    }

    /// Replace the synonyms registered for `token`
    pub fn set<I, S>(&mut self, token: &str, synonyms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.remove(&normalize(token));
        self.insert(token, synonyms);
    }

    /// Merge every entry of `other` into this map
    pub fn extend(&mut self, other: &SynonymMap) {
        for (token, synonyms) in &other.entries {
            self.insert(token, synonyms);
        }
    }

    /// Synonyms registered for an already-normalized token
    pub fn get(&self, token: &str) -> &[String] {
        self.entries.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The token followed by its synonyms, one level deep
    ///
    /// Synonyms of synonyms are not followed.
    pub fn expand(&self, token: &str) -> Vec<String> {
        let mut expanded = Vec::with_capacity(1 + self.get(token).len());
        expanded.push(token.to_string());
        for synonym in self.get(token) {
            if synonym != token {
                expanded.push(synonym.clone());
            }
        }
        expanded
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(token, synonyms)| (token.as_str(), synonyms.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, I, S> FromIterator<(K, I)> for SynonymMap
where
    K: AsRef<str>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut map = SynonymMap::new();
        for (token, synonyms) in iter {
            map.insert(token.as_ref(), synonyms);
        }
        map
    }
}
