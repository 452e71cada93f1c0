//! Search Engine
//!
//! Owns the index for one table and rebuilds it only when the row
//! collection's version changes, so repeated queries over the same rows
//! skip re-normalization. The caller keeps the rows; the cached index only
//! records each row's position next to its normalized fields.

use tracing::debug;

use super::index::{build_index, FieldValue, IndexedRow, Searchable};
use super::ranking::{rank_with_status, RankOptions, Ranked};

struct CachedIndex {
    version: u64,
    rows: Vec<IndexedRow<usize>>,
}

/// Memoizing search over a caller-owned table
///
/// `F` projects a row into its searchable `(field, value)` pairs, the same
/// extractor [`build_index`] takes.
pub struct SearchEngine<T, F> {
    extractor: F,
    options: RankOptions,
    cache: Option<CachedIndex>,
    rebuilds: usize,
    _rows: std::marker::PhantomData<fn(&T)>,
}

/// Extractor used by [`SearchEngine::searchable`]
pub type SearchFieldsFn<T> = fn(&T) -> Vec<(&'static str, FieldValue)>;

impl<T: Searchable> SearchEngine<T, SearchFieldsFn<T>> {
    /// Engine over rows that carry their own [`Searchable`] projection
    pub fn searchable(options: RankOptions) -> Self {
        Self::with_options(T::search_fields, options)
    }
}

impl<T, F> SearchEngine<T, F> {
    /// Create a search engine with default options (no synonyms, unit weights)
    pub fn new(extractor: F) -> Self {
        Self::with_options(extractor, RankOptions::default())
    }

    /// Create search engine with table options
    pub fn with_options(extractor: F, options: RankOptions) -> Self {
        Self {
            extractor,
            options,
            cache: None,
            rebuilds: 0,
            _rows: std::marker::PhantomData,
        }
    }

    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Search `rows`, reusing the cached index when `version` is unchanged
    ///
    /// `status` overrides the status filter in the engine's options for this
    /// call only. The caller bumps `version` whenever `rows` changes.
    pub fn search<'r, I, K, V>(
        &mut self,
        rows: &'r [T],
        version: u64,
        query: &str,
        status: Option<&str>,
    ) -> Vec<Ranked<'r, T>>
    where
        F: Fn(&T) -> I,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let stale = self.cache.as_ref().map_or(true, |cache| cache.version != version);
        if stale {
            debug!("Rebuilding search index for {} rows (version {})", rows.len(), version);
            let extractor = &self.extractor;
            let indexed = build_index(0..rows.len(), |position: &usize| extractor(&rows[*position]));
            self.cache = Some(CachedIndex { version, rows: indexed });
            self.rebuilds += 1;
        }

        let index = self.cache.as_ref().map(|cache| cache.rows.as_slice()).unwrap_or(&[]);
        let status = status.or(self.options.status.as_deref());

        // A snapshot may outlive rows the caller removed without a new version
        let results: Vec<Ranked<'r, T>> = rank_with_status(index, query, &self.options, status)
            .into_iter()
            .filter_map(|ranked| {
                rows.get(*ranked.row).map(|row| Ranked {
                    row,
                    score: ranked.score,
                    position: ranked.position,
                })
            })
            .collect();
        debug!("Search '{}' returned {} of {} rows", query, results.len(), rows.len());
        results
    }

    /// Drop the cached index; the next search rebuilds it
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Number of index builds performed so far
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Version of the cached index, if any
    pub fn cached_version(&self) -> Option<u64> {
        self.cache.as_ref().map(|cache| cache.version)
    }
}
