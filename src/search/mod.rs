//! Table search with fuzzy matching
//!
//! Pure, framework-free pipeline: normalize → filter → expand → score → sort.
//! Nothing here performs I/O or keeps state between calls except the
//! [`SearchEngine`] index cache, which the caller owns.

pub mod engine;
pub mod fuzzy;
pub mod index;
pub mod normalize;
pub mod params;
pub mod ranking;
pub mod synonyms;

#[cfg(test)]
mod property_tests;

pub use engine::{SearchEngine, SearchFieldsFn};
pub use fuzzy::{edit_distance, fuzzy_score};
pub use index::{build_index, build_index_for, FieldValue, IndexedRow, Searchable};
pub use normalize::normalize;
pub use params::SearchParams;
pub use ranking::{filter_and_rank, rank, RankOptions, Ranked, Weights};
pub use synonyms::SynonymMap;
