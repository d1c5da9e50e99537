//! Text relevance between a free-text query and photo records.
//!
//! The crate exposes two operations: [`tokens`], which reduces a string to
//! its unique stemmed tokens (synonyms included), and [`score`], which rates
//! how well one photo's descriptive text matches a query. Both are pure
//! functions of their inputs and the embedded synonym table, so every
//! caller, sequential or parallel, observes identical results for identical
//! inputs.
//!
//! # Scoring model
//!
//! A photo's text is the concatenation of its description, AI description,
//! country, and city. Each unique stem in that text earns 10.0 points when
//! it appears literally in the query, or 1.5 points when it appears only
//! among the query's synonyms. The sum is divided by `ln(1 + n)` where `n`
//! is the number of unique stems in the photo text, so verbose descriptions
//! do not dominate the ranking.

mod score;
mod stopwords;
mod synonyms;
mod tokenize;

pub use score::score;
pub use tokenize::tokens;
