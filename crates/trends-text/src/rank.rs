//! Corpus-wide term ranking.
//!
//! Ranks the columns of a [`TermWeightMatrix`] by their summed weight across all documents.
//! Terms that are weighty in many documents rise to the top; ties are broken alphabetically
//! so the ranking is stable across runs.

use std::{cmp::Ordering, num::NonZeroUsize, ops::RangeInclusive, vec};

use serde::Serialize;

use crate::TermWeightMatrix;

/// Default display range for scaled weights (smallest to largest label size).
pub const DISPLAY_RANGE: RangeInclusive<f64> = 10.0..=100.0;

/// A term with its weight summed over the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTerm {
    /// The unigram or bigram.
    pub term: String,
    /// Sum of the term's weight across all documents.
    pub weight: f64,
}

impl RankedTerm {
    /// Creates a new ranked term.
    pub fn new(term: impl Into<String>, weight: f64) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}

/// Ranked terms, highest aggregate weight first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedTermList(Vec<RankedTerm>);

impl RankedTermList {
    /// Returns the ranked terms.
    pub fn as_slice(&self) -> &[RankedTerm] {
        &self.0
    }

    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over terms in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &RankedTerm> {
        self.0.iter()
    }

    /// Returns the position of `term`, if ranked.
    pub fn position(&self, term: &str) -> Option<usize> {
        self.0.iter().position(|t| t.term == term)
    }
}

impl IntoIterator for RankedTermList {
    type Item = RankedTerm;
    type IntoIter = vec::IntoIter<RankedTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Orders by weight descending, then term ascending.
fn by_weight_then_term(a: &RankedTerm, b: &RankedTerm) -> Ordering {
    b.weight
        .partial_cmp(&a.weight)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.term.cmp(&b.term))
}

/// Ranks every term in the matrix by its column sum.
pub fn rank_terms(matrix: &TermWeightMatrix) -> RankedTermList {
    let mut ranked: Vec<RankedTerm> = matrix
        .column_sums()
        .into_iter()
        .map(|(term, weight)| RankedTerm::new(term, weight))
        .collect();

    ranked.sort_by(by_weight_then_term);

    RankedTermList(ranked)
}

/// Selects the top `n` terms by summed weight.
///
/// Returns every term, without padding, when the vocabulary is smaller than `n`.
pub fn top_terms(matrix: &TermWeightMatrix, n: NonZeroUsize) -> RankedTermList {
    let mut ranked = rank_terms(matrix);
    ranked.0.truncate(n.get());
    ranked
}

/// Linearly maps each term's weight from the list's min..max onto `range`.
///
/// Used to size labels in the keyword view. When all weights are equal every term maps to
/// the start of the range.
pub fn scale_weights(terms: &RankedTermList, range: RangeInclusive<f64>) -> Vec<(String, f64)> {
    let (lo, hi) = (*range.start(), *range.end());
    let min = terms.iter().map(|t| t.weight).fold(f64::INFINITY, f64::min);
    let max = terms
        .iter()
        .map(|t| t.weight)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    terms
        .iter()
        .map(|t| {
            let scaled = if span > 0.0 {
                lo + (t.weight - min) / span * (hi - lo)
            } else {
                lo
            };
            (t.term.clone(), scaled)
        })
        .collect()
}
