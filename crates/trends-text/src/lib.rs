//! Text core for trend analysis.
//!
//! Turns raw item text into ranked terms and relevancy scores. Everything here is pure: no
//! I/O, no state carried between calls. The stages, in pipeline order:
//!
//! 1. **Normalization** ([`normalize`]): word-boundary tokenization, lowercasing and stopword
//!    removal.
//! 2. **Weighting** ([`count_terms`], [`apply_idf`]): unigram and bigram TF-IDF with smoothed
//!    IDF, computed over the whole corpus.
//! 3. **Ranking** ([`top_terms`]): column sums across documents, sorted and truncated.
//!
//! Relevancy scoring ([`score`]) runs independently on each item's raw text.

#![warn(missing_docs)]

mod normalize;
mod rank;
mod relevancy;
mod stopwords;
mod weigh;

use std::num::NonZeroUsize;

pub use normalize::{NormalizedDocument, normalize};
pub use rank::{DISPLAY_RANGE, RankedTerm, RankedTermList, rank_terms, scale_weights, top_terms};
pub use relevancy::{score, score_optional};
pub use stopwords::Stopwords;
pub use trends_config::Normalization;
pub use weigh::{TermCounts, TermWeightMatrix, apply_idf, count_terms, vector_tokens, weigh};

/// One unit of raw text and the item it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    /// Identifier of the owning item (repository URL or post index).
    pub id: String,
    /// Raw, unnormalized text.
    pub text: String,
}

impl TextRecord {
    /// Creates a record.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Normalizes, weighs and ranks a set of records in one pass.
///
/// Records whose text normalizes to nothing still count as documents, so they affect IDF.
pub fn rank_records(
    records: &[TextRecord],
    stopwords: &Stopwords,
    normalization: Normalization,
    n: NonZeroUsize,
) -> RankedTermList {
    let documents: Vec<NormalizedDocument> = records
        .iter()
        .map(|r| normalize(&r.text, stopwords))
        .collect();
    top_terms(&weigh(&documents, normalization), n)
}
