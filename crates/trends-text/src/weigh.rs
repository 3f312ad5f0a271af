//! Corpus TF-IDF weighting over unigrams and bigrams.
//!
//! Weighting is split into two pure steps so neither carries fitted state between calls:
//!
//! 1. [`count_terms`] builds the vocabulary and raw per-document counts.
//! 2. [`apply_idf`] scales counts by smoothed inverse document frequency and optionally
//!    L2-normalizes each document row.
//!
//! The IDF formula is `ln((1 + n) / (1 + df)) + 1`, where `n` is the number of documents and
//! `df` the number of documents containing the term. Adding one to both counts keeps the
//! ratio finite; the trailing `+ 1` keeps terms present in every document from vanishing.
//!
//! Every weight depends on the whole corpus, so a matrix is only meaningful for the document
//! set it was computed from.

use std::collections::{BTreeMap, BTreeSet};

use trends_config::Normalization;

/// Minimum length, in characters, of a vectorizer token.
const MIN_TOKEN_CHARS: usize = 2;

/// Vocabulary and raw term counts for a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCounts {
    /// Every unigram and bigram seen in the corpus, sorted.
    vocabulary: Vec<String>,
    /// Per-document term counts; absent terms have count zero.
    rows: Vec<BTreeMap<String, u32>>,
}

impl TermCounts {
    /// Returns the sorted vocabulary.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the raw count of `term` in document `doc`.
    pub fn count(&self, doc: usize, term: &str) -> u32 {
        self.rows
            .get(doc)
            .and_then(|row| row.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Returns how many documents contain `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.rows.iter().filter(|row| row.contains_key(term)).count()
    }
}

/// Per-document TF-IDF weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermWeightMatrix {
    /// Every term with a column in the matrix, sorted.
    vocabulary: Vec<String>,
    /// Per-document weights; absent terms weigh zero.
    rows: Vec<BTreeMap<String, f64>>,
}

impl TermWeightMatrix {
    /// Returns the sorted vocabulary.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns the number of document rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the weight of `term` in document `doc`, zero when absent.
    pub fn weight(&self, doc: usize, term: &str) -> f64 {
        self.rows
            .get(doc)
            .and_then(|row| row.get(term))
            .copied()
            .unwrap_or(0.0)
    }

    /// Returns the non-zero weights of document `doc`.
    pub fn row(&self, doc: usize) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(doc)
    }

    /// Iterates over document rows in input order.
    pub fn rows(&self) -> impl Iterator<Item = &BTreeMap<String, f64>> {
        self.rows.iter()
    }

    /// Sums each term's weight across all documents.
    pub fn column_sums(&self) -> BTreeMap<&str, f64> {
        let mut sums: BTreeMap<&str, f64> = self
            .vocabulary
            .iter()
            .map(|term| (term.as_str(), 0.0))
            .collect();
        for row in &self.rows {
            for (term, weight) in row {
                if let Some(sum) = sums.get_mut(term.as_str()) {
                    *sum += weight;
                }
            }
        }
        sums
    }
}

/// Splits a document into vectorizer tokens.
///
/// Tokens are maximal runs of alphanumeric characters or `_`, lowercased, at least two
/// characters long. Single-character fragments left by contractions and hyphenation never
/// enter the vocabulary.
pub fn vector_tokens(doc: &str) -> Vec<String> {
    doc.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Builds the unigram and bigram vocabulary and raw counts for `documents`.
///
/// Bigrams are formed from adjacent tokens within one document only.
pub fn count_terms<S: AsRef<str>>(documents: &[S]) -> TermCounts {
    let mut vocabulary: BTreeSet<String> = BTreeSet::new();
    let mut rows = Vec::with_capacity(documents.len());

    for doc in documents {
        let tokens = vector_tokens(doc.as_ref());
        let mut row: BTreeMap<String, u32> = BTreeMap::new();

        for token in &tokens {
            *row.entry(token.clone()).or_insert(0) += 1;
        }
        for pair in tokens.windows(2) {
            *row.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
        }

        vocabulary.extend(row.keys().cloned());
        rows.push(row);
    }

    TermCounts {
        vocabulary: vocabulary.into_iter().collect(),
        rows,
    }
}

/// Smoothed inverse document frequency.
fn smoothed_idf(documents: usize, document_frequency: usize) -> f64 {
    ((1.0 + documents as f64) / (1.0 + document_frequency as f64)).ln() + 1.0
}

/// Scales raw counts by smoothed IDF and applies `normalization` to each row.
///
/// Rows without terms stay empty (all weights zero) under either normalization.
pub fn apply_idf(counts: &TermCounts, normalization: Normalization) -> TermWeightMatrix {
    let n = counts.rows.len();

    let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &counts.rows {
        for term in row.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let idf: BTreeMap<&str, f64> = document_frequency
        .iter()
        .map(|(term, df)| (*term, smoothed_idf(n, *df)))
        .collect();

    let rows = counts
        .rows
        .iter()
        .map(|row| {
            let mut weights: BTreeMap<String, f64> = row
                .iter()
                .map(|(term, count)| {
                    let factor = idf.get(term.as_str()).copied().unwrap_or(0.0);
                    (term.clone(), f64::from(*count) * factor)
                })
                .collect();
            if normalization == Normalization::L2 {
                l2_normalize(&mut weights);
            }
            weights
        })
        .collect();

    TermWeightMatrix {
        vocabulary: counts.vocabulary.clone(),
        rows,
    }
}

/// Scales a row to unit Euclidean length; zero rows are left unchanged.
fn l2_normalize(row: &mut BTreeMap<String, f64>) {
    let norm = row.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in row.values_mut() {
            *weight /= norm;
        }
    }
}

/// Computes the TF-IDF matrix for `documents` in one step.
///
/// An empty input yields an empty matrix with zero rows.
pub fn weigh<S: AsRef<str>>(documents: &[S], normalization: Normalization) -> TermWeightMatrix {
    apply_idf(&count_terms(documents), normalization)
}

#[cfg(test)]
mod test {
    use super::*;

    /// Corpus shared by several tests.
    const DOCS: [&str; 3] = ["alpha beta", "beta gamma", "alpha alpha gamma"];

    /// Asserts two floats agree to six decimal places.
    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn vector_tokens_drops_short_and_splits_on_symbols() {
        assert_eq!(
            vector_tokens("don't stop-me now x2 a mozilla.org snake_case"),
            vec!["don", "stop", "me", "now", "x2", "mozilla", "org", "snake_case"]
        );
    }

    #[test]
    fn count_terms_builds_unigrams_and_bigrams() {
        let counts = count_terms(&DOCS);

        assert_eq!(
            counts.vocabulary(),
            &[
                "alpha",
                "alpha alpha",
                "alpha beta",
                "alpha gamma",
                "beta",
                "beta gamma",
                "gamma",
            ]
        );
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.count(2, "alpha"), 2);
        assert_eq!(counts.count(2, "alpha alpha"), 1);
        assert_eq!(counts.count(0, "gamma"), 0);
        assert_eq!(counts.document_frequency("alpha"), 2);
        assert_eq!(counts.document_frequency("beta gamma"), 1);
    }

    #[test]
    fn bigrams_do_not_cross_documents() {
        let counts = count_terms(&["alpha", "beta"]);
        assert_eq!(counts.vocabulary(), &["alpha", "beta"]);
    }

    #[test]
    fn raw_weights_follow_smoothed_idf() {
        let matrix = weigh(&DOCS, Normalization::None);

        // df = 2 of n = 3: ln(4/3) + 1
        let common = (4.0_f64 / 3.0).ln() + 1.0;
        // df = 1 of n = 3: ln(4/2) + 1
        let rare = 2.0_f64.ln() + 1.0;

        assert_close(matrix.weight(0, "alpha"), common);
        assert_close(matrix.weight(2, "alpha"), 2.0 * common);
        assert_close(matrix.weight(0, "alpha beta"), rare);
        assert_close(matrix.weight(1, "alpha"), 0.0);
    }

    #[test]
    fn l2_rows_have_unit_length() {
        let matrix = weigh(&DOCS, Normalization::L2);
        for row in matrix.rows() {
            let norm: f64 = row.values().map(|w| w * w).sum::<f64>().sqrt();
            assert_close(norm, 1.0);
        }
    }

    #[test]
    fn weights_are_non_negative_and_zero_where_count_is_zero() {
        let docs = [
            "vpn privacy vpn",
            "tracking cookies",
            "",
            "privacy tracking browser",
        ];
        let counts = count_terms(&docs);
        for normalization in [Normalization::L2, Normalization::None] {
            let matrix = apply_idf(&counts, normalization);
            for doc in 0..docs.len() {
                for term in counts.vocabulary() {
                    let weight = matrix.weight(doc, term);
                    assert!(weight >= 0.0);
                    if counts.count(doc, term) == 0 {
                        assert_eq!(weight, 0.0);
                    } else {
                        assert!(weight > 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn empty_documents_yield_zero_rows() {
        let matrix = weigh(&["", "vpn", ""], Normalization::L2);
        assert_eq!(matrix.len(), 3);
        assert!(matrix.row(0).unwrap().is_empty());
        assert!(matrix.row(2).unwrap().is_empty());
        assert_close(matrix.weight(1, "vpn"), 1.0);
    }

    #[test]
    fn empty_corpus_yields_empty_matrix() {
        let docs: [&str; 0] = [];
        let matrix = weigh(&docs, Normalization::L2);
        assert!(matrix.is_empty());
        assert!(matrix.vocabulary().is_empty());
        assert!(matrix.column_sums().is_empty());
    }

    #[test]
    fn weighting_is_deterministic() {
        assert_eq!(
            weigh(&DOCS, Normalization::L2),
            weigh(&DOCS, Normalization::L2)
        );
    }

    #[test]
    fn corpus_membership_changes_weights() {
        let small = weigh(&DOCS[..2], Normalization::None);
        let full = weigh(&DOCS, Normalization::None);
        assert!((small.weight(0, "alpha") - full.weight(0, "alpha")).abs() > 1e-9);
    }

    #[test]
    fn column_sums_cover_vocabulary() {
        let matrix = weigh(&DOCS, Normalization::None);
        let sums = matrix.column_sums();
        assert_eq!(sums.len(), matrix.vocabulary().len());
        let common = (4.0_f64 / 3.0).ln() + 1.0;
        assert_close(sums["alpha"], 3.0 * common);
    }
}
