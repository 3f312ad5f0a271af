//! Stopword filtering for term extraction.
//!
//! This module provides stopword detection combining:
//! - Standard English stopwords from the `stop-words` crate
//! - Every single ASCII punctuation character
//! - Platform and markup noise that shows up in repository text and tweets
//! - Caller-supplied extras, typically from `[terms] extra_stopwords`

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// A stopword filter combining English, punctuation and domain stopwords.
///
/// All words are stored in lowercase; lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct Stopwords {
    /// Lowercased stopword set.
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Creates a new stopword filter with the default English, punctuation and domain lists.
    pub fn new() -> Self {
        let mut stopwords = Self {
            words: HashSet::new(),
        };

        stopwords.extend(stop_words::get(LANGUAGE::English).iter().copied());
        stopwords.extend(PUNCTUATION.chars().map(String::from));
        stopwords.extend(DOMAIN_NOISE.iter().copied());

        stopwords
    }

    /// Creates the default filter plus `extra` words.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stopwords = Self::new();
        stopwords.extend(extra);
        stopwords
    }

    /// Adds words to the set, lowercasing them.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.words.insert(word.as_ref().to_lowercase());
        }
    }

    /// Checks if a term is a stopword, ignoring case.
    pub fn contains(&self, term: &str) -> bool {
        if self.words.contains(term) {
            return true;
        }
        let lower = term.to_lowercase();
        lower != term && self.words.contains(&lower)
    }

    /// Returns the total number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no stopwords are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// ASCII punctuation; each character is a stopword on its own.
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Platform, markup and retweet noise.
///
/// `io` and `py` come from domain names and file extensions in READMEs, `nan` from
/// missing fields, `br`/`td` from inline HTML.
static DOMAIN_NOISE: &[&str] = &[
    "rt", "com", "could", "www", "github", "br", "nan", "io", "py", "master", "td",
];
