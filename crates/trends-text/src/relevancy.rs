//! Keyword relevancy scoring.
//!
//! An item's relevancy is the number of times any keyword occurs in its text. Matching is
//! case-insensitive and substring-based: a keyword counts wherever it appears, including
//! inside longer words. `"io"` therefore matches inside `"action"`, and `"vpn"` matches
//! inside `"MozillaVPN"`. The score is a cheap signal of how much an item talks about the
//! search, not a token-level frequency.

/// Counts non-overlapping, case-insensitive occurrences of every keyword in `text`.
///
/// Counts are summed across keywords; a keyword contained in another keyword is counted
/// separately for each. Empty keywords are ignored.
pub fn score<S: AsRef<str>>(text: &str, keywords: &[S]) -> u64 {
    if text.is_empty() {
        return 0;
    }
    let haystack = text.to_lowercase();

    keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .map(|k| haystack.matches(k.as_str()).count() as u64)
        .sum()
}

/// Scores possibly missing text; missing text scores zero.
pub fn score_optional<S: AsRef<str>>(text: Option<&str>, keywords: &[S]) -> u64 {
    text.map_or(0, |t| score(t, keywords))
}
