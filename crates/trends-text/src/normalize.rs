//! Text normalization.
//!
//! Raw text is split on Unicode word boundaries (UAX #29), lowercased and stripped of
//! stopwords. Segments without a letter or digit are dropped outright: whitespace runs,
//! punctuation, and whitespace carrying a stray combining mark, which UAX #29 keeps as one
//! segment. The output keeps only meaningful tokens in their original order.

use unicode_segmentation::UnicodeSegmentation;

use crate::Stopwords;

/// Normalized text for one record: lowercase, stopword-free tokens joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedDocument(String);

impl NormalizedDocument {
    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if every token was dropped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the surviving tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }
}

impl AsRef<str> for NormalizedDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes raw text against a stopword set.
///
/// Empty or all-stopword input yields an empty document. Normalizing an already normalized
/// document returns it unchanged.
pub fn normalize(raw: &str, stopwords: &Stopwords) -> NormalizedDocument {
    let mut out = String::with_capacity(raw.len());

    for segment in raw.split_word_bounds() {
        if !segment.chars().any(char::is_alphanumeric) {
            continue;
        }
        let token = segment.to_lowercase();
        if stopwords.contains(&token) {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&token);
    }

    NormalizedDocument(out)
}

#[cfg(test)]
mod test {
    use super::*;

    /// Normalizes with the default stopword set.
    fn norm(raw: &str) -> String {
        normalize(raw, &Stopwords::new()).as_str().to_string()
    }

    #[test]
    fn lowercases_and_drops_stopwords() {
        assert_eq!(
            norm("The WireGuard handshake and the Encryption"),
            "wireguard handshake encryption"
        );
    }

    #[test]
    fn drops_punctuation_tokens() {
        assert_eq!(norm("vpn, proxy; (tunnel)!"), "vpn proxy tunnel");
    }

    #[test]
    fn drops_domain_noise() {
        assert_eq!(norm("RT wireguard master github"), "wireguard");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(norm("  vpn\n\n\tproxy   "), "vpn proxy");
    }

    #[test]
    fn empty_input_is_empty_document() {
        assert!(normalize("", &Stopwords::new()).is_empty());
        assert!(normalize("   \n", &Stopwords::new()).is_empty());
    }

    #[test]
    fn all_stopword_input_is_empty_document() {
        assert!(normalize("the and of , . !", &Stopwords::new()).is_empty());
    }

    #[test]
    fn keeps_word_internal_punctuation() {
        // UAX #29 keeps letters joined across a period, like NLTK's tokenizer.
        assert_eq!(norm("mozilla.org"), "mozilla.org");
    }

    #[test]
    fn every_token_is_lowercase_and_not_a_stopword() {
        let stopwords = Stopwords::new();
        let doc = normalize(
            "Mozilla VPN: Protect ALL your devices, Über-fast! RT @user www.example.com",
            &stopwords,
        );
        assert!(!doc.is_empty());
        for token in doc.tokens() {
            assert_eq!(token, token.to_lowercase());
            assert!(!stopwords.contains(token), "stopword survived: {token}");
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let stopwords = Stopwords::new();
        for raw in [
            "Mozilla VPN: Protect ALL your devices, Über-fast!",
            "anonymous browsing / online tracking -- the report's findings",
            "",
            "Tor Browser 13.0.1 release (stable)",
            "cafe \u{301}vpn",
            "\u{301} \u{301}\u{302} proxy",
        ] {
            let once = normalize(raw, &stopwords);
            let twice = normalize(once.as_str(), &stopwords);
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn drops_whitespace_carrying_combining_marks() {
        assert_eq!(norm("cafe \u{301}vpn"), "cafe vpn");
        assert_eq!(norm("tor \u{301} \u{302}"), "tor");
    }

    #[test]
    fn tokens_are_single_space_separated() {
        let doc = normalize("cafe \u{301}vpn  \u{200d} tor", &Stopwords::new());
        assert!(!doc.as_str().contains("  "));
        assert!(doc.tokens().all(|t| !t.contains(char::is_whitespace)));
    }

    #[test]
    fn custom_stopwords_apply() {
        let stopwords = Stopwords::with_extra(["tunnel"]);
        assert_eq!(normalize("VPN Tunnel", &stopwords).as_str(), "vpn");
    }
}
