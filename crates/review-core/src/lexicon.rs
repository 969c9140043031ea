//! Static sentiment lexicon.
//!
//! Two disjoint word lists tuned for food reviews. Lookup is a membership
//! test on the lower-cased word; anything in neither list is neutral.
use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::model::Sentiment;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "amazing", "perfect", "delicious", "incredible", "fantastic", "excellent",
        "beautiful", "wonderful", "outstanding", "phenomenal", "spectacular",
        "addictive", "crispy", "fresh", "fluffy", "creamy", "rich", "tender",
        "juicy", "flavorful", "tasty", "yummy", "divine", "heavenly", "approved",
        "must", "best", "love", "hit", "delivered", "dangerous", "fire", "problem",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "disappointing", "bland",
        "dry", "soggy", "cold", "overcooked", "undercooked", "burnt",
        "greasy", "salty", "bitter", "sour", "stale", "mushy", "rubbery",
    ]
    .into_iter()
    .collect()
});

/// Classify a single word. Case-insensitive.
pub fn sentiment_of(word: &str) -> Sentiment {
    let word = word.to_lowercase();
    if POSITIVE_WORDS.contains(word.as_str()) {
        Sentiment::Positive
    } else if NEGATIVE_WORDS.contains(word.as_str()) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        assert_eq!(sentiment_of("delicious"), Sentiment::Positive);
        assert_eq!(sentiment_of("Soggy"), Sentiment::Negative);
        assert_eq!(sentiment_of("table"), Sentiment::Neutral);
        assert_eq!(sentiment_of(""), Sentiment::Neutral);
    }

    #[test]
    fn test_lists_are_disjoint() {
        assert!(POSITIVE_WORDS.is_disjoint(&NEGATIVE_WORDS));
    }
}
