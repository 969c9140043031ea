//! Word frequency analysis over review text and items.
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::sentiment_of;
use crate::model::{ParsedReview, WordFrequency};

pub const DEFAULT_MIN_COUNT: usize = 2;

/// Shortest word length that is counted.
const MIN_WORD_LEN: usize = 4;

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid regex"));

/// Count words of four or more characters across all reviews, keep those seen
/// at least `min_count` times, and tag each with its lexicon sentiment.
///
/// Sorted by count descending; equal counts keep first-occurrence order.
pub fn analyze_word_frequency(reviews: &[ParsedReview], min_count: usize) -> Vec<WordFrequency> {
    let all_text = reviews
        .iter()
        .map(ParsedReview::combined_text)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let all_text = NON_WORD_RE.replace_all(&all_text, " ");

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for word in all_text
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
    {
        match index.get(word) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    let mut frequencies: Vec<WordFrequency> = counts
        .into_iter()
        .filter(|&(_, count)| count >= min_count)
        .map(|(word, count)| WordFrequency {
            word: word.to_string(),
            count,
            sentiment: sentiment_of(word),
        })
        .collect();

    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}
