//! Caption-to-review parser.
//!
//! Captions are unstructured, so extraction is a fixed sequence of pattern
//! rules, each exposed as its own function:
//! - handle: first `@mention`
//! - rating: `N/10` fragment (a caption without one is not a review)
//! - location: postcode district before the rating, else a city name after the handle
//! - name: handle, or a cleaned first line when no handle was tagged
//! - items: marker-prefixed `dish – description` segments
//! - approval: `@<reviewer> APPROVED`
//! - review text: the caption minus everything above
//!
//! Detection and stripping share the same pattern definitions.
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::model::{ParsedReview, Post};

pub const DEFAULT_REVIEWER_HANDLE: &str = "diningwithtaha";
pub const UNKNOWN_RESTAURANT: &str = "Unknown Restaurant";

const HANDLE_PATTERN: &str = r"@([a-zA-Z0-9._]+)";
const RATING_PATTERN: &str = r"([0-9]+(?:\.[0-9]+)?)\s*/\s*10";
const POSTCODE_TOKEN: &str = r"[A-Z]{1,2}[0-9]{1,2}[A-Z]?";
/// Hyphen, en dash, em dash.
const DASH: &str = r"[\-–—]";
const ITEM_MARKERS: &[&str] = &[
    "🔥", "🍓", "⚡️", "🧋", "🍌", "🍕", "🍔", "🍟", "🌮", "🍜", "🍣", "🍱", "🥗", "🥙", "🌯",
    "•", "-",
];

static HANDLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(HANDLE_PATTERN).expect("valid regex"));

static RATING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(RATING_PATTERN).expect("valid regex"));

// The trailing digit keeps the match anchored to the token right before the rating.
static POSTCODE_LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({POSTCODE_TOKEN})\s+{DASH}?\s*[0-9]")).expect("valid regex")
});

static CITY_LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"@[a-zA-Z0-9._]+\s+([A-Za-z\s]+?)\s+{DASH}\s+[0-9]"
    ))
    .expect("valid regex")
});

static POSTCODE_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"{POSTCODE_TOKEN}\s+")).expect("valid regex"));

static DASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(DASH).expect("valid regex"));

static INVITE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\binvite\b").expect("valid regex"));

static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid regex"));

static ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    let markers = ITEM_MARKERS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?:{markers})\s*(.+?){DASH}\s*(.+)")).expect("valid regex")
});

static APPROVAL_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)APPROVED\s*✅*").expect("valid regex"));

static NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));

/// Parses captions on behalf of one reviewer account.
///
/// The reviewer handle only matters for the approval rule; every other rule is
/// independent of who wrote the caption.
#[derive(Debug, Clone)]
pub struct CaptionParser {
    reviewer_handle: String,
    approval_re: Regex,
}

impl CaptionParser {
    /// Build a parser for `reviewer_handle` (with or without a leading `@`).
    pub fn new(reviewer_handle: &str) -> Self {
        let reviewer_handle = reviewer_handle.trim().trim_start_matches('@').to_string();
        let approval_re = Regex::new(&format!(
            r"(?i)@{}\s+APPROVED",
            regex::escape(&reviewer_handle)
        ))
        .expect("valid regex");

        Self {
            reviewer_handle,
            approval_re,
        }
    }

    pub fn reviewer_handle(&self) -> &str {
        &self.reviewer_handle
    }

    /// Interpret one caption as a review.
    ///
    /// Returns `None` when the caption carries no `N/10` rating or the rating
    /// falls outside [0, 10]; that is the normal outcome for non-review posts.
    pub fn parse(&self, caption: &str, timestamp: &str) -> Option<ParsedReview> {
        let restaurant_handle = extract_handle(caption);

        let Some(rating) = extract_rating(caption) else {
            debug!(caption_len = caption.len(), "caption has no usable rating, skipping");
            return None;
        };

        let location = extract_location(caption);
        let restaurant_name = extract_name(caption, restaurant_handle.as_deref());
        let items = extract_items(caption);
        let is_approved = self.is_approved(caption);
        let review_text = clean_review_text(caption);

        Some(ParsedReview {
            restaurant_name,
            restaurant_handle,
            rating,
            location,
            review_text,
            items,
            timestamp: timestamp.to_string(),
            is_approved,
            raw_caption: caption.to_string(),
        })
    }

    /// True when the caption contains `@<reviewer> APPROVED` (case-insensitive).
    pub fn is_approved(&self, caption: &str) -> bool {
        self.approval_re.is_match(caption)
    }
}

impl Default for CaptionParser {
    fn default() -> Self {
        Self::new(DEFAULT_REVIEWER_HANDLE)
    }
}

/// Parse a batch of posts, dropping captions that are not reviews.
pub fn parse_posts(parser: &CaptionParser, posts: &[Post]) -> Vec<ParsedReview> {
    let reviews: Vec<ParsedReview> = posts
        .iter()
        .filter_map(|post| parser.parse(&post.caption, &post.timestamp))
        .collect();

    debug!(
        posts = posts.len(),
        reviews = reviews.len(),
        "parsed caption batch"
    );
    reviews
}

/// First `@mention` in the caption, without the `@`.
pub fn extract_handle(caption: &str) -> Option<String> {
    HANDLE_RE
        .captures(caption)
        .map(|caps| caps[1].to_string())
}

/// The `N/10` score, if present and within [0, 10].
pub fn extract_rating(caption: &str) -> Option<f64> {
    let caps = RATING_RE.captures(caption)?;
    let rating: f64 = caps[1].parse().ok()?;
    (0.0..=10.0).contains(&rating).then_some(rating)
}

/// Postcode district immediately before the rating, else a city name between
/// the handle and a dash-separated rating. Postcode always wins.
pub fn extract_location(caption: &str) -> Option<String> {
    if let Some(caps) = POSTCODE_LOCATION_RE.captures(caption) {
        return Some(caps[1].to_string());
    }

    CITY_LOCATION_RE
        .captures(caption)
        .map(|caps| caps[1].trim().to_string())
        .filter(|city| !city.is_empty())
}

/// Restaurant display name.
///
/// A tagged handle always wins. Otherwise the first line is cleaned of
/// mentions, rating, postcodes, dashes, the word "invite" and punctuation, and
/// used when it is 3 to 49 characters long.
pub fn extract_name(caption: &str, handle: Option<&str>) -> String {
    if let Some(handle) = handle {
        return handle.to_string();
    }

    let first_line = caption.split('\n').next().unwrap_or_default();
    let cleaned = clean_first_line(first_line);
    let len = cleaned.chars().count();

    if len > 2 && len < 50 {
        cleaned
    } else {
        UNKNOWN_RESTAURANT.to_string()
    }
}

fn clean_first_line(line: &str) -> String {
    let text = HANDLE_RE.replace_all(line, "");
    let text = RATING_RE.replace_all(&text, "");
    let text = POSTCODE_STRIP_RE.replace_all(&text, "");
    let text = DASH_RE.replace_all(&text, "");
    let text = INVITE_RE.replace_all(&text, "");
    let text = PUNCTUATION_RE.replace_all(&text, "");
    text.trim().to_string()
}

/// `"<dish>: <description>"` for every marker-prefixed `dish – description` segment.
pub fn extract_items(caption: &str) -> Vec<String> {
    ITEM_RE
        .captures_iter(caption)
        .map(|caps| format!("{}: {}", caps[1].trim(), caps[2].trim()))
        .collect()
}

/// Caption body with every extracted fragment removed and newlines collapsed.
pub fn clean_review_text(caption: &str) -> String {
    let text = HANDLE_RE.replace_all(caption, "");
    let text = RATING_RE.replace_all(&text, "");
    let text = POSTCODE_STRIP_RE.replace_all(&text, "");
    let text = APPROVAL_MARKER_RE.replace_all(&text, "");
    let text = ITEM_RE.replace_all(&text, "");
    let text = NEWLINES_RE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOBA_BLOOM: &str = "@bobabloom_ RG1 9.3/10 🤩🔥

Does Reading secretly have the best banana pudding in the UK? 👀

Pulled up to Bubba Bloom to find out… and honestly, I wasn't ready.

🔥 The corn dogs – dangerous levels of cheese pull.
🍓 Strawberry Matcha – earthy, sweet, addictive.
⚡️ Red Bull Mocktail – if you love Red Bull, this is a problem.
🧋 Brown Sugar Bubble Tea – my go-to, full flavour, no misses.
🍌 Banana Pudding – hands down one of the BEST.

Everything hit, everything delivered, and everything went down way too easily.

@diningwithtaha APPROVED ✅✅✅";

    #[test]
    fn test_parse_full_caption() {
        let review = CaptionParser::default()
            .parse(BOBA_BLOOM, "2024-12-15T14:30:00Z")
            .expect("caption is a review");

        assert_eq!(review.restaurant_handle.as_deref(), Some("bobabloom_"));
        assert_eq!(review.restaurant_name, "bobabloom_");
        assert_eq!(review.rating, 9.3);
        assert_eq!(review.location.as_deref(), Some("RG1"));
        assert!(review.is_approved);
        assert_eq!(review.timestamp, "2024-12-15T14:30:00Z");
        assert_eq!(review.raw_caption, BOBA_BLOOM);
        assert_eq!(review.items.len(), 5);
        assert_eq!(
            review.items[0],
            "The corn dogs: dangerous levels of cheese pull."
        );
        assert_eq!(
            review.items[3],
            "Brown Sugar Bubble Tea: my go-to, full flavour, no misses."
        );
    }

    #[test]
    fn test_review_text_is_stripped() {
        let text = clean_review_text(BOBA_BLOOM);
        assert!(text.starts_with("🤩🔥 Does Reading secretly"));
        assert!(text.contains("best banana pudding"));
        assert!(!text.contains('@'));
        assert!(!text.contains("9.3/10"));
        assert!(!text.contains("RG1"));
        assert!(!text.contains("APPROVED"));
        assert!(!text.contains('✅'));
        assert!(!text.contains("corn dogs"));
        assert!(!text.contains('\n'));
        assert!(text.ends_with("way too easily."));
    }

    #[test]
    fn test_no_rating_is_not_a_review() {
        let parser = CaptionParser::default();
        assert!(parser.parse("Great day out today!", "").is_none());
        assert!(parser.parse("@dishoom was lovely, 9 out of 10", "").is_none());
        assert!(parser.parse("", "").is_none());
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(extract_rating("10/10"), Some(10.0));
        assert_eq!(extract_rating("0/10"), Some(0.0));
        assert_eq!(extract_rating("7.25 / 10 honestly"), Some(7.25));
        assert_eq!(extract_rating("11/10 would go again"), None);
        assert_eq!(extract_rating("no score"), None);
    }

    #[test]
    fn test_bare_rating_caption() {
        let review = CaptionParser::default().parse("8/10", "").expect("review");
        assert_eq!(review.rating, 8.0);
        assert_eq!(review.restaurant_name, UNKNOWN_RESTAURANT);
        assert_eq!(review.restaurant_handle, None);
        assert_eq!(review.location, None);
        assert_eq!(review.review_text, "");
    }

    #[test]
    fn test_location_postcode_with_dash() {
        assert_eq!(
            extract_location("@wingshack WD24 – 8.8/10").as_deref(),
            Some("WD24")
        );
        assert_eq!(
            extract_location("@bobabloom_ RG1 9.3/10").as_deref(),
            Some("RG1")
        );
    }

    #[test]
    fn test_location_city_name() {
        assert_eq!(
            extract_location("@thegrill Southampton - 9.5/10").as_deref(),
            Some("Southampton")
        );
        assert_eq!(
            extract_location("@thegrill Milton Keynes — 7/10").as_deref(),
            Some("Milton Keynes")
        );
        assert_eq!(extract_location("@dishoom LDN 8.7/10"), None);
    }

    #[test]
    fn test_location_prefers_postcode() {
        let caption = "@thegrill Southampton - 9.5/10 then SO14 8 more visits";
        assert_eq!(extract_location(caption).as_deref(), Some("SO14"));
    }

    #[test]
    fn test_name_from_first_line() {
        let caption = "Burger Shack invite – 8.5/10\nGreat burgers";
        assert_eq!(extract_name(caption, None), "Burger Shack");

        let review = CaptionParser::default().parse(caption, "").expect("review");
        assert_eq!(review.restaurant_name, "Burger Shack");
        assert_eq!(review.restaurant_handle, None);
    }

    #[test]
    fn test_name_strips_postcode_and_punctuation() {
        assert_eq!(
            extract_name("The Pie Room! RG1 9/10", None),
            "The Pie Room"
        );
    }

    #[test]
    fn test_name_falls_back_when_too_short() {
        assert_eq!(extract_name("Ok 7/10", None), UNKNOWN_RESTAURANT);
        let long = format!("{} 7/10", "a".repeat(60));
        assert_eq!(extract_name(&long, None), UNKNOWN_RESTAURANT);
    }

    #[test]
    fn test_handle_takes_precedence_over_first_line() {
        assert_eq!(
            extract_name("Lovely lunch at @dishoom 8/10", Some("dishoom")),
            "dishoom"
        );
    }

    #[test]
    fn test_first_mention_is_the_restaurant() {
        assert_eq!(
            extract_handle("@five_guys with @friend.one 9/10").as_deref(),
            Some("five_guys")
        );
        assert_eq!(extract_handle("no mentions 9/10"), None);
    }

    #[test]
    fn test_items_with_bullets_and_dashes() {
        let caption = "@x 8/10\n• Fries — crispy\n- Shake - thick and cold";
        assert_eq!(
            extract_items(caption),
            vec!["Fries: crispy".to_string(), "Shake: thick and cold".to_string()]
        );
    }

    #[test]
    fn test_approval_uses_reviewer_handle() {
        let caption = "@dishoom 9/10\n@Foodie.Fan approved ✅";
        assert!(CaptionParser::new("@foodie.fan").is_approved(caption));
        assert!(!CaptionParser::default().is_approved(caption));
        assert!(!CaptionParser::new("foodie").is_approved("@foodieXfan APPROVED"));
    }

    #[test]
    fn test_parse_posts_skips_non_reviews() {
        let posts = vec![
            Post::new("@a 8/10", "2024-01-01T00:00:00Z"),
            Post::new("Great day out today!", "2024-01-02T00:00:00Z"),
            Post::new("@b 6/10", "2024-01-03T00:00:00Z"),
        ];
        let reviews = parse_posts(&CaptionParser::default(), &posts);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].restaurant_name, "a");
        assert_eq!(reviews[1].restaurant_name, "b");
    }
}
