//! Text normalization and the fuzzy match score.
//!
//! The score blends two signals:
//!
//! - a **token overlap ratio**, `|Q ∩ C| / max(|Q|, |C|)` over word sets with
//!   vendor and filler words removed, and
//! - a **trigram Jaccard similarity** over the character trigrams of the
//!   normalized strings.
//!
//! ```
//! # use cirrus_parser::score::{score, normalize, slugify};
//! assert_eq!(normalize("  Azure  Cosmos-DB! "), "azure cosmos db");
//! assert_eq!(slugify("SuperWidget Service"), "superwidget-service");
//! assert!(score("Cosmos DB", "Azure Cosmos DB") > score("Cosmos DB", "Amazon S3"));
//! ```

use std::collections::HashSet;

/// Weight of the token overlap ratio.
pub const TOKEN_WEIGHT: f64 = 0.6;

/// Weight of the trigram Jaccard similarity.
pub const TRIGRAM_WEIGHT: f64 = 0.4;

/// Minimum score a fuzzy match must exceed to be accepted.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// Words naming a vendor rather than a service.
pub const VENDOR_WORDS: &[&str] = &["azure", "microsoft", "aws", "amazon", "google", "gcp"];

/// Words carrying no identifying information.
const FILLER_WORDS: &[&str] = &[
    "a", "an", "and", "cloud", "for", "of", "on", "service", "services", "the", "to", "with",
];

/// Lowercases `text`, collapses every non-alphanumeric run to one space and trims.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    normalized
}

/// Derives an id slug: the normalized text with spaces replaced by `-`.
///
/// An input without any alphanumeric character yields `service`.
pub fn slugify(text: &str) -> String {
    let slug = normalize(text).replace(' ', "-");
    if slug.is_empty() {
        "service".to_string()
    } else {
        slug
    }
}

/// Removes leading vendor words from normalized text.
///
/// Returns `None` when nothing was removed or nothing would be left.
pub fn strip_vendor_prefix(normalized: &str) -> Option<&str> {
    let mut rest = normalized;
    while let Some((head, tail)) = rest.split_once(' ') {
        if !VENDOR_WORDS.contains(&head) {
            break;
        }
        rest = tail;
    }
    (rest.len() < normalized.len()).then_some(rest)
}

/// Precomputed word and trigram sets of one string.
#[derive(Debug, Clone)]
pub struct Fingerprint {
    normalized: String,
    words: HashSet<String>,
    meaningful: HashSet<String>,
    trigrams: HashSet<String>,
}

impl Fingerprint {
    pub fn new(text: &str) -> Self {
        let normalized = normalize(text);
        let words: HashSet<String> = normalized
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(String::from)
            .collect();
        let meaningful = words
            .iter()
            .filter(|word| {
                !VENDOR_WORDS.contains(&word.as_str()) && !FILLER_WORDS.contains(&word.as_str())
            })
            .cloned()
            .collect();
        let trigrams = trigrams(&normalized);

        Self {
            normalized,
            words,
            meaningful,
            trigrams,
        }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Token overlap ratio against `other`.
    pub fn token_overlap(&self, other: &Fingerprint) -> f64 {
        let (ours, theirs) = if self.meaningful.is_empty() || other.meaningful.is_empty() {
            (&self.words, &other.words)
        } else {
            (&self.meaningful, &other.meaningful)
        };

        let largest = ours.len().max(theirs.len());
        if largest == 0 {
            return 0.0;
        }
        ours.intersection(theirs).count() as f64 / largest as f64
    }

    /// Trigram Jaccard similarity against `other`.
    pub fn trigram_similarity(&self, other: &Fingerprint) -> f64 {
        let union = self.trigrams.union(&other.trigrams).count();
        if union == 0 {
            return 0.0;
        }
        self.trigrams.intersection(&other.trigrams).count() as f64 / union as f64
    }

    /// The weighted fuzzy score against `other`, in `[0, 1]`.
    pub fn score(&self, other: &Fingerprint) -> f64 {
        TOKEN_WEIGHT * self.token_overlap(other) + TRIGRAM_WEIGHT * self.trigram_similarity(other)
    }
}

/// Character trigrams of a normalized string.
///
/// A non-empty string shorter than three characters is its own single gram.
pub fn trigrams(normalized: &str) -> HashSet<String> {
    let chars: Vec<char> = normalized.chars().collect();
    match chars.len() {
        0 => HashSet::new(),
        1 | 2 => HashSet::from([normalized.to_string()]),
        _ => chars.windows(3).map(|window| window.iter().collect()).collect(),
    }
}

/// Scores how well `query` matches `candidate`, in `[0, 1]`.
pub fn score(query: &str, candidate: &str) -> f64 {
    Fingerprint::new(query).score(&Fingerprint::new(candidate))
}
