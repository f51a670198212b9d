//! Candidate extraction from raw input.
//!
//! [`Extractor::extract`] first looks for an embedded structured payload and,
//! failing that, scans the text for strings that may name a cloud service.
//! Extraction never fails: a payload that does not decode is skipped and the
//! text path runs instead.

use std::{ops::Range, sync::OnceLock};

use indexmap::IndexMap;
use log::{debug, trace, warn};
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::{
    catalog::CatalogSet,
    payload::{RawPayload, is_architecture_object},
    score::normalize,
};

/// Phrases announcing an embedded payload, lowercase.
const PAYLOAD_MARKERS: [&str; 4] = [
    "architecture_json",
    "architecture json",
    "architecture:",
    "diagram json",
];

/// Capitalised words that open a sentence rather than a service name.
const STOP_WORDS: &[&str] = &[
    "a", "add", "all", "also", "an", "and", "build", "create", "deploy", "each", "every", "for",
    "from", "in", "into", "it", "its", "my", "new", "on", "our", "that", "the", "their", "then",
    "this", "to", "use", "using", "via", "we", "when", "where", "with", "your",
];

/// How a candidate was found. Earlier variants win when two matches share a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateKind {
    /// A vendor resource identifier (`Microsoft.Web/sites`, `AWS::S3::Bucket`, `aws_s3_bucket`).
    ResourceType,
    /// A vendor word followed by capitalised words (`Azure Cosmos DB`).
    VendorName,
    /// Capitalised words ending in a service noun (`Payment Service`).
    ServicePhrase,
    /// A catalog title or alias found in the text.
    Alias,
}

/// A string that may name a cloud service, with every place it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    text: String,
    kind: CandidateKind,
    spans: Vec<Range<usize>>,
}

impl Candidate {
    /// The text of the first occurrence.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    /// Byte ranges of every occurrence, in text order.
    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }
}

/// The result of scanning one input.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// The input embeds a structured payload.
    Payload(RawPayload),
    /// Free text: deduplicated candidates in order of first appearance.
    Candidates(Vec<Candidate>),
}

#[derive(Debug)]
struct Match<'a> {
    range: Range<usize>,
    text: &'a str,
    kind: CandidateKind,
}

/// Scans raw input for payloads and candidate service names.
///
/// The extractor owns a matcher for every title and alias of its catalogs,
/// so build it once per [`CatalogSet`] and reuse it.
#[derive(Debug, Clone)]
pub struct Extractor {
    alias_pattern: Option<Regex>,
}

impl Extractor {
    pub fn new(catalogs: &CatalogSet) -> Self {
        Self {
            alias_pattern: build_alias_pattern(&catalogs.mention_phrases()),
        }
    }

    /// Extracts either an embedded payload or the candidate list.
    pub fn extract(&self, text: &str) -> Extraction {
        match find_payload(text) {
            Some(payload) => {
                debug!(
                    services = payload.services().len(),
                    groups = payload.groups().len(),
                    connections = payload.connections().len();
                    "Structured payload found"
                );
                Extraction::Payload(payload)
            }
            None => {
                let candidates = self.candidates(text);
                debug!(candidates = candidates.len(); "Text candidates extracted");
                Extraction::Candidates(candidates)
            }
        }
    }

    /// Scans free text for candidates, ignoring any embedded payload.
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut matches = Vec::new();
        collect_matches(resource_type_pattern(), CandidateKind::ResourceType, text, &mut matches);
        collect_matches(vendor_name_pattern(), CandidateKind::VendorName, text, &mut matches);
        collect_service_phrases(text, &mut matches);
        if let Some(alias_pattern) = &self.alias_pattern {
            collect_matches(alias_pattern, CandidateKind::Alias, text, &mut matches);
        }

        let accepted = suppress_overlaps(matches);

        let mut candidates: IndexMap<String, Candidate> = IndexMap::new();
        for found in accepted {
            let key = normalize(found.text);
            if key.is_empty() {
                continue;
            }
            trace!(text = found.text, kind:? = found.kind; "Candidate match");
            candidates
                .entry(key)
                .and_modify(|candidate| candidate.spans.push(found.range.clone()))
                .or_insert_with(|| Candidate {
                    text: found.text.to_string(),
                    kind: found.kind,
                    spans: vec![found.range.clone()],
                });
        }
        candidates.into_values().collect()
    }
}

/// Locates and decodes an embedded payload.
///
/// Locations are tried in order: the object after each marker phrase, the
/// body of each fenced code block, then the whole input. The first object
/// that parses and has a recognised top-level field wins.
pub fn find_payload(text: &str) -> Option<RawPayload> {
    let mut locations = marker_objects(text);
    locations.extend(fenced_objects(text));
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        locations.extend(balanced_object(trimmed, 0));
    }

    locations.into_iter().find_map(decode_payload)
}

/// Returns the balanced `{...}` object starting at byte `start` of `text`.
///
/// Braces inside JSON string literals (including escaped quotes) are ignored.
/// Returns `None` if `text[start..]` does not begin with `{` or the object
/// never closes.
///
/// ```
/// # use cirrus_parser::extract::balanced_object;
/// let text = r#"see {"a": "}", "b": {"c": 1}} trailing"#;
/// assert_eq!(balanced_object(text, 4), Some(r#"{"a": "}", "b": {"c": 1}}"#));
/// assert_eq!(balanced_object("{ never closed", 0), None);
/// ```
pub fn balanced_object(text: &str, start: usize) -> Option<&str> {
    let tail = text.get(start..)?;
    if !tail.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in tail.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&tail[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn marker_objects(text: &str) -> Vec<&str> {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lowered = text.to_ascii_lowercase();
    let mut marker_ends: Vec<usize> = PAYLOAD_MARKERS
        .iter()
        .flat_map(|marker| {
            lowered
                .match_indices(marker)
                .map(move |(position, _)| position + marker.len())
        })
        .collect();
    marker_ends.sort_unstable();
    marker_ends.dedup();

    marker_ends
        .into_iter()
        .filter_map(|end| {
            let open = text[end..].find('{')? + end;
            balanced_object(text, open)
        })
        .collect()
}

fn fenced_objects(text: &str) -> Vec<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)```").expect("valid regex")
    });

    re.captures_iter(text)
        .filter_map(|captures| {
            let body = captures.get(1)?.as_str().trim();
            balanced_object(body, 0)
        })
        .collect()
}

fn decode_payload(candidate: &str) -> Option<RawPayload> {
    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(err) => {
            debug!(err:% = err; "Embedded object is not valid JSON");
            return None;
        }
    };
    if !is_architecture_object(&value) {
        trace!("Embedded object has no architecture fields");
        return None;
    }
    match serde_json::from_value(value) {
        Ok(payload) => Some(payload),
        Err(err) => {
            warn!(err:% = err; "Malformed architecture payload, falling back to text");
            None
        }
    }
}

fn resource_type_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\bMicrosoft\.[A-Za-z]+(?:/[A-Za-z]+)+",
            r"|\bAWS::[A-Za-z0-9]+::[A-Za-z0-9]+",
            r"|\b(?:azurerm|aws|google)_[a-z0-9_]+\b",
        ))
        .expect("valid regex")
    })
}

fn vendor_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(?:Azure|AWS|Amazon|Google Cloud|Google|Microsoft|Cloud)(?:[ \t]+[A-Z0-9][A-Za-z0-9]*){1,3}\b",
        )
        .expect("valid regex")
    })
}

fn service_phrase_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\b(?:[A-Z][A-Za-z0-9]*[ \t]+){1,3}",
            r"(?:Service|Services|API|Gateway|Database|DB|Queue|Cache|Store|Bus|Server|Worker",
            r"|Function|Storage|Bucket|Topic|Broker|Registry|Portal|Frontend|Backend|App)\b",
        ))
        .expect("valid regex")
    })
}

fn build_alias_pattern(phrases: &[&str]) -> Option<Regex> {
    let mut phrases: Vec<&str> = phrases
        .iter()
        .copied()
        .filter(|phrase| {
            let bounded = |ch: Option<char>| ch.is_some_and(|ch| ch.is_ascii_alphanumeric());
            bounded(phrase.chars().next()) && bounded(phrase.chars().next_back())
        })
        .collect();
    if phrases.is_empty() {
        return None;
    }
    // Longest first so the alternation prefers the most complete phrase.
    phrases.sort_by_key(|phrase| std::cmp::Reverse(phrase.len()));

    let alternation = phrases
        .iter()
        .map(|phrase| regex::escape(phrase))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .size_limit(32 * (1 << 20))
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            warn!(err:% = err; "Alias matcher could not be built, alias scanning disabled");
            None
        }
    }
}

fn collect_matches<'a>(
    pattern: &Regex,
    kind: CandidateKind,
    text: &'a str,
    matches: &mut Vec<Match<'a>>,
) {
    matches.extend(pattern.find_iter(text).map(|found| Match {
        range: found.range(),
        text: found.as_str(),
        kind,
    }));
}

fn collect_service_phrases<'a>(text: &'a str, matches: &mut Vec<Match<'a>>) {
    for found in service_phrase_pattern().find_iter(text) {
        let mut start = found.start();
        let mut rest = found.as_str();

        // Drop leading stop words; the service noun itself is never dropped.
        while let Some((word, tail)) = rest.split_once(char::is_whitespace) {
            if !STOP_WORDS.contains(&word.to_ascii_lowercase().as_str()) {
                break;
            }
            let tail = tail.trim_start();
            start += rest.len() - tail.len();
            rest = tail;
        }

        // A bare noun ("The Service") names nothing.
        if !rest.contains(char::is_whitespace) {
            continue;
        }
        matches.push(Match {
            range: start..found.end(),
            text: rest,
            kind: CandidateKind::ServicePhrase,
        });
    }
}

/// Keeps the longest matches and drops every match overlapping one already kept.
fn suppress_overlaps(mut matches: Vec<Match<'_>>) -> Vec<Match<'_>> {
    matches.sort_by(|a, b| {
        b.range
            .len()
            .cmp(&a.range.len())
            .then(a.range.start.cmp(&b.range.start))
            .then(a.kind.cmp(&b.kind))
    });

    let mut accepted: Vec<Match<'_>> = Vec::with_capacity(matches.len());
    for candidate in matches {
        let overlaps = accepted.iter().any(|kept| {
            kept.range.start < candidate.range.end && candidate.range.start < kept.range.end
        });
        if !overlaps {
            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|found| found.range.start);
    accepted
}
