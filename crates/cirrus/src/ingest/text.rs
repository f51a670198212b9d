//! Free-text path.

use std::ops::Range;

use indexmap::IndexMap;
use log::{debug, trace};

use cirrus_core::{architecture::Connection, service::ServiceDescriptor};
use cirrus_parser::{Candidate, Resolver};

use super::Draft;

/// Words that, between two mentions, mean data flows from the first to the second.
const FLOW_CUES: &[&str] = &[
    "to",
    "into",
    "writes",
    "sends",
    "calls",
    "triggers",
    "reads",
    "streams",
    "publishes",
    "forwards",
    "routes",
    "stores",
    "connects",
    "then",
];

/// Symbols with the same meaning as [`FLOW_CUES`].
const FLOW_ARROWS: &[&str] = &["->", "→", "=>"];

/// A bare `from` with no forward cue after it reverses the direction:
/// `A gets data from B` means `B -> A`.
const SOURCE_CUE: &str = "from";

/// Word pairs that reverse the direction: `A reads from B` means `B -> A`.
const REVERSED_CUES: &[(&str, &str)] = &[
    ("reads", "from"),
    ("pulls", "from"),
    ("fetches", "from"),
    ("receives", "from"),
    ("consumes", "from"),
];

/// One resolved occurrence of a service in the text.
#[derive(Debug)]
struct Mention {
    span: Range<usize>,
    service: usize,
}

/// Builds a draft from text candidates.
///
/// Every candidate is resolved with the whole text as vendor context;
/// candidates resolving to the same descriptor merge into one service.
pub(crate) fn from_text(candidates: &[Candidate], text: &str, resolver: &Resolver) -> Draft {
    let mut services: IndexMap<String, ServiceDescriptor> = IndexMap::new();
    let mut mentions = Vec::new();

    for candidate in candidates {
        let descriptor = resolver.resolve_with_context(candidate.text(), text);
        trace!(candidate = candidate.text(), id = descriptor.id(); "Candidate resolved");
        let entry = services.entry(descriptor.id().to_string());
        let service = entry.index();
        entry.or_insert(descriptor);

        mentions.extend(candidate.spans().iter().map(|span| Mention {
            span: span.clone(),
            service,
        }));
    }
    mentions.sort_by_key(|mention| mention.span.start);

    let services: Vec<ServiceDescriptor> = services.into_values().collect();
    let connections = infer_connections(text, &mentions, &services);

    debug!(
        candidates = candidates.len(),
        services = services.len(),
        connections = connections.len();
        "Text ingested"
    );
    Draft {
        services,
        connections,
        ..Draft::default()
    }
}

/// Connects consecutive mentions of one sentence separated by a flow cue.
fn infer_connections(
    text: &str,
    mentions: &[Mention],
    services: &[ServiceDescriptor],
) -> Vec<Connection> {
    mentions
        .windows(2)
        .filter_map(|pair| {
            let (first, second) = (&pair[0], &pair[1]);
            if first.service == second.service || first.span.end > second.span.start {
                return None;
            }
            let between = text.get(first.span.end..second.span.start)?;
            if crosses_sentence(between) {
                return None;
            }

            let (from, to) = match flow_direction(between)? {
                Direction::Forward => (first.service, second.service),
                Direction::Reverse => (second.service, first.service),
            };
            Some(Connection::new(services[from].id(), services[to].id()))
        })
        .collect()
}

/// Returns true if a sentence boundary lies inside `between`.
///
/// A boundary is a line break, or `.`, `!`, `?` or `;` followed by whitespace.
fn crosses_sentence(between: &str) -> bool {
    let mut chars = between.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' => return true,
            '.' | '!' | '?' | ';' => {
                if chars.peek().is_none_or(|next| next.is_whitespace()) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

fn flow_direction(between: &str) -> Option<Direction> {
    let lowered = between.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    let reversed = words.windows(2).any(|pair| {
        REVERSED_CUES
            .iter()
            .any(|&(verb, preposition)| pair[0] == verb && pair[1] == preposition)
    });
    if reversed {
        return Some(Direction::Reverse);
    }

    if FLOW_ARROWS.iter().any(|arrow| lowered.contains(arrow)) {
        return Some(Direction::Forward);
    }
    if let Some(source) = words.iter().rposition(|word| *word == SOURCE_CUE) {
        if !words[source + 1..].iter().any(|word| FLOW_CUES.contains(word)) {
            return Some(Direction::Reverse);
        }
    }

    words
        .iter()
        .any(|word| FLOW_CUES.contains(word))
        .then_some(Direction::Forward)
}

#[cfg(test)]
mod tests {
    use cirrus_parser::{CatalogSet, Extraction, Extractor};

    use super::*;

    fn ingest(text: &str) -> Draft {
        let resolver = Resolver::new(CatalogSet::builtin());
        let extractor = Extractor::new(resolver.catalogs());
        let Extraction::Candidates(candidates) = extractor.extract(text) else {
            panic!("unexpected payload");
        };
        from_text(&candidates, text, &resolver)
    }

    fn pairs(draft: &Draft) -> Vec<(&str, &str)> {
        draft
            .connections
            .iter()
            .map(|connection| (connection.from(), connection.to()))
            .collect()
    }

    #[test]
    fn test_simple_flow() {
        let draft = ingest("Use Azure Functions to write into Cosmos DB.");

        let ids: Vec<_> = draft.services.iter().map(ServiceDescriptor::id).collect();
        assert_eq!(ids, ["azure-functions", "azure-cosmos-db"]);
        assert_eq!(pairs(&draft), [("azure-functions", "azure-cosmos-db")]);
    }

    #[test]
    fn test_reads_from_reverses_direction() {
        let draft = ingest("AWS Lambda reads from Amazon SQS.");

        assert_eq!(pairs(&draft), [("aws-sqs", "aws-lambda")]);
    }

    #[test]
    fn test_bare_from_reverses_direction() {
        let draft = ingest("Azure Functions gets data from Cosmos DB.");

        assert_eq!(pairs(&draft), [("azure-cosmos-db", "azure-functions")]);
    }

    #[test]
    fn test_flow_direction_cues() {
        assert_eq!(flow_direction(" gets data from "), Some(Direction::Reverse));
        assert_eq!(flow_direction(" sends events from the queue to "), Some(Direction::Forward));
        assert_eq!(flow_direction(" pulls from "), Some(Direction::Reverse));
        assert_eq!(flow_direction(" -> "), Some(Direction::Forward));
        assert_eq!(flow_direction(" and "), None);
    }

    #[test]
    fn test_arrow_chain() {
        let draft = ingest("Amazon API Gateway -> AWS Lambda -> Amazon DynamoDB");

        assert_eq!(
            pairs(&draft),
            [("aws-api-gateway", "aws-lambda"), ("aws-lambda", "aws-dynamodb")]
        );
    }

    #[test]
    fn test_no_connection_across_sentences() {
        let draft = ingest("We run AWS Lambda. Amazon S3 holds the files.");

        assert_eq!(draft.services.len(), 2);
        assert!(draft.connections.is_empty());
    }

    #[test]
    fn test_no_connection_without_cue() {
        let draft = ingest("AWS Lambda and Amazon S3");

        assert!(draft.connections.is_empty());
    }

    #[test]
    fn test_repeated_mentions_merge() {
        let draft = ingest("S3 feeds Lambda. Lambda writes to S3.");

        assert_eq!(draft.services.len(), 2);
        assert_eq!(pairs(&draft), [("aws-lambda", "aws-s3")]);
    }

    #[test]
    fn test_sentence_boundary_detection() {
        assert!(crosses_sentence(". Then "));
        assert!(crosses_sentence(" and\n"));
        assert!(!crosses_sentence(".Web/"));
        assert!(!crosses_sentence(" to "));
    }
}
