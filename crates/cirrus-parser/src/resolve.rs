//! Service resolution.
//!
//! [`Resolver::resolve`] maps a candidate name or identifier onto a canonical
//! [`ServiceDescriptor`]. Lookups run in this order:
//!
//! 1. exact id or title match,
//! 2. alias table lookup (also retried with the vendor prefix stripped),
//! 3. fuzzy [`score`](crate::score) against every canonical title,
//! 4. a synthesized placeholder.
//!
//! When several catalog entries qualify, the provider hinted by the input text
//! wins, then catalog order. Resolution never fails.

use std::{collections::HashMap, sync::OnceLock};

use log::{debug, trace, warn};

use cirrus_core::{provider::Provider, service::ServiceDescriptor};

use crate::{
    catalog::CatalogSet,
    score::{DEFAULT_THRESHOLD, Fingerprint, normalize, slugify, strip_vendor_prefix},
};

/// Scores closer than this are considered equal.
const SCORE_EPSILON: f64 = 1e-9;

/// How a descriptor was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Alias,
    Fuzzy(f64),
    Placeholder,
}

/// A resolved descriptor and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    descriptor: ServiceDescriptor,
    kind: MatchKind,
}

impl Resolution {
    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    pub fn into_descriptor(self) -> ServiceDescriptor {
        self.descriptor
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }
}

/// Lookup tables derived from the catalogs, built on first use.
#[derive(Debug)]
struct TitleIndex {
    exact: HashMap<String, Vec<usize>>,
    aliases: HashMap<String, Vec<usize>>,
    titles: Vec<Fingerprint>,
}

/// Maps candidate names onto catalog descriptors.
///
/// The title index is computed lazily, once per resolver, and is shared
/// read-only afterwards, so a resolver can serve concurrent callers.
///
/// # Examples
///
/// ```
/// # use cirrus_parser::{CatalogSet, Resolver};
/// let resolver = Resolver::new(CatalogSet::builtin());
///
/// assert_eq!(resolver.resolve("Azure Functions").id(), "azure-functions");
/// assert_eq!(resolver.resolve_with_context("redis", "on AWS").id(), "aws-elasticache");
/// assert!(resolver.resolve("SuperWidget Service").is_placeholder());
/// ```
#[derive(Debug)]
pub struct Resolver {
    catalogs: CatalogSet,
    threshold: f64,
    preferred_provider: Option<Provider>,
    extra_aliases: Vec<(String, String)>,
    index: OnceLock<TitleIndex>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(CatalogSet::builtin())
    }
}

impl Resolver {
    pub fn new(catalogs: CatalogSet) -> Self {
        Self {
            catalogs,
            threshold: DEFAULT_THRESHOLD,
            preferred_provider: None,
            extra_aliases: Vec::new(),
            index: OnceLock::new(),
        }
    }

    /// Overrides the minimum fuzzy score.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the provider preferred when the input text carries no vendor hint.
    pub fn with_preferred_provider(mut self, provider: Option<Provider>) -> Self {
        self.preferred_provider = provider;
        self
    }

    /// Adds aliases mapping onto canonical titles (or ids).
    ///
    /// Extra aliases take precedence over built-in ones.
    pub fn with_extra_aliases<I, A, T>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<String>,
    {
        self.extra_aliases
            .extend(aliases.into_iter().map(|(alias, title)| (alias.into(), title.into())));
        self.index = OnceLock::new();
        self
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns true once the title index has been built.
    pub fn is_cached(&self) -> bool {
        self.index.get().is_some()
    }

    /// Drops the memoized title index; it is rebuilt on the next lookup.
    pub fn reset_cache(&mut self) {
        self.index.take();
    }

    /// Resolves `query` using only the query itself as vendor-hint context.
    pub fn resolve(&self, query: &str) -> ServiceDescriptor {
        self.resolve_with_context(query, query)
    }

    /// Resolves `query`, biased toward the provider hinted by `context`.
    pub fn resolve_with_context(&self, query: &str, context: &str) -> ServiceDescriptor {
        self.resolve_detailed(query, context).into_descriptor()
    }

    /// Resolves `query` and reports how the match was made.
    pub fn resolve_detailed(&self, query: &str, context: &str) -> Resolution {
        let bias = Provider::detect_hint(context)
            .or_else(|| Provider::detect_hint(query))
            .or(self.preferred_provider);

        let normalized = normalize(query);
        let found = (!normalized.is_empty())
            .then(|| self.lookup(&normalized, bias))
            .flatten();

        let resolution = match found {
            Some((entry_index, kind)) => Resolution {
                descriptor: self.catalogs.entries()[entry_index].to_descriptor(),
                kind,
            },
            None => {
                debug!(query = query; "No catalog match, synthesizing placeholder");
                Resolution {
                    descriptor: ServiceDescriptor::placeholder(slugify(query), query.trim()),
                    kind: MatchKind::Placeholder,
                }
            }
        };

        trace!(
            query = query,
            id = resolution.descriptor.id(),
            kind:? = resolution.kind,
            bias:? = bias;
            "Resolved candidate"
        );
        resolution
    }

    fn lookup(&self, normalized: &str, bias: Option<Provider>) -> Option<(usize, MatchKind)> {
        let index = self.index();
        let pick = |table: &HashMap<String, Vec<usize>>, key: &str| {
            table.get(key).and_then(|entries| self.pick(entries, bias))
        };

        if let Some(found) = pick(&index.exact, normalized) {
            return Some((found, MatchKind::Exact));
        }
        if let Some(found) = pick(&index.aliases, normalized) {
            return Some((found, MatchKind::Alias));
        }
        if let Some(stripped) = strip_vendor_prefix(normalized) {
            if let Some(found) = pick(&index.aliases, stripped) {
                return Some((found, MatchKind::Alias));
            }
            if let Some(found) = pick(&index.exact, stripped) {
                return Some((found, MatchKind::Exact));
            }
        }

        self.fuzzy(index, normalized, bias)
    }

    fn fuzzy(
        &self,
        index: &TitleIndex,
        normalized: &str,
        bias: Option<Provider>,
    ) -> Option<(usize, MatchKind)> {
        let query = Fingerprint::new(normalized);
        let is_biased = |entry_index: usize| {
            bias.is_some_and(|bias| self.catalogs.entries()[entry_index].provider() == bias)
        };

        let mut best: Option<(usize, f64)> = None;
        for (entry_index, title) in index.titles.iter().enumerate() {
            let score = query.score(title);
            let better = match best {
                None => true,
                Some((best_index, best_score)) => {
                    score > best_score + SCORE_EPSILON
                        || ((score - best_score).abs() <= SCORE_EPSILON
                            && is_biased(entry_index)
                            && !is_biased(best_index))
                }
            };
            if better {
                best = Some((entry_index, score));
            }
        }

        best.filter(|&(_, score)| score > self.threshold)
            .map(|(entry_index, score)| (entry_index, MatchKind::Fuzzy(score)))
    }

    /// Picks the first entry of the biased provider, else the first entry.
    fn pick(&self, entries: &[usize], bias: Option<Provider>) -> Option<usize> {
        let is_biased = |index: &&usize| Some(self.catalogs.entries()[**index].provider()) == bias;
        entries
            .iter()
            .find(is_biased)
            .or_else(|| entries.first())
            .copied()
    }

    fn index(&self) -> &TitleIndex {
        self.index.get_or_init(|| self.build_index())
    }

    fn build_index(&self) -> TitleIndex {
        let entries = self.catalogs.entries();
        let mut exact: HashMap<String, Vec<usize>> = HashMap::new();
        let mut aliases: HashMap<String, Vec<usize>> = HashMap::new();

        for (entry_index, entry) in entries.iter().enumerate() {
            for key in [normalize(entry.id()), normalize(entry.title())] {
                let slot = exact.entry(key).or_default();
                if !slot.contains(&entry_index) {
                    slot.push(entry_index);
                }
            }
            for alias in entry.aliases() {
                let slot = aliases.entry(normalize(alias)).or_default();
                if !slot.contains(&entry_index) {
                    slot.push(entry_index);
                }
            }
        }

        for (alias, target) in &self.extra_aliases {
            let Some(targets) = exact.get(&normalize(target)).cloned() else {
                warn!(alias = alias.as_str(), target = target.as_str(); "Extra alias targets an unknown service, ignored");
                continue;
            };
            let slot = aliases.entry(normalize(alias)).or_default();
            slot.retain(|entry_index| !targets.contains(entry_index));
            slot.splice(0..0, targets);
        }

        let titles = entries
            .iter()
            .map(|entry| Fingerprint::new(entry.title()))
            .collect();

        debug!(entries = entries.len(), aliases = aliases.len(); "Title index built");
        TitleIndex {
            exact,
            aliases,
            titles,
        }
    }
}
