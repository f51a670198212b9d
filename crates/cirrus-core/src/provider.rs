//! Cloud providers known to the engine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The closed set of vendors a [`ServiceDescriptor`](crate::service::ServiceDescriptor)
/// can belong to.
///
/// [`Provider::Generic`] is used for placeholder descriptors and for services that
/// are not tied to a vendor catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Azure,
    Aws,
    Gcp,
    Generic,
}

impl Provider {
    /// The vendor providers in their default lookup order.
    pub const CLOUDS: [Provider; 3] = [Provider::Azure, Provider::Aws, Provider::Gcp];

    /// Returns the lowercase name of the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Azure => "azure",
            Provider::Aws => "aws",
            Provider::Gcp => "gcp",
            Provider::Generic => "generic",
        }
    }

    /// Words that, when present in free text, bias resolution toward this provider.
    pub fn hint_words(self) -> &'static [&'static str] {
        match self {
            Provider::Azure => &["azure", "microsoft", "azurerm"],
            Provider::Aws => &["aws", "amazon"],
            Provider::Gcp => &["gcp", "google"],
            Provider::Generic => &[],
        }
    }

    /// Detects the provider whose hint words occur most often in `text`.
    ///
    /// Words are matched whole and case-insensitively. Ties are resolved in
    /// [`Provider::CLOUDS`] order. Returns `None` when no hint word occurs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cirrus_core::provider::Provider;
    /// assert_eq!(Provider::detect_hint("Deploy on Amazon S3"), Some(Provider::Aws));
    /// assert_eq!(Provider::detect_hint("a queue and a database"), None);
    /// ```
    pub fn detect_hint(text: &str) -> Option<Provider> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();

        let mut best: Option<(Provider, usize)> = None;
        for provider in Self::CLOUDS {
            let hits = words
                .iter()
                .filter(|word| provider.hint_words().contains(word))
                .count();
            if hits > 0 && best.is_none_or(|(_, best_hits)| hits > best_hits) {
                best = Some((provider, hits));
            }
        }
        best.map(|(provider, _)| provider)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "azure" | "microsoft" | "msft" => Ok(Provider::Azure),
            "aws" | "amazon" => Ok(Provider::Aws),
            "gcp" | "google" | "googlecloud" | "google-cloud" => Ok(Provider::Gcp),
            "generic" | "custom" | "other" => Ok(Provider::Generic),
            _ => Err(ModelError::UnknownProvider(s.to_string())),
        }
    }
}
