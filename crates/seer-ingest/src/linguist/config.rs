//! Linguist catalog source configuration

use serde::{Deserialize, Serialize};

use super::projector::ProjectionOptions;

/// Upstream location of Linguist's language catalog
pub const DEFAULT_LINGUIST_URL: &str =
    "https://raw.githubusercontent.com/github/linguist/master/lib/linguist/languages.yml";

/// Configuration for a catalog load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguistConfig {
    /// URL of `languages.yml`
    pub remote_url: String,
    pub projection: ProjectionOptions,
}

impl Default for LinguistConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_LINGUIST_URL.to_string(),
            projection: ProjectionOptions::default(),
        }
    }
}

impl LinguistConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self
    }

    pub fn with_projection(mut self, projection: ProjectionOptions) -> Self {
        self.projection = projection;
        self
    }
}
