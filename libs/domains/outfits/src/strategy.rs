use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the resolver turns labels into a recommendation. Selected by configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LookupStrategy {
    /// Classify labels into a wanted category and fetch one item of that type
    #[default]
    CategoryRule,
    /// Embed the labels and fetch the nearest items from the vector index
    SimilaritySearch,
    /// Return the detected labels unchanged
    RawLabelPassthrough,
}

impl LookupStrategy {
    /// Whether this strategy needs the vector index and query embedder collaborators.
    pub fn needs_similarity(&self) -> bool {
        matches!(self, LookupStrategy::SimilaritySearch)
    }
}
