use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// A textual tag with confidence describing what the label detector saw in an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Label {
    pub description: String,
    /// Confidence in `[0, 1]`
    pub score: f32,
}

impl Label {
    pub fn new(description: impl Into<String>, score: f32) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// Coarse clothing category, the key of rule-based matching
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClothingType {
    Top,
    Bottom,
    Outer,
    Footwear,
    Accessory,
    /// Any category this service has no rule for
    #[serde(other)]
    Other,
}

/// A clothing item record owned by the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ClothingType,
    pub name: String,
    pub image_url: String,
}

/// Query for the exact-match category lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryQuery {
    pub wanted_type: ClothingType,
}

/// Query for the nearest-neighbor lookup
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityQuery {
    pub embedding: Vec<f32>,
    pub neighbor_count: u32,
    /// Restrict namespace the allow-list applies to
    pub namespace: String,
    pub allowed_labels: Vec<String>,
}

/// Query derived from one request's labels. Never reused across requests.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationQuery {
    Category(CategoryQuery),
    Similarity(SimilarityQuery),
}

/// One similarity-search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: String,
    pub distance: f64,
}

/// Resolver outcome, shaped by the lookup strategy that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Item(ClothingItem),
    Candidates(Vec<ClothingItem>),
    Labels(Vec<Label>),
}

/// Request body: the uploaded photo's path inside the storage bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendOutfitRequest {
    #[validate(
        required(message = "filePath is required"),
        length(min = 1, message = "filePath must not be empty")
    )]
    #[schema(example = "uploads/user-42/jeans.jpg")]
    pub file_path: Option<String>,
}

impl RecommendOutfitRequest {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.into()),
        }
    }
}

/// Successful response body. Exactly one of the optional fields is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecommendationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<ClothingItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<ClothingItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        let mut response = Self {
            success: true,
            recommendation: None,
            recommendations: None,
            labels: None,
        };
        match recommendation {
            Recommendation::Item(item) => response.recommendation = Some(item),
            Recommendation::Candidates(items) => response.recommendations = Some(items),
            Recommendation::Labels(labels) => response.labels = Some(labels),
        }
        response
    }
}
