//! Firestore REST implementation of [`ItemRepository`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::FirestoreConfig;
use crate::error::{OutfitError, OutfitResult};
use crate::google::{GoogleAuth, describe_failure};
use crate::models::{ClothingItem, ClothingType};
use crate::repository::ItemRepository;

/// Firestore-backed item repository
pub struct FirestoreItemRepository {
    auth: GoogleAuth,
    config: FirestoreConfig,
}

impl FirestoreItemRepository {
    pub fn new(auth: GoogleAuth, config: FirestoreConfig) -> Self {
        Self { auth, config }
    }

    fn documents_url(&self) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/{}/documents",
            self.auth.project_id(),
            urlencoding::encode(&self.config.database)
        )
    }

    fn run_query_url(&self) -> String {
        format!("{}:runQuery", self.documents_url())
    }

    fn document_url(&self, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.documents_url(),
            urlencoding::encode(&self.config.collection),
            urlencoding::encode(id)
        )
    }

    fn type_query(&self, item_type: ClothingType) -> RunQueryRequest {
        RunQueryRequest {
            structured_query: StructuredQuery {
                from: vec![CollectionSelector {
                    collection_id: self.config.collection.clone(),
                }],
                filter: Filter {
                    field_filter: FieldFilter {
                        field: FieldReference {
                            field_path: "type".to_string(),
                        },
                        op: "EQUAL",
                        value: FirestoreValue::StringValue(item_type.to_string()),
                    },
                },
                limit: 1,
            },
        }
    }
}

// Firestore request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryRequest {
    structured_query: StructuredQuery,
}

#[derive(Debug, Serialize)]
struct StructuredQuery {
    from: Vec<CollectionSelector>,
    #[serde(rename = "where")]
    filter: Filter,
    limit: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionSelector {
    collection_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Filter {
    field_filter: FieldFilter,
}

#[derive(Debug, Serialize)]
struct FieldFilter {
    field: FieldReference,
    op: &'static str,
    value: FirestoreValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReference {
    field_path: String,
}

/// One element of the `runQuery` response stream. Elements without a
/// document only carry progress information such as `readTime`.
#[derive(Debug, Deserialize)]
struct RunQueryResponse {
    #[serde(default)]
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, FirestoreValue>,
}

/// Firestore's typed value encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum FirestoreValue {
    NullValue(Option<String>),
    BooleanValue(bool),
    /// int64 travels as a decimal string
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(Value),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ArrayValue {
    #[serde(default)]
    values: Vec<FirestoreValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MapValue {
    #[serde(default)]
    fields: HashMap<String, FirestoreValue>,
}

impl FirestoreValue {
    fn into_json(self) -> Value {
        match self {
            FirestoreValue::NullValue(_) => Value::Null,
            FirestoreValue::BooleanValue(b) => Value::Bool(b),
            FirestoreValue::IntegerValue(raw) => raw
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or(Value::String(raw)),
            FirestoreValue::DoubleValue(d) => {
                Number::from_f64(d).map(Value::Number).unwrap_or(Value::Null)
            }
            FirestoreValue::TimestampValue(s)
            | FirestoreValue::StringValue(s)
            | FirestoreValue::BytesValue(s)
            | FirestoreValue::ReferenceValue(s) => Value::String(s),
            FirestoreValue::GeoPointValue(v) => v,
            FirestoreValue::ArrayValue(array) => {
                Value::Array(array.values.into_iter().map(Self::into_json).collect())
            }
            FirestoreValue::MapValue(map) => fields_to_json(map.fields),
        }
    }
}

fn fields_to_json(fields: HashMap<String, FirestoreValue>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(k, v)| (k, v.into_json()))
            .collect::<Map<_, _>>(),
    )
}

impl Document {
    /// Last path segment of `projects/.../documents/{collection}/{id}`
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Decode into a [`ClothingItem`]; the document id always wins over any stored `id` field.
    fn into_item(self) -> OutfitResult<ClothingItem> {
        let id = self.id().to_string();
        let mut value = fields_to_json(self.fields);
        if let Value::Object(ref mut map) = value {
            map.insert("id".to_string(), Value::String(id.clone()));
        }

        serde_json::from_value(value)
            .map_err(|e| OutfitError::Store(format!("Malformed item document {}: {}", id, e)))
    }
}

#[async_trait]
impl ItemRepository for FirestoreItemRepository {
    async fn find_one_by_type(
        &self,
        item_type: ClothingType,
    ) -> OutfitResult<Option<ClothingItem>> {
        let access_token = self.auth.access_token().await?;
        let request = self.type_query(item_type);

        let response = self
            .auth
            .client()
            .post(self.run_query_url())
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| OutfitError::Store(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OutfitError::Store(format!(
                "Firestore runQuery error ({})",
                describe_failure(response).await
            )));
        }

        let results: Vec<RunQueryResponse> = response
            .json()
            .await
            .map_err(|e| OutfitError::Store(format!("Invalid runQuery response: {}", e)))?;

        let document = results.into_iter().find_map(|r| r.document);
        debug!(%item_type, found = document.is_some(), "Firestore type query finished");

        document.map(Document::into_item).transpose()
    }

    async fn get_by_id(&self, id: &str) -> OutfitResult<Option<ClothingItem>> {
        let access_token = self.auth.access_token().await?;

        let response = self
            .auth
            .client()
            .get(self.document_url(id))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OutfitError::Store(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!(id, "Item document not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(OutfitError::Store(format!(
                "Firestore get error ({})",
                describe_failure(response).await
            )));
        }

        let document: Document = response
            .json()
            .await
            .map_err(|e| OutfitError::Store(format!("Invalid document response: {}", e)))?;

        document.into_item().map(Some)
    }
}
