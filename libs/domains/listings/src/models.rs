use core_config::{ConfigError, FromEnv, env_required};
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Field holding a record's vector
pub const EMBEDDING_FIELD: &str = "embedding";

/// Field projected back from similarity search alongside `_id`
pub const TEXT_FIELD: &str = "text";

pub const DEFAULT_RETRIEVAL_LIMIT: u32 = 5;

/// Where similarity search runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalSettings {
    /// Collection queried by the chat flow
    pub collection: String,
    /// Name of the vector index on `embedding`
    pub index_name: String,
}

impl RetrievalSettings {
    pub fn new(collection: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            index_name: index_name.into(),
        }
    }
}

impl FromEnv for RetrievalSettings {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            collection: env_required("COLLECTION_NAME")?,
            index_name: env_required("INDEX_NAME")?,
        })
    }
}

/// A record returned by similarity search, closest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingMatch {
    #[serde(rename = "_id")]
    pub id: Bson,
    /// Stored `text` rendered as a string, whatever its BSON type
    #[serde(default, deserialize_with = "text_from_bson")]
    pub text: Option<String>,
}

fn text_from_bson<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Bson>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(render_value))
}

impl ListingMatch {
    /// Identifier as plain text (hex for ObjectIds)
    pub fn id_string(&self) -> String {
        match &self.id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Outcome of one embedding synchronization run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncReport {
    pub collection: String,
    /// Records seen
    pub total: usize,
    /// Records that received a new embedding
    pub embedded: usize,
    /// Records that already had one
    pub skipped: usize,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Status line reported to callers of `POST /embed`
    pub fn message(&self) -> &'static str {
        if self.is_empty() {
            "No documents found in the collection."
        } else {
            "Embeddings generated and saved successfully where needed."
        }
    }
}

/// Request body for `POST /embed`
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct EmbedRequest {
    /// Collection whose records should receive embeddings
    #[validate(required, length(min = 1))]
    #[schema(example = "properties")]
    pub collection_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EmbedResponse {
    #[schema(example = "Embeddings generated and saved successfully where needed.")]
    pub message: String,
}

impl From<&SyncReport> for EmbedResponse {
    fn from(report: &SyncReport) -> Self {
        Self {
            message: report.message().to_string(),
        }
    }
}

/// True when the record has no usable embedding (absent, null or empty).
pub fn lacks_embedding(record: &Document) -> bool {
    match record.get(EMBEDDING_FIELD) {
        None | Some(Bson::Null) => true,
        Some(Bson::Array(values)) => values.is_empty(),
        Some(_) => false,
    }
}

/// Text fed to the embedding model for a record.
///
/// Every field except `_id` and `embedding`, in stored order, joined with a
/// single space. Nulls are skipped; arrays and sub-documents are rendered as
/// relaxed extended JSON. A record with nothing else to say falls back to its
/// `_id`, so the model never receives empty input.
pub fn embeddable_text(record: &Document) -> String {
    let text = record
        .iter()
        .filter(|(key, _)| key.as_str() != "_id" && key.as_str() != EMBEDDING_FIELD)
        .filter_map(|(_, value)| render_value(value))
        .collect::<Vec<_>>()
        .join(" ");

    if !text.trim().is_empty() {
        return text;
    }

    record.get("_id").and_then(render_value).unwrap_or(text)
}

pub(crate) fn render_value(value: &Bson) -> Option<String> {
    match value {
        Bson::Null | Bson::Undefined => None,
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) => Some(n.to_string()),
        Bson::Boolean(b) => Some(b.to_string()),
        Bson::Array(_) | Bson::Document(_) => {
            Some(value.clone().into_relaxed_extjson().to_string())
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use validator::Validate;

    #[test]
    fn test_embeddable_text_skips_id_and_embedding() {
        let record = doc! {
            "_id": ObjectId::new(),
            "title": "Sunny 2BHK",
            "city": "Indore",
            "bedrooms": 2,
            "price_lakh": 48.5,
            "furnished": true,
            "embedding": [0.1, 0.2],
        };

        assert_eq!(embeddable_text(&record), "Sunny 2BHK Indore 2 48.5 true");
    }

    #[test]
    fn test_embeddable_text_renders_nested_values_as_json() {
        let record = doc! {
            "title": "Villa",
            "amenities": ["pool", "gym"],
            "owner": null,
            "address": { "area": "Vijay Nagar" },
        };

        assert_eq!(
            embeddable_text(&record),
            r#"Villa ["pool","gym"] {"area":"Vijay Nagar"}"#
        );
    }

    #[test]
    fn test_embeddable_text_bare_record_falls_back_to_id() {
        assert_eq!(embeddable_text(&doc! { "_id": 1 }), "1");
        assert_eq!(
            embeddable_text(&doc! { "_id": "p-9", "notes": null, "embedding": null }),
            "p-9"
        );

        let oid = ObjectId::new();
        assert_eq!(
            embeddable_text(&doc! { "_id": oid }),
            Bson::ObjectId(oid).to_string()
        );
    }

    #[test]
    fn test_embeddable_text_without_any_field_is_empty() {
        assert_eq!(embeddable_text(&doc! {}), "");
    }

    #[test]
    fn test_lacks_embedding() {
        assert!(lacks_embedding(&doc! { "title": "a" }));
        assert!(lacks_embedding(&doc! { "embedding": null }));
        assert!(lacks_embedding(&doc! { "embedding": [] }));
        assert!(!lacks_embedding(&doc! { "embedding": [0.5] }));
    }

    #[test]
    fn test_sync_report_messages() {
        let empty = SyncReport {
            collection: "properties".into(),
            total: 0,
            embedded: 0,
            skipped: 0,
        };
        assert_eq!(empty.message(), "No documents found in the collection.");

        let done = SyncReport {
            total: 3,
            embedded: 1,
            skipped: 2,
            ..empty
        };
        assert_eq!(
            done.message(),
            "Embeddings generated and saved successfully where needed."
        );
    }

    #[test]
    fn test_listing_match_renders_non_string_text() {
        let listing: ListingMatch =
            mongodb::bson::from_document(doc! { "_id": "p-1", "text": 42 }).unwrap();
        assert_eq!(listing.text.as_deref(), Some("42"));

        let listing: ListingMatch = mongodb::bson::from_document(
            doc! { "_id": "p-2", "text": { "bhk": 3, "city": "Indore" } },
        )
        .unwrap();
        assert_eq!(listing.text.as_deref(), Some(r#"{"bhk":3,"city":"Indore"}"#));

        let listing: ListingMatch =
            mongodb::bson::from_document(doc! { "_id": "p-3", "text": null }).unwrap();
        assert!(listing.text.is_none());
    }

    #[test]
    fn test_listing_match_id_string() {
        let oid = ObjectId::new();
        let listing = ListingMatch {
            id: Bson::ObjectId(oid),
            text: None,
        };
        assert_eq!(listing.id_string(), oid.to_hex());

        let listing = ListingMatch {
            id: Bson::String("p-1".into()),
            text: Some("x".into()),
        };
        assert_eq!(listing.id_string(), "p-1");
    }

    #[test]
    fn test_embed_request_validation() {
        assert!(EmbedRequest { collection_name: None }.validate().is_err());
        assert!(
            EmbedRequest {
                collection_name: Some(String::new())
            }
            .validate()
            .is_err()
        );
        assert!(
            EmbedRequest {
                collection_name: Some("properties".into())
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn test_retrieval_settings_from_env() {
        temp_env::with_vars(
            [("COLLECTION_NAME", Some("properties")), ("INDEX_NAME", Some("vector_index"))],
            || {
                let settings = RetrievalSettings::from_env().unwrap();
                assert_eq!(settings, RetrievalSettings::new("properties", "vector_index"));
            },
        );

        temp_env::with_var_unset("INDEX_NAME", || {
            assert!(RetrievalSettings::from_env().is_err());
        });
    }
}
