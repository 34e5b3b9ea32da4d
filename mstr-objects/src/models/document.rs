//! Document entity model and library operations.
//!
//! Documents are report-like objects; publishing places a document in the
//! library of the selected recipients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mstr_api::Connection;
use mstr_core::error::{MstrError, MstrResult};

use super::Owner;

/// A document as returned by the library endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Object id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Object type code.
    #[serde(rename = "type", default)]
    pub object_type: Option<i64>,
    /// Object subtype code.
    #[serde(default)]
    pub subtype: Option<i64>,
    /// Creation timestamp.
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
    /// Version id.
    #[serde(default)]
    pub version: Option<String>,
    /// Owner reference.
    #[serde(default)]
    pub owner: Option<Owner>,
    /// Project the document lives in.
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Body of a publish request: the document and who receives it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// Id of the document to publish.
    pub id: String,
    /// User and user group ids to publish to.
    pub recipients: Vec<String>,
}

impl Document {
    /// Build a Document from a raw server object.
    pub fn from_raw(raw: Value) -> MstrResult<Self> {
        Ok(serde_json::from_value(raw)?)
    }

    /// Get information for a document by id.
    pub async fn get(connection: &Connection, id: &str) -> MstrResult<Self> {
        let response = connection.get_document(id, None).await?;
        let raw: Value = response
            .json()
            .await
            .map_err(|e| MstrError::Serialization(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Get the library of the authenticated user.
    pub async fn list_library(connection: &Connection) -> MstrResult<Vec<Self>> {
        let response = connection.get_library(None).await?;
        let raw: Vec<Value> = response
            .json()
            .await
            .map_err(|e| MstrError::Serialization(e.to_string()))?;
        raw.into_iter().map(Self::from_raw).collect()
    }

    /// Publish a document to users or user groups in the selected project.
    ///
    /// Requires a selected project on the connection.
    pub async fn publish(connection: &Connection, request: &PublishRequest) -> MstrResult<()> {
        let body = serde_json::to_value(request)?;
        connection.publish_document(&body, None).await?;
        Ok(())
    }

    /// Remove a published document from every recipient's library.
    pub async fn unpublish(connection: &Connection, id: &str) -> MstrResult<()> {
        connection.unpublish_document(id, None).await?;
        Ok(())
    }

    /// Remove a published document from a single user's library.
    ///
    /// Requires a selected project on the connection.
    pub async fn unpublish_for_user(
        connection: &Connection,
        document_id: &str,
        user_id: &str,
    ) -> MstrResult<()> {
        connection
            .unpublish_document_for_user(document_id, user_id, None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_from_raw() {
        let raw = json!({
            "id": "8A2E9F4C11EA0D3900000080EFC5D59B",
            "name": "Quarterly Revenue",
            "type": 55,
            "subtype": 14081,
            "dateCreated": "2024-01-10T08:30:00Z",
            "owner": {"id": "54F3D26011D2896560009A8E67019608", "name": "Administrator"}
        });
        let document = Document::from_raw(raw).unwrap();
        assert_eq!(document.name, "Quarterly Revenue");
        assert_eq!(document.object_type, Some(55));
        assert_eq!(document.owner.unwrap().name.as_deref(), Some("Administrator"));
    }

    #[test]
    fn test_document_minimal_fields() {
        let document = Document::from_raw(json!({"id": "A", "name": "Doc"})).unwrap();
        assert!(document.date_created.is_none());
        assert!(document.project_id.is_none());
    }

    #[test]
    fn test_publish_request_serialization() {
        let request = PublishRequest {
            id: "DOC1".into(),
            recipients: vec!["U1".into(), "G1".into()],
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["id"], "DOC1");
        assert_eq!(body["recipients"][1], "G1");
    }
}
