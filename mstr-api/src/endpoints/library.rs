//! Library endpoints: the authenticated user's collection of published
//! documents.

use reqwest::Response;
use serde_json::Value;

use mstr_core::error::MstrResult;

use crate::connection::{Connection, ProjectScope};
use crate::response::handle_response;

impl Connection {
    /// Get information for a document by id.
    pub async fn get_document(&self, id: &str, error_msg: Option<&str>) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or("Error getting document");
        let response = self
            .http_get(&format!("/api/library/{id}"), ProjectScope::Selected, &[])
            .await?;
        handle_response(response, msg).await
    }

    /// Unpublish a previously published document. The document is no longer
    /// available in the library of any user it was originally published to.
    pub async fn unpublish_document(
        &self,
        id: &str,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or("Error unpublishing document");
        let response = self
            .http_delete(&format!("/api/library/{id}"), ProjectScope::Selected)
            .await?;
        handle_response(response, msg).await
    }

    /// Unpublish a document from the library of a single user.
    ///
    /// Requires a selected project; fails with a configuration error before
    /// any request is sent otherwise.
    pub async fn unpublish_document_for_user(
        &self,
        document_id: &str,
        user_id: &str,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        self.validate_project_selected().await?;
        let msg = error_msg.unwrap_or("Error unpublishing document");
        let response = self
            .http_delete(
                &format!("/api/library/{document_id}/recipients/{user_id}"),
                ProjectScope::Selected,
            )
            .await?;
        handle_response(response, msg).await
    }

    /// Get the library for the authenticated user.
    pub async fn get_library(&self, error_msg: Option<&str>) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or("Error getting library");
        let response = self
            .http_get("/api/library", ProjectScope::Agnostic, &[])
            .await?;
        handle_response(response, msg).await
    }

    /// Publish a document to users or user groups in a specific project.
    ///
    /// Requires a selected project; fails with a configuration error before
    /// any request is sent otherwise.
    pub async fn publish_document(
        &self,
        body: &Value,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        self.validate_project_selected().await?;
        let default_msg = match body.get("id").and_then(|v| v.as_str()) {
            Some(id) => format!("Error publishing document {id}"),
            None => "Error publishing document".to_string(),
        };
        let msg = error_msg.unwrap_or(&default_msg);
        let response = self
            .http_post("/api/library", ProjectScope::Selected, body)
            .await?;
        handle_response(response, msg).await
    }
}
