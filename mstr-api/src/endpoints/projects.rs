//! Project endpoints.
//!
//! Used by cross-project aggregation to enumerate every project the
//! authenticated user can access.

use reqwest::Response;

use mstr_core::error::MstrResult;

use crate::connection::{Connection, ProjectScope};
use crate::response::handle_response;

impl Connection {
    /// Get all projects the authenticated user has access to.
    pub async fn get_projects(&self, error_msg: Option<&str>) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or("Error getting the list of accessible projects.");
        let response = self
            .http_get("/api/projects", ProjectScope::Agnostic, &[])
            .await?;
        handle_response(response, msg).await
    }
}
