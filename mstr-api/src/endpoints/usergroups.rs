//! User group endpoints: CRUD, sub-resources, and paginated listing.
//!
//! All user group administration is project-agnostic on the wire; the
//! project header is sent with the literal value `"null"`.

use async_trait::async_trait;
use reqwest::Response;
use serde_json::Value;
use tokio::task::JoinHandle;

use mstr_core::error::MstrResult;

use crate::connection::{Connection, ProjectScope};
use crate::fetch::PagedEndpoint;
use crate::response::handle_response;

impl Connection {
    /// Get information for a specific user group.
    pub async fn get_usergroup(&self, id: &str, error_msg: Option<&str>) -> MstrResult<Response> {
        let msg = error_msg
            .unwrap_or("Error getting user group information. Check usergroup id and try again.");
        let response = self
            .http_get(&format!("/api/usergroups/{id}"), ProjectScope::Agnostic, &[])
            .await?;
        handle_response(response, msg).await
    }

    /// Update specific fields of a user group.
    pub async fn update_usergroup(
        &self,
        id: &str,
        body: &Value,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg =
            error_msg.unwrap_or("Error updating user group info. Check usergroup id and try again.");
        let response = self
            .http_patch(&format!("/api/usergroups/{id}"), ProjectScope::Agnostic, body)
            .await?;
        handle_response(response, msg).await
    }

    /// Replace all of the information for a user group.
    pub async fn replace_usergroup(
        &self,
        id: &str,
        body: &Value,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg
            .unwrap_or("Error overwriting user group info. Check usergroup id and try again.");
        let response = self
            .http_put(&format!("/api/usergroups/{id}"), ProjectScope::Agnostic, body)
            .await?;
        handle_response(response, msg).await
    }

    /// Delete a user group.
    pub async fn delete_usergroup(
        &self,
        id: &str,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or("Error deleting user group. Check usergroup id and try again.");
        let response = self
            .http_delete(&format!("/api/usergroups/{id}"), ProjectScope::Agnostic)
            .await?;
        handle_response(response, msg).await
    }

    /// Get a user group's privileges, including their source.
    ///
    /// * `privilege_level` - optional level restriction ("server" or "project")
    /// * `project_id` - optional project to resolve project-level privileges in
    pub async fn get_usergroup_privileges(
        &self,
        id: &str,
        privilege_level: Option<&str>,
        project_id: Option<&str>,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or(
            "Error getting user group privileges. Check usergroup id, privilege level or project id and try again.",
        );
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(level) = privilege_level {
            query.push(("privilege.level", level.to_string()));
        }
        if let Some(project) = project_id {
            query.push(("projectId", project.to_string()));
        }
        let response = self
            .http_get(
                &format!("/api/usergroups/{id}/privileges"),
                ProjectScope::Agnostic,
                &query,
            )
            .await?;
        handle_response(response, msg).await
    }

    /// Get the user groups that are direct parents of a specific user group.
    pub async fn get_usergroup_memberships(
        &self,
        id: &str,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg
            .unwrap_or("Error getting user group memberships. Check usergroup id and try again.");
        let response = self
            .http_get(
                &format!("/api/usergroups/{id}/memberships"),
                ProjectScope::Agnostic,
                &[],
            )
            .await?;
        handle_response(response, msg).await
    }

    /// Get member information for a specific user group.
    pub async fn get_usergroup_members(
        &self,
        id: &str,
        include_access: bool,
        offset: i64,
        limit: i64,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg
            .unwrap_or("Error getting user group members. Check usergroup id and try again.");
        let query = [
            ("includeAccess", include_access.to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        let response = self
            .http_get(
                &format!("/api/usergroups/{id}/members"),
                ProjectScope::Agnostic,
                &query,
            )
            .await?;
        handle_response(response, msg).await
    }

    /// Get the governing settings of a user group.
    pub async fn get_usergroup_settings(
        &self,
        id: &str,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg
            .unwrap_or("Error getting user group settings. Check usergroup id and try again.");
        let response = self
            .http_get(
                &format!("/api/usergroups/{id}/settings"),
                ProjectScope::Agnostic,
                &[],
            )
            .await?;
        handle_response(response, msg).await
    }

    /// Get security roles for a user group, optionally scoped to a project.
    pub async fn get_usergroup_security_roles(
        &self,
        id: &str,
        project_id: Option<&str>,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg
            .unwrap_or("Error getting user group security roles. Check usergroup id and try again.");
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(project) = project_id {
            query.push(("projectId", project.to_string()));
        }
        let response = self
            .http_get(
                &format!("/api/usergroups/{id}/securityRoles"),
                ProjectScope::Agnostic,
                &query,
            )
            .await?;
        handle_response(response, msg).await
    }

    /// Get all user groups that exist at the top level of the hierarchy.
    pub async fn get_top_level_usergroups(
        &self,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg
            .unwrap_or("Error getting top level user groups. Check your privileges and try again.");
        let response = self
            .http_get("/api/usergroups/topLevel", ProjectScope::Agnostic, &[])
            .await?;
        handle_response(response, msg).await
    }

    /// Get information for a set of user groups, filtered by name prefix.
    ///
    /// * `offset`/`limit` control paging; `limit = -1` means no limit
    ///   (subject to server governing settings). The total count of results
    ///   is reported in the `x-mstr-total-count` response header.
    /// * `fields` - optional top-level field whitelist.
    pub async fn list_usergroups(
        &self,
        name_begins: Option<&str>,
        offset: i64,
        limit: i64,
        fields: &[&str],
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or("Error getting information for a set of user groups.");
        let query = usergroup_list_query(name_begins, offset, limit, fields);
        let borrowed: Vec<(&str, String)> =
            query.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        let response = self
            .http_get("/api/usergroups/", ProjectScope::Agnostic, &borrowed)
            .await?;
        handle_response(response, msg).await
    }

    /// Async variant of [`list_usergroups`](Connection::list_usergroups):
    /// dispatches the page request on a background task and returns the
    /// pending handle without response handling.
    pub fn spawn_list_usergroups(
        &self,
        name_begins: Option<&str>,
        offset: i64,
        limit: i64,
        fields: &[&str],
    ) -> JoinHandle<MstrResult<Response>> {
        let query = usergroup_list_query(name_begins, offset, limit, fields);
        self.spawn_get("/api/usergroups/".into(), ProjectScope::Agnostic, query)
    }

    /// Create a new user group.
    ///
    /// The body carries the name and description of the group, the ids of
    /// parent user groups, and the ids of child users or user groups:
    /// `{"name": ..., "description": ..., "memberships": [...], "members": [...]}`.
    pub async fn create_usergroup(
        &self,
        body: &Value,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or("Error creating new usergroup.");
        let response = self
            .http_post("/api/usergroups/", ProjectScope::Selected, body)
            .await?;
        handle_response(response, msg).await
    }
}

/// The user group list endpoint pair, packaged for the bulk-fetch
/// orchestrator. Pages arrive as bare arrays.
#[derive(Debug, Clone, Default)]
pub struct UserGroupPages {
    /// Name prefix to filter by.
    pub name_begins: Option<String>,
    /// Optional top-level field whitelist.
    pub fields: Vec<String>,
}

#[async_trait]
impl PagedEndpoint for UserGroupPages {
    async fn fetch_page(
        &self,
        connection: &Connection,
        offset: i64,
        limit: i64,
    ) -> MstrResult<Response> {
        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        connection
            .list_usergroups(self.name_begins.as_deref(), offset, limit, &fields, None)
            .await
    }

    fn spawn_page(
        &self,
        connection: &Connection,
        offset: i64,
        limit: i64,
    ) -> JoinHandle<MstrResult<Response>> {
        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        connection.spawn_list_usergroups(self.name_begins.as_deref(), offset, limit, &fields)
    }

    fn error_msg(&self) -> &str {
        "Error getting information for a set of user groups."
    }
}

/// Build the query parameters for the user group list endpoint.
fn usergroup_list_query(
    name_begins: Option<&str>,
    offset: i64,
    limit: i64,
    fields: &[&str],
) -> Vec<(String, String)> {
    let mut query = vec![
        ("offset".to_string(), offset.to_string()),
        ("limit".to_string(), limit.to_string()),
    ];
    if let Some(prefix) = name_begins {
        query.push(("nameBegins".to_string(), prefix.to_string()));
    }
    if !fields.is_empty() {
        query.push(("fields".to_string(), fields.join(",")));
    }
    query
}
