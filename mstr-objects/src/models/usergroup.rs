//! User group entity model, CRUD, and sub-resource access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mstr_api::{fetch_objects, Connection, UserGroupPages};
use mstr_core::constants;
use mstr_core::error::{MstrError, MstrResult};

use crate::listing::{Listing, ListingFormat};

/// Lightweight reference to a user or user group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGroupRef {
    /// Referenced object id.
    pub id: String,
    /// Referenced object name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A user group as returned by the usergroup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    /// Object id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parent user groups.
    #[serde(default)]
    pub memberships: Vec<UserGroupRef>,
    /// Child users and user groups.
    #[serde(default)]
    pub members: Vec<UserGroupRef>,
    /// Creation timestamp.
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
    /// Access control granted to the caller.
    #[serde(default)]
    pub acg: Option<i64>,
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserGroupRequest {
    /// Group name.
    pub name: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ids of parent user groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub memberships: Vec<String>,
    /// Ids of child users or user groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl UserGroup {
    /// Build a UserGroup from a raw server object.
    pub fn from_raw(raw: Value) -> MstrResult<Self> {
        Ok(serde_json::from_value(raw)?)
    }

    /// List user groups, optionally restricted to a name prefix.
    ///
    /// Runs through the paginated bulk-fetch path. Output shape selection
    /// mirrors [`list_dossiers`](crate::models::dossier::list_dossiers):
    /// at most one of `to_dictionary` / `to_dataframe` may be set.
    pub async fn list(
        connection: &Connection,
        name_begins: Option<&str>,
        to_dictionary: bool,
        to_dataframe: bool,
        limit: Option<usize>,
    ) -> MstrResult<Listing<Self>> {
        let format = ListingFormat::from_flags(to_dictionary, to_dataframe)?;
        let pages = UserGroupPages {
            name_begins: name_begins.map(str::to_string),
            fields: Vec::new(),
        };
        let raw = fetch_objects(connection, &pages, limit, constants::DEFAULT_CHUNK_SIZE).await?;
        Listing::from_raw(raw, format, Self::from_raw)
    }

    /// Get information for a specific user group.
    pub async fn get(connection: &Connection, id: &str) -> MstrResult<Self> {
        let response = connection.get_usergroup(id, None).await?;
        Self::from_response(response).await
    }

    /// Create a new user group and return it.
    pub async fn create(
        connection: &Connection,
        request: &CreateUserGroupRequest,
    ) -> MstrResult<Self> {
        let body = serde_json::to_value(request)?;
        let response = connection.create_usergroup(&body, None).await?;
        Self::from_response(response).await
    }

    /// Update specific fields of a user group and return the result.
    pub async fn update(connection: &Connection, id: &str, body: &Value) -> MstrResult<Self> {
        let response = connection.update_usergroup(id, body, None).await?;
        Self::from_response(response).await
    }

    /// Replace all of the information for a user group and return the result.
    pub async fn replace(connection: &Connection, id: &str, body: &Value) -> MstrResult<Self> {
        let response = connection.replace_usergroup(id, body, None).await?;
        Self::from_response(response).await
    }

    /// Delete a user group.
    pub async fn delete(connection: &Connection, id: &str) -> MstrResult<()> {
        connection.delete_usergroup(id, None).await?;
        Ok(())
    }

    /// Get the user groups at the top level of the hierarchy.
    pub async fn top_level(connection: &Connection) -> MstrResult<Vec<Self>> {
        let response = connection.get_top_level_usergroups(None).await?;
        let raw: Vec<Value> = response
            .json()
            .await
            .map_err(|e| MstrError::Serialization(e.to_string()))?;
        raw.into_iter().map(Self::from_raw).collect()
    }

    /// Get this group's privileges, including their source.
    pub async fn privileges(
        connection: &Connection,
        id: &str,
        privilege_level: Option<&str>,
        project_id: Option<&str>,
    ) -> MstrResult<Value> {
        let response = connection
            .get_usergroup_privileges(id, privilege_level, project_id, None)
            .await?;
        json_body(response).await
    }

    /// Get the direct parents of this group.
    pub async fn memberships(connection: &Connection, id: &str) -> MstrResult<Vec<UserGroupRef>> {
        let response = connection.get_usergroup_memberships(id, None).await?;
        let raw: Vec<Value> = response
            .json()
            .await
            .map_err(|e| MstrError::Serialization(e.to_string()))?;
        raw.into_iter()
            .map(|v| Ok(serde_json::from_value(v)?))
            .collect()
    }

    /// Get member information for this group.
    pub async fn members(
        connection: &Connection,
        id: &str,
        include_access: bool,
    ) -> MstrResult<Value> {
        let response = connection
            .get_usergroup_members(id, include_access, 0, constants::UNLIMITED, None)
            .await?;
        json_body(response).await
    }

    /// Get the governing settings of this group.
    pub async fn settings(connection: &Connection, id: &str) -> MstrResult<Value> {
        let response = connection.get_usergroup_settings(id, None).await?;
        json_body(response).await
    }

    /// Get security roles for this group, optionally scoped to a project.
    pub async fn security_roles(
        connection: &Connection,
        id: &str,
        project_id: Option<&str>,
    ) -> MstrResult<Value> {
        let response = connection
            .get_usergroup_security_roles(id, project_id, None)
            .await?;
        json_body(response).await
    }

    /// Parse a single user group out of a validated response.
    async fn from_response(response: reqwest::Response) -> MstrResult<Self> {
        let raw: Value = response
            .json()
            .await
            .map_err(|e| MstrError::Serialization(e.to_string()))?;
        Self::from_raw(raw)
    }
}

/// Read a validated response body as a JSON value.
async fn json_body(response: reqwest::Response) -> MstrResult<Value> {
    response
        .json()
        .await
        .map_err(|e| MstrError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usergroup_from_raw() {
        let raw = json!({
            "id": "E96685CD4E60068559F7DFAC7C2AA851",
            "name": "Developers",
            "description": "All developers",
            "memberships": [{"id": "P1", "name": "Everyone"}],
            "members": [{"id": "U1", "name": "jsmith"}, {"id": "U2"}]
        });
        let group = UserGroup::from_raw(raw).unwrap();
        assert_eq!(group.name, "Developers");
        assert_eq!(group.members.len(), 2);
        assert!(group.members[1].name.is_none());
    }

    #[test]
    fn test_usergroup_minimal_fields() {
        let group = UserGroup::from_raw(json!({"id": "A", "name": "G"})).unwrap();
        assert!(group.memberships.is_empty());
        assert!(group.members.is_empty());
    }

    #[test]
    fn test_create_request_skips_empty_collections() {
        let request = CreateUserGroupRequest {
            name: "Analysts".into(),
            description: None,
            memberships: Vec::new(),
            members: vec!["U1".into()],
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["name"], "Analysts");
        assert!(body.get("description").is_none());
        assert!(body.get("memberships").is_none());
        assert_eq!(body["members"][0], "U1");
    }
}
