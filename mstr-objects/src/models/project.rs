//! Project entity model.
//!
//! A project is an isolated namespace on the server; many operations
//! require one to be selected on the connection first.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mstr_api::Connection;
use mstr_core::error::MstrResult;

/// A project the authenticated user has access to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Project alias, when configured.
    #[serde(default)]
    pub alias: Option<String>,
    /// Load status code.
    #[serde(default)]
    pub status: Option<i64>,
}

impl Project {
    /// Build a Project from a raw server object.
    pub fn from_raw(raw: Value) -> MstrResult<Self> {
        Ok(serde_json::from_value(raw)?)
    }

    /// List every project the authenticated user can access.
    pub async fn list(connection: &Connection) -> MstrResult<Vec<Self>> {
        let response = connection.get_projects(None).await?;
        let raw: Vec<Value> = response
            .json()
            .await
            .map_err(|e| mstr_core::error::MstrError::Serialization(e.to_string()))?;
        raw.into_iter().map(Self::from_raw).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_from_raw() {
        let raw = json!({
            "id": "B7CA92F04B9FAE8D941C3E9B7E0CD754",
            "name": "Consolidated Education Project",
            "alias": "",
            "status": 0
        });
        let project = Project::from_raw(raw).unwrap();
        assert_eq!(project.name, "Consolidated Education Project");
        assert_eq!(project.status, Some(0));
    }

    #[test]
    fn test_project_minimal_fields() {
        let project = Project::from_raw(json!({"id": "A", "name": "N"})).unwrap();
        assert!(project.alias.is_none());
    }
}
