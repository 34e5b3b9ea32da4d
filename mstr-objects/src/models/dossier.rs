//! Dossier entity model and listing operations.
//!
//! Dossiers are listed through the paginated bulk-fetch path, either within
//! the currently selected project or across every accessible project.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use mstr_api::{fetch_objects, Connection, DossierPages, Filters, DOSSIER_FILTER_FIELDS};
use mstr_core::constants;
use mstr_core::error::{MstrError, MstrResult};

use super::Owner;
use crate::listing::{Listing, ListingFormat};

/// Certification state embedded in dossier objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertifiedInfo {
    /// Whether the dossier is certified.
    #[serde(default)]
    pub certified: bool,
}

/// A dossier as returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dossier {
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
    /// Access control granted to the caller.
    #[serde(default)]
    pub acg: Option<i64>,
    /// Owner reference.
    #[serde(default)]
    pub owner: Option<Owner>,
    /// Extended type code.
    #[serde(default)]
    pub ext_type: Option<i64>,
    /// View media code.
    #[serde(default)]
    pub view_media: Option<i64>,
    /// Certification state.
    #[serde(default)]
    pub certified_info: Option<CertifiedInfo>,
    /// Project the dossier lives in.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl Dossier {
    /// Build a Dossier from a raw server object.
    pub fn from_raw(raw: Value) -> MstrResult<Self> {
        Ok(serde_json::from_value(raw)?)
    }
}

/// Get all dossiers stored in the currently selected project.
///
/// * `name` - exact name of the dossier to search for
/// * `to_dictionary` / `to_dataframe` - output shape selection; at most one
///   may be set
/// * `limit` - cap the number of returned objects; `None` means unbounded
/// * `filters` - checked against the dossier filter allow-list
///
/// Requires a selected project; fails with a configuration error before any
/// request is sent otherwise.
pub async fn list_dossiers(
    connection: &Connection,
    name: Option<&str>,
    to_dictionary: bool,
    to_dataframe: bool,
    limit: Option<usize>,
    filters: Filters,
) -> MstrResult<Listing<Dossier>> {
    let format = ListingFormat::from_flags(to_dictionary, to_dataframe)?;
    filters.validate(DOSSIER_FILTER_FIELDS)?;
    if connection.project_id().await.is_none() {
        return Err(MstrError::ProjectNotSelected(
            "select a project to list the dossiers within it; \
             use list_dossiers_across_projects to cover the whole environment"
                .into(),
        ));
    }

    let pages = DossierPages {
        search: name.map(str::to_string),
        fields: Vec::new(),
        filters,
    };
    let raw = fetch_objects(connection, &pages, limit, constants::DEFAULT_CHUNK_SIZE).await?;
    Listing::from_raw(raw, format, Dossier::from_raw)
}

/// Get all dossiers stored on the server, across every accessible project.
///
/// Iterates the projects sequentially, temporarily switching the
/// connection's selected project, and de-duplicates the aggregate by object
/// id. The originally selected project is restored afterwards, on both the
/// success and the failure path. `limit` applies per project.
///
/// Must not be invoked concurrently with other project selection on the
/// same connection.
pub async fn list_dossiers_across_projects(
    connection: &Connection,
    name: Option<&str>,
    to_dictionary: bool,
    to_dataframe: bool,
    limit: Option<usize>,
    filters: Filters,
) -> MstrResult<Listing<Dossier>> {
    let format = ListingFormat::from_flags(to_dictionary, to_dataframe)?;
    filters.validate(DOSSIER_FILTER_FIELDS)?;

    let previous = connection.project_id().await;
    let result = gather_across_projects(connection, name, limit, &filters).await;
    // Restore the caller's selection whether the sweep succeeded or not.
    connection.select_project(previous).await;

    Listing::from_raw(result?, format, Dossier::from_raw)
}

/// Sweep every accessible project and collect de-duplicated raw dossiers.
async fn gather_across_projects(
    connection: &Connection,
    name: Option<&str>,
    limit: Option<usize>,
    filters: &Filters,
) -> MstrResult<Vec<Value>> {
    let projects = super::project::Project::list(connection).await?;
    debug!("listing dossiers across {} projects", projects.len());

    let mut seen: HashSet<String> = HashSet::new();
    let mut output = Vec::new();
    for project in projects {
        connection.select_project(Some(project.id.clone())).await;
        let pages = DossierPages {
            search: name.map(str::to_string),
            fields: Vec::new(),
            filters: filters.clone(),
        };
        let raw = fetch_objects(connection, &pages, limit, constants::DEFAULT_CHUNK_SIZE).await?;
        for object in raw {
            match object.get("id").and_then(|v| v.as_str()) {
                // The same object can surface under several projects; keep
                // the first occurrence.
                Some(id) => {
                    if seen.insert(id.to_string()) {
                        output.push(object);
                    }
                }
                None => output.push(object),
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dossier_from_raw() {
        let raw = json!({
            "id": "F56E2D8C11EA5A2B00000080EF155102",
            "name": "Executive Overview",
            "type": 55,
            "viewMedia": 134217728,
            "certifiedInfo": {"certified": true},
            "dateModified": "2024-02-20T16:45:12Z"
        });
        let dossier = Dossier::from_raw(raw).unwrap();
        assert_eq!(dossier.name, "Executive Overview");
        assert_eq!(dossier.view_media, Some(134_217_728));
        assert!(dossier.certified_info.unwrap().certified);
    }

    #[test]
    fn test_dossier_minimal_fields() {
        let dossier = Dossier::from_raw(json!({"id": "A", "name": "D"})).unwrap();
        assert!(dossier.owner.is_none());
        assert!(dossier.certified_info.is_none());
    }

    #[test]
    fn test_dossier_missing_id_rejected() {
        assert!(Dossier::from_raw(json!({"name": "D"})).is_err());
    }
}
