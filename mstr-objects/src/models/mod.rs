//! Domain entity models.

pub mod document;
pub mod dossier;
pub mod project;
pub mod usergroup;

/// Shared owner reference embedded in listable objects.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Owner {
    /// Owner object id.
    pub id: Option<String>,
    /// Owner display name.
    pub name: Option<String>,
}
