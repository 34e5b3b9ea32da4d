//! mstr-objects - Domain entities and object hydration.
//!
//! Converts the raw JSON objects returned by the request layer into
//! strongly-typed entities, or into one of three caller-selected output
//! shapes: an entity list, a dictionary list, or a tabular frame. Also
//! hosts the cross-project aggregation that temporarily switches the
//! connection's selected project.

pub mod frame;
pub mod listing;
pub mod models;

// Re-export key types
pub use frame::Frame;
pub use listing::{Listing, ListingFormat};
pub use models::document::{Document, PublishRequest};
pub use models::dossier::{list_dossiers, list_dossiers_across_projects, Dossier};
pub use models::project::Project;
pub use models::usergroup::{CreateUserGroupRequest, UserGroup, UserGroupRef};
