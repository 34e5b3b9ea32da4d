//! mstr-api - HTTP client for the server REST API.
//!
//! This crate provides the request layer of the SDK: a shared [`Connection`]
//! wrapping a reqwest client, typed endpoint methods per resource category,
//! a response-to-error translator, typed filter sets with per-endpoint
//! allow-lists, and a paginated bulk-fetch orchestrator.

pub mod connection;
pub mod endpoints;
pub mod fetch;
pub mod filters;
pub mod response;

// Re-export key types
pub use connection::{Connection, ProjectScope};
pub use endpoints::dossiers::{DossierPages, DOSSIER_FILTER_FIELDS};
pub use endpoints::usergroups::UserGroupPages;
pub use fetch::{fetch_objects, PagedEndpoint};
pub use filters::{FilterValue, Filters};
pub use response::{handle_response, total_count, ErrorBody};
