//! Dossier list/search endpoints.
//!
//! Pages arrive wrapped in a `{"result": [...], "totalItems": N}` envelope;
//! the total is also reported in the `x-mstr-total-count` response header.

use async_trait::async_trait;
use reqwest::Response;
use tokio::task::JoinHandle;

use mstr_core::error::MstrResult;

use crate::connection::{Connection, ProjectScope};
use crate::fetch::PagedEndpoint;
use crate::filters::Filters;
use crate::response::handle_response;

/// Filter fields the dossier list endpoint supports.
pub const DOSSIER_FILTER_FIELDS: &[&str] = &[
    "name",
    "id",
    "type",
    "subtype",
    "date_created",
    "date_modified",
    "version",
    "acg",
    "owner",
    "ext_type",
    "view_media",
    "certified_info",
    "project_id",
];

/// Key of the array field in dossier page envelopes.
pub const DOSSIER_UNPACK_KEY: &str = "result";

impl Connection {
    /// Get one page of dossiers stored on the server.
    ///
    /// * `search` - exact name to search for
    /// * `offset`/`limit` control paging; `limit = -1` means no limit
    ///   (subject to server governing settings)
    /// * `fields` - optional top-level field whitelist
    /// * `filters` - checked against [`DOSSIER_FILTER_FIELDS`] before the
    ///   request is built
    pub async fn get_dossiers(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
        fields: &[&str],
        filters: &Filters,
        error_msg: Option<&str>,
    ) -> MstrResult<Response> {
        let msg = error_msg.unwrap_or("Error retrieving dossiers from the environment.");
        filters.validate(DOSSIER_FILTER_FIELDS)?;
        let query = dossier_list_query(search, offset, limit, fields, filters);
        let borrowed: Vec<(&str, String)> =
            query.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        let response = self
            .http_get("/api/dossiers", ProjectScope::Selected, &borrowed)
            .await?;
        handle_response(response, msg).await
    }

    /// Async variant of [`get_dossiers`](Connection::get_dossiers):
    /// dispatches the page request on a background task and returns the
    /// pending handle without response handling.
    pub fn spawn_get_dossiers(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
        fields: &[&str],
        filters: &Filters,
    ) -> JoinHandle<MstrResult<Response>> {
        let filters = filters.clone();
        let connection = self.clone();
        let search = search.map(str::to_string);
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        tokio::spawn(async move {
            filters.validate(DOSSIER_FILTER_FIELDS)?;
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            let query = dossier_list_query(search.as_deref(), offset, limit, &fields, &filters);
            let borrowed: Vec<(&str, String)> =
                query.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
            connection
                .http_get("/api/dossiers", ProjectScope::Selected, &borrowed)
                .await
        })
    }
}

/// The dossier list endpoint pair, packaged for the bulk-fetch orchestrator.
///
/// Captures the non-pagination query state; the orchestrator drives
/// `offset`/`limit` across pages.
#[derive(Debug, Clone, Default)]
pub struct DossierPages {
    /// Exact name to search for.
    pub search: Option<String>,
    /// Optional top-level field whitelist.
    pub fields: Vec<String>,
    /// Filter set, checked against [`DOSSIER_FILTER_FIELDS`].
    pub filters: Filters,
}

#[async_trait]
impl PagedEndpoint for DossierPages {
    async fn fetch_page(
        &self,
        connection: &Connection,
        offset: i64,
        limit: i64,
    ) -> MstrResult<Response> {
        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        connection
            .get_dossiers(
                self.search.as_deref(),
                offset,
                limit,
                &fields,
                &self.filters,
                None,
            )
            .await
    }

    fn spawn_page(
        &self,
        connection: &Connection,
        offset: i64,
        limit: i64,
    ) -> JoinHandle<MstrResult<Response>> {
        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        connection.spawn_get_dossiers(self.search.as_deref(), offset, limit, &fields, &self.filters)
    }

    fn unpack_key(&self) -> Option<&str> {
        Some(DOSSIER_UNPACK_KEY)
    }

    fn error_msg(&self) -> &str {
        "Error retrieving dossiers from the environment."
    }
}

/// Build the query parameters for the dossier list endpoint.
fn dossier_list_query(
    search: Option<&str>,
    offset: i64,
    limit: i64,
    fields: &[&str],
    filters: &Filters,
) -> Vec<(String, String)> {
    let mut query = vec![
        ("offset".to_string(), offset.to_string()),
        ("limit".to_string(), limit.to_string()),
    ];
    if let Some(name) = search {
        query.push(("name".to_string(), name.to_string()));
    }
    if !fields.is_empty() {
        query.push(("fields".to_string(), fields.join(",")));
    }
    query.extend(filters.to_query());
    query
}
