//! Shared connection to the server REST API.
//!
//! Wraps reqwest::Client with base URL handling, auth and project header
//! injection, and the project-selection state that project-scoped
//! operations depend on.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use mstr_core::config::ServerConfig;
use mstr_core::constants;
use mstr_core::error::{MstrError, MstrResult};

/// Whether a request runs against the currently selected project or is
/// project-agnostic.
///
/// Project-agnostic requests send the project header with the literal value
/// `"null"`; project-scoped requests send the selected project id when one
/// is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    /// Use the connection's currently selected project.
    Selected,
    /// The operation is independent of any project.
    Agnostic,
}

/// Shared connection to the server REST API.
///
/// Owned by the caller and passed by reference into every operation. Clones
/// share the underlying HTTP session and the selected project, so a project
/// switch is visible to all clones. The selected project is not safe for
/// concurrent mutation from multiple tasks.
#[derive(Clone, Debug)]
pub struct Connection {
    inner: Client,
    /// Server base URL without a trailing slash (e.g. "https://bi.example.com").
    base_url: String,
    /// Authorization token sent on every request.
    auth_token: String,
    /// Default request timeout.
    timeout: Duration,
    /// Currently selected project, if any.
    project_id: Arc<RwLock<Option<String>>>,
}

impl Connection {
    /// Create a new Connection from server configuration.
    pub fn new(config: &ServerConfig) -> MstrResult<Self> {
        let base_url = ServerConfig::sanitize_base_url(&config.base_url);
        if base_url.is_empty() {
            return Err(MstrError::Config("server base URL is not set".into()));
        }

        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.api_timeout_ms))
            .connect_timeout(Duration::from_secs(15))
            .cookie_store(true);

        if config.accept_self_signed_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| MstrError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            base_url,
            auth_token: config.auth_token.clone(),
            timeout: Duration::from_millis(config.api_timeout_ms),
            project_id: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the currently selected project id, if any.
    pub async fn project_id(&self) -> Option<String> {
        self.project_id.read().await.clone()
    }

    /// Select a project for subsequent project-scoped operations, or clear
    /// the selection with `None`.
    pub async fn select_project(&self, project_id: Option<String>) {
        let mut guard = self.project_id.write().await;
        *guard = project_id;
        match guard.as_deref() {
            Some(id) => debug!("project selected: {id}"),
            None => debug!("project selection cleared"),
        }
    }

    /// Fail fast when no project is selected.
    ///
    /// Returns the selected project id. Called by project-scoped operations
    /// before any request is built, so the violation surfaces as a
    /// configuration error rather than a network error.
    pub async fn validate_project_selected(&self) -> MstrResult<String> {
        self.project_id.read().await.clone().ok_or_else(|| {
            MstrError::ProjectNotSelected(
                "select a project on the connection before calling this operation".into(),
            )
        })
    }

    /// Build the full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolve the project header value for the given scope.
    async fn project_header(&self, scope: ProjectScope) -> Option<String> {
        match scope {
            ProjectScope::Agnostic => Some(constants::PROJECT_AGNOSTIC.to_string()),
            ProjectScope::Selected => self.project_id.read().await.clone(),
        }
    }

    /// Build a request with auth and project headers applied.
    async fn prepare(&self, method: Method, path: &str, scope: ProjectScope) -> RequestBuilder {
        let mut builder = self
            .inner
            .request(method, self.url(path))
            .timeout(self.timeout)
            .header(constants::AUTH_TOKEN_HEADER, &self.auth_token);
        if let Some(project) = self.project_header(scope).await {
            builder = builder.header(constants::PROJECT_ID_HEADER, project);
        }
        builder
    }

    /// Send a prepared request, mapping transport failures.
    async fn dispatch(&self, builder: RequestBuilder) -> MstrResult<Response> {
        builder.send().await.map_err(classify_error)
    }

    // --- HTTP verb helpers ---

    /// Execute a GET request with query parameters.
    pub(crate) async fn http_get(
        &self,
        path: &str,
        scope: ProjectScope,
        query: &[(&str, String)],
    ) -> MstrResult<Response> {
        debug!("GET {}", path);
        let builder = self.prepare(Method::GET, path, scope).await.query(query);
        self.dispatch(builder).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn http_post(
        &self,
        path: &str,
        scope: ProjectScope,
        body: &serde_json::Value,
    ) -> MstrResult<Response> {
        debug!("POST {}", path);
        let builder = self.prepare(Method::POST, path, scope).await.json(body);
        self.dispatch(builder).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn http_put(
        &self,
        path: &str,
        scope: ProjectScope,
        body: &serde_json::Value,
    ) -> MstrResult<Response> {
        debug!("PUT {}", path);
        let builder = self.prepare(Method::PUT, path, scope).await.json(body);
        self.dispatch(builder).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn http_patch(
        &self,
        path: &str,
        scope: ProjectScope,
        body: &serde_json::Value,
    ) -> MstrResult<Response> {
        debug!("PATCH {}", path);
        let builder = self.prepare(Method::PATCH, path, scope).await.json(body);
        self.dispatch(builder).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn http_delete(
        &self,
        path: &str,
        scope: ProjectScope,
    ) -> MstrResult<Response> {
        debug!("DELETE {}", path);
        let builder = self.prepare(Method::DELETE, path, scope).await;
        self.dispatch(builder).await
    }

    /// Dispatch a GET request on a background task and return the pending
    /// handle.
    ///
    /// The response is returned unvalidated; routing it through the response
    /// handler is deferred to the caller collecting the results.
    pub(crate) fn spawn_get(
        &self,
        path: String,
        scope: ProjectScope,
        query: Vec<(String, String)>,
    ) -> JoinHandle<MstrResult<Response>> {
        let connection = self.clone();
        tokio::spawn(async move {
            let query: Vec<(&str, String)> =
                query.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
            connection.http_get(&path, scope, &query).await
        })
    }
}

/// Classify a reqwest error into an MstrError variant.
fn classify_error(e: reqwest::Error) -> MstrError {
    if e.is_timeout() {
        MstrError::Timeout(e.to_string())
    } else if e.is_connect() {
        MstrError::Http(format!("connection failed: {e}"))
    } else {
        MstrError::Http(e.to_string())
    }
}
