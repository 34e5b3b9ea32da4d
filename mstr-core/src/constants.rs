//! SDK-wide constants.

/// SDK version.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the authorization token on every request.
pub const AUTH_TOKEN_HEADER: &str = "X-MSTR-AuthToken";

/// Header selecting the project a request runs against.
pub const PROJECT_ID_HEADER: &str = "X-MSTR-ProjectID";

/// Value of the project header on project-agnostic requests.
pub const PROJECT_AGNOSTIC: &str = "null";

/// Response header carrying the total result count for list endpoints.
pub const TOTAL_COUNT_HEADER: &str = "x-mstr-total-count";

/// Body field carrying the total result count when the header is absent.
pub const TOTAL_ITEMS_FIELD: &str = "totalItems";

/// `limit` value meaning "no limit, subject to server governing settings".
pub const UNLIMITED: i64 = -1;

/// Default page size for bulk object retrieval.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;
