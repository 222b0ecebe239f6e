//! HTTP client wrapper bound to the registry origin and the current token

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use url::Url;

use jsr_core::error::JsrError;
use jsr_core::types::strip_scope_prefix;
use crate::api::{
    ApiError, GetPackageDocsResponse, GetPackageScoreResponse, GetScopeResponse,
    GetSelfUserResponse, GetStatsResponse, ListPackageVersionsResponse, ListPackagesResponse,
    ListScopeMembersResponse, ListScopePackagesResponse, ListSelfUserScopesResponse,
};
use crate::middleware::AuthMiddleware;
use crate::session::Session;
use crate::RegistryResult;

/// Static settings the client is built from
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registry API origin
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jsr.io".to_string(),
            user_agent: format!("jsr-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Everything a single request needs, swapped as one unit on token change
#[derive(Debug)]
struct Binding {
    http: Client,
    base_url: Url,
    auth: AuthMiddleware,
}

/// Status and body of a finished round trip, not yet classified
struct RawResponse {
    operation: &'static str,
    status: StatusCode,
    body: Vec<u8>,
}

/// Typed client for the registry API.
///
/// Cloning is cheap and every clone shares the same binding, so a token set
/// through one clone is used by all of them.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    binding: Arc<RwLock<Arc<Binding>>>,
}

impl RegistryClient {
    /// Create an unauthenticated client
    pub fn new(config: ClientConfig) -> RegistryResult<Self> {
        Self::with_token(config, "")
    }

    /// Create a client that authenticates with `token` (empty means none)
    pub fn with_token(config: ClientConfig, token: &str) -> RegistryResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| JsrError::ConfigValidation {
                field: "base_url".to_string(),
                reason: format!("'{}' is not a URL: {}", config.base_url, e),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(JsrError::ConfigValidation {
                field: "base_url".to_string(),
                reason: format!("'{}' cannot be used as a base URL", config.base_url),
            });
        }

        let http = ClientBuilder::new()
            .gzip(true)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| JsrError::network(format!("Failed to create HTTP client: {}", e), e))?;

        let binding = Binding {
            http,
            base_url,
            auth: AuthMiddleware::new(token)?,
        };

        Ok(Self {
            binding: Arc::new(RwLock::new(Arc::new(binding))),
        })
    }

    /// Create a client using the session's current token
    pub fn with_session(config: ClientConfig, session: &Session) -> RegistryResult<Self> {
        Self::with_token(config, &session.snapshot().access_token)
    }

    /// Rebind the client to `token`; an empty token drops authentication.
    ///
    /// Requests issued after this returns use the new binding. Requests already
    /// in flight finish with the binding they started with.
    pub fn set_token(&self, token: &str) -> RegistryResult<()> {
        let auth = AuthMiddleware::new(token)?;

        let mut current = self.binding.write();
        let next = Binding {
            http: current.http.clone(),
            base_url: current.base_url.clone(),
            auth,
        };
        *current = Arc::new(next);

        debug!(authenticated = !token.is_empty(), "Registry client rebound");
        Ok(())
    }

    /// Keep the client bound to whatever token `session` holds
    pub fn follow(&self, session: &Session) -> JoinHandle<()> {
        let client = self.clone();
        let mut updates = session.subscribe();

        tokio::spawn(async move {
            loop {
                let token = updates.borrow_and_update().access_token.clone();
                if let Err(e) = client.set_token(&token) {
                    warn!("Ignoring session token: {}", e);
                }
                if updates.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().auth.is_authenticated()
    }

    /// Token of the current binding, empty when unauthenticated
    pub fn token(&self) -> String {
        self.snapshot().auth.token().to_string()
    }

    /// Registry origin the client is bound to
    pub fn base_url(&self) -> String {
        self.snapshot().base_url.to_string()
    }

    fn snapshot(&self) -> Arc<Binding> {
        self.binding.read().clone()
    }

    /// List packages, optionally filtered by a search string
    pub async fn list_packages(&self, query: Option<&str>) -> RegistryResult<ListPackagesResponse> {
        let query: Vec<(&str, &str)> = query
            .filter(|q| !q.is_empty())
            .map(|q| vec![("query", q)])
            .unwrap_or_default();
        let raw = self.get("list_packages", &["packages"], &query).await?;

        Ok(match raw.status {
            StatusCode::OK => ListPackagesResponse::Ok(raw.json()?),
            StatusCode::BAD_REQUEST => ListPackagesResponse::BadRequest(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                ListPackagesResponse::Undocumented { status, body }
            }
        })
    }

    /// Registry statistics, including featured packages
    pub async fn get_stats(&self) -> RegistryResult<GetStatsResponse> {
        let raw = self.get("get_stats", &["stats"], &[]).await?;

        Ok(match raw.status {
            StatusCode::OK => GetStatsResponse::Ok(raw.json()?),
            _ => {
                let (status, body) = raw.undocumented();
                GetStatsResponse::Undocumented { status, body }
            }
        })
    }

    pub async fn get_package_score(&self, scope: &str, name: &str) -> RegistryResult<GetPackageScoreResponse> {
        let segments = ["scopes", strip_scope_prefix(scope), "packages", name, "score"];
        let raw = self.get("get_package_score", &segments, &[]).await?;

        Ok(match raw.status {
            StatusCode::OK => GetPackageScoreResponse::Ok(raw.json()?),
            StatusCode::BAD_REQUEST => GetPackageScoreResponse::BadRequest(raw.api_error()),
            StatusCode::NOT_FOUND => GetPackageScoreResponse::NotFound(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                GetPackageScoreResponse::Undocumented { status, body }
            }
        })
    }

    pub async fn list_package_versions(&self, scope: &str, name: &str) -> RegistryResult<ListPackageVersionsResponse> {
        let segments = ["scopes", strip_scope_prefix(scope), "packages", name, "versions"];
        let raw = self.get("list_package_versions", &segments, &[]).await?;

        Ok(match raw.status {
            StatusCode::OK => ListPackageVersionsResponse::Ok(raw.json()?),
            StatusCode::BAD_REQUEST => ListPackageVersionsResponse::BadRequest(raw.api_error()),
            StatusCode::NOT_FOUND => ListPackageVersionsResponse::NotFound(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                ListPackageVersionsResponse::Undocumented { status, body }
            }
        })
    }

    /// Rendered docs for one version; `all_symbols` asks for the full symbol
    /// index instead of the README
    pub async fn get_package_version_docs(
        &self,
        scope: &str,
        name: &str,
        version: &str,
        all_symbols: bool,
    ) -> RegistryResult<GetPackageDocsResponse> {
        let segments = ["scopes", strip_scope_prefix(scope), "packages", name, "versions", version, "docs"];
        let query: &[(&str, &str)] = if all_symbols { &[("all_symbols", "true")] } else { &[] };
        let raw = self.get("get_package_version_docs", &segments, query).await?;

        Ok(match raw.status {
            StatusCode::OK => GetPackageDocsResponse::Ok(raw.json()?),
            StatusCode::BAD_REQUEST => GetPackageDocsResponse::BadRequest(raw.api_error()),
            StatusCode::NOT_FOUND => GetPackageDocsResponse::NotFound(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                GetPackageDocsResponse::Undocumented { status, body }
            }
        })
    }

    /// Scope details; quotas are only included for members
    pub async fn get_scope(&self, scope: &str) -> RegistryResult<GetScopeResponse> {
        let raw = self.get("get_scope", &["scopes", strip_scope_prefix(scope)], &[]).await?;

        Ok(match raw.status {
            StatusCode::OK => GetScopeResponse::Ok(raw.json()?),
            StatusCode::BAD_REQUEST => GetScopeResponse::BadRequest(raw.api_error()),
            StatusCode::UNAUTHORIZED => GetScopeResponse::Unauthorized(raw.api_error()),
            StatusCode::NOT_FOUND => GetScopeResponse::NotFound(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                GetScopeResponse::Undocumented { status, body }
            }
        })
    }

    pub async fn list_scope_members(&self, scope: &str) -> RegistryResult<ListScopeMembersResponse> {
        let segments = ["scopes", strip_scope_prefix(scope), "members"];
        let raw = self.get("list_scope_members", &segments, &[]).await?;

        Ok(match raw.status {
            StatusCode::OK => ListScopeMembersResponse::Ok(raw.json()?),
            StatusCode::BAD_REQUEST => ListScopeMembersResponse::BadRequest(raw.api_error()),
            StatusCode::UNAUTHORIZED => ListScopeMembersResponse::Unauthorized(raw.api_error()),
            StatusCode::NOT_FOUND => ListScopeMembersResponse::NotFound(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                ListScopeMembersResponse::Undocumented { status, body }
            }
        })
    }

    pub async fn list_scope_packages(&self, scope: &str) -> RegistryResult<ListScopePackagesResponse> {
        let segments = ["scopes", strip_scope_prefix(scope), "packages"];
        let raw = self.get("list_scope_packages", &segments, &[]).await?;

        Ok(match raw.status {
            StatusCode::OK => ListScopePackagesResponse::Ok(raw.json()?),
            StatusCode::BAD_REQUEST => ListScopePackagesResponse::BadRequest(raw.api_error()),
            StatusCode::NOT_FOUND => ListScopePackagesResponse::NotFound(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                ListScopePackagesResponse::Undocumented { status, body }
            }
        })
    }

    /// The user the current token belongs to
    pub async fn get_self_user(&self) -> RegistryResult<GetSelfUserResponse> {
        let raw = self.get("get_self_user", &["user"], &[]).await?;

        Ok(match raw.status {
            StatusCode::OK => GetSelfUserResponse::Ok(raw.json()?),
            StatusCode::UNAUTHORIZED => GetSelfUserResponse::Unauthorized(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                GetSelfUserResponse::Undocumented { status, body }
            }
        })
    }

    pub async fn list_self_user_scopes(&self) -> RegistryResult<ListSelfUserScopesResponse> {
        let raw = self.get("list_self_user_scopes", &["user", "scopes"], &[]).await?;

        Ok(match raw.status {
            StatusCode::OK => ListSelfUserScopesResponse::Ok(raw.json()?),
            StatusCode::UNAUTHORIZED => ListSelfUserScopesResponse::Unauthorized(raw.api_error()),
            _ => {
                let (status, body) = raw.undocumented();
                ListSelfUserScopesResponse::Undocumented { status, body }
            }
        })
    }

    /// Issue one GET against the binding current at call time
    async fn get(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> RegistryResult<RawResponse> {
        let binding = self.snapshot();
        let url = endpoint_url(&binding.base_url, segments, query);

        debug!(operation, %url, authenticated = binding.auth.is_authenticated(), "Sending registry request");

        let request = binding.http
            .get(url)
            .header(ACCEPT, "application/json")
            .build()
            .map_err(|e| JsrError::network(format!("Failed to build {} request: {}", operation, e), e))?;
        let request = binding.auth.apply(request);

        let response = binding.http
            .execute(request)
            .await
            .map_err(|e| JsrError::network(format!("Failed to send {} request: {}", operation, e), e))?;

        let status = response.status();
        trace!(operation, status = status.as_u16(), "Registry responded");

        let body = response.bytes()
            .await
            .map_err(|e| JsrError::network(format!("Failed to read {} response: {}", operation, e), e))?
            .to_vec();

        Ok(RawResponse { operation, status, body })
    }
}

impl RawResponse {
    fn json<T: DeserializeOwned>(&self) -> RegistryResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| JsrError::decode(self.operation, e))
    }

    fn api_error(&self) -> ApiError {
        ApiError::from_body(&self.body)
    }

    fn undocumented(&self) -> (u16, String) {
        (self.status.as_u16(), String::from_utf8_lossy(&self.body).into_owned())
    }
}

/// Append percent-encoded path segments and query pairs to the origin
fn endpoint_url(base_url: &Url, segments: &[&str], query: &[(&str, &str)]) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url
}
