//! Bearer-token request middleware

use std::fmt;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;

use jsr_core::error::JsrError;
use crate::RegistryResult;

/// Attaches `Authorization: Bearer <token>` to outgoing requests.
///
/// An empty token produces a pass-through middleware. The header value is
/// validated once at construction so that `apply` cannot fail.
#[derive(Clone, Default)]
pub struct AuthMiddleware {
    token: String,
    header: Option<HeaderValue>,
}

impl AuthMiddleware {
    /// Build the middleware for `token`; empty means unauthenticated
    pub fn new(token: &str) -> RegistryResult<Self> {
        if token.is_empty() {
            return Ok(Self::default());
        }

        let mut header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| JsrError::InvalidToken { reason: e.to_string() })?;
        header.set_sensitive(true);

        Ok(Self {
            token: token.to_string(),
            header: Some(header),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.header.is_some()
    }

    /// Token the header was built from, empty when unauthenticated
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Decorate a request just before it is handed to the transport
    pub fn apply(&self, mut request: Request) -> Request {
        if let Some(header) = &self.header {
            request.headers_mut().insert(AUTHORIZATION, header.clone());
        }
        request
    }
}

impl fmt::Debug for AuthMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthMiddleware")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
