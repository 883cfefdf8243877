use std::fmt;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::CatalogError;

/// Header carrying the shared secret on mutating requests.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The single identity granted to callers presenting the configured secret.
pub const API_PRINCIPAL: &str = "API User";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub name: &'static str,
}

/// Outcome of checking one request's credential. Each request is judged on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthResult {
    Authenticated(Principal),
    MissingCredential,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingCredential,
    InvalidCredential,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::MissingCredential => f.write_str("API key missing"),
            AuthFailure::InvalidCredential => f.write_str("invalid API key"),
        }
    }
}

impl AuthResult {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthResult::Authenticated(_))
    }

    pub fn into_result(self) -> Result<Principal, AuthFailure> {
        match self {
            AuthResult::Authenticated(principal) => Ok(principal),
            AuthResult::MissingCredential => Err(AuthFailure::MissingCredential),
            AuthResult::Invalid => Err(AuthFailure::InvalidCredential),
        }
    }
}

/// Validates presented credentials against the secret fixed at startup.
///
/// Comparison runs in constant time over the secret bytes. The secret is never
/// printed, including through `Debug`.
#[derive(Clone)]
pub struct ApiKeyGate {
    secret: Arc<str>,
}

impl fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl ApiKeyGate {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn authenticate(&self, presented: Option<&str>) -> AuthResult {
        self.authenticate_bytes(presented.map(str::as_bytes))
    }

    /// Reads `X-Api-Key` from `headers`. A non-UTF-8 value counts as present but wrong.
    pub fn authenticate_headers(&self, headers: &HeaderMap) -> AuthResult {
        self.authenticate_bytes(headers.get(API_KEY_HEADER).map(|v| v.as_bytes()))
    }

    fn authenticate_bytes(&self, presented: Option<&[u8]>) -> AuthResult {
        let Some(presented) = presented else {
            return AuthResult::MissingCredential;
        };
        if bool::from(presented.ct_eq(self.secret.as_bytes())) {
            AuthResult::Authenticated(Principal {
                name: API_PRINCIPAL,
            })
        } else {
            AuthResult::Invalid
        }
    }
}

/// Extractor guarding mutating handlers: the handler body only runs once the
/// gate has authenticated the request.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey(pub Principal);

impl<S> FromRequestParts<S> for RequireApiKey
where
    ApiKeyGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gate = ApiKeyGate::from_ref(state);
        match gate.authenticate_headers(&parts.headers).into_result() {
            Ok(principal) => Ok(Self(principal)),
            Err(reason) => {
                warn!(
                    method = %parts.method,
                    path = %parts.uri.path(),
                    %reason,
                    "rejected unauthenticated request"
                );
                Err(CatalogError::Unauthorized(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> ApiKeyGate {
        ApiKeyGate::new("my-secret-api-key")
    }

    #[test]
    fn exact_secret_authenticates_fixed_principal() {
        let result = gate().authenticate(Some("my-secret-api-key"));
        assert_eq!(
            result,
            AuthResult::Authenticated(Principal {
                name: API_PRINCIPAL
            })
        );
    }

    #[test]
    fn absent_header_is_missing_credential() {
        assert_eq!(gate().authenticate(None), AuthResult::MissingCredential);
        assert_eq!(
            gate().authenticate_headers(&HeaderMap::new()),
            AuthResult::MissingCredential
        );
    }

    #[test]
    fn near_misses_are_invalid() {
        let gate = gate();
        for candidate in [
            "",
            "my-secret-api-ke",
            "my-secret-api-key ",
            "MY-SECRET-API-KEY",
            "my-secret-api-keyy",
        ] {
            assert_eq!(gate.authenticate(Some(candidate)), AuthResult::Invalid, "{candidate:?}");
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive_on_name_only() {
        let gate = gate();
        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Key", HeaderValue::from_static("my-secret-api-key"));
        assert!(gate.authenticate_headers(&headers).is_authenticated());

        headers.insert("X-Api-Key", HeaderValue::from_static("My-Secret-Api-Key"));
        assert_eq!(gate.authenticate_headers(&headers), AuthResult::Invalid);
    }

    #[test]
    fn non_utf8_header_value_is_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_bytes(&[0xff, 0xfe]).expect("opaque header value"),
        );
        assert_eq!(gate().authenticate_headers(&headers), AuthResult::Invalid);
    }

    #[test]
    fn failures_map_to_reasons() {
        assert_eq!(
            AuthResult::MissingCredential.into_result(),
            Err(AuthFailure::MissingCredential)
        );
        assert_eq!(
            AuthResult::Invalid.into_result(),
            Err(AuthFailure::InvalidCredential)
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", gate());
        assert!(!rendered.contains("my-secret-api-key"));
    }
}
