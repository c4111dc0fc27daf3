//! Access precondition — the one thing the guide takes from authentication.
//!
//! Sign-in and domain allow-listing happen elsewhere (an authenticating
//! proxy in front of the HTTP host). The guide only asks "is this viewer
//! authorized" before mounting a traversal.

use axum::http::{HeaderMap, HeaderName};

use crate::error::ConfigError;

/// Decides whether a request comes from an authorized viewer.
pub trait AccessCheck: Send + Sync {
    fn is_authorized(&self, headers: &HeaderMap) -> bool;
}

/// Trusts an identity header set by an upstream authenticating proxy.
///
/// A request is authorized when the header is present and non-blank.
#[derive(Debug, Clone)]
pub struct TrustedHeader {
    header: HeaderName,
}

impl TrustedHeader {
    pub fn new(header: &str) -> Result<Self, ConfigError> {
        let header = HeaderName::from_bytes(header.as_bytes()).map_err(|e| {
            ConfigError::InvalidValue {
                key: "OUTBOUND_GUIDE_IDENTITY_HEADER".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { header })
    }
}

impl AccessCheck for TrustedHeader {
    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| !v.trim().is_empty())
    }
}
