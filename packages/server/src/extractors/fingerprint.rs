use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the client's opaque voting identity.
pub const FINGERPRINT_HEADER: &str = "X-User-Fingerprint";

/// Identity bucket shared by every caller that sends no fingerprint.
pub const ANONYMOUS: &str = "anonymous";

/// Pseudo-identity used as the vote ledger's natural-key partner.
///
/// This is a weak, client-supplied identity, not a security boundary: it only
/// scopes the re-vote window. Resolution never fails; absent or unreadable
/// headers collapse onto the shared `anonymous` bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fingerprint(pub String);

impl Fingerprint {
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(token) if !token.trim().is_empty() => Fingerprint(token.trim().to_string()),
            _ => Fingerprint(ANONYMOUS.to_string()),
        }
    }
}

impl<S> FromRequestParts<S> for Fingerprint
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(FINGERPRINT_HEADER)
            .and_then(|v| v.to_str().ok());
        Ok(Fingerprint::resolve(raw))
    }
}
