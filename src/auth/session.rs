//! # Session Management
//!
//! Per-request Session Oracle built from the request's credentials.
//!
//! ## Invariants
//! - Logout invalidates immediately (revoked tokens stop authenticating)
//! - The revocation list is consulted on every oracle query
//! - A bad or missing token means "signed out", never an error

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::crypto::hash_token;
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtConfig, JwtManager, SessionClaims};
use crate::portal::{Role, SessionOracle};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HS256 secret shared with the token issuer
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_audience")]
    pub audience: String,

    /// Lifetime of tokens minted with this config
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// Cookie carrying the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

pub const DEFAULT_JWT_SECRET: &str = "CHANGE_THIS_SECRET_IN_PRODUCTION";

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_issuer() -> String {
    "careerverse".to_string()
}

fn default_audience() -> String {
    "careerverse-portal".to_string()
}

fn default_token_ttl_minutes() -> i64 {
    8 * 60
}

fn default_cookie_name() -> String {
    "careerverse_session".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: default_issuer(),
            audience: default_audience(),
            token_ttl_minutes: default_token_ttl_minutes(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl SessionConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            token_ttl: Duration::minutes(self.token_ttl_minutes),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        }
    }
}

/// Tokens ended by logout, keyed by hash, kept until they would expire anyway
#[derive(Debug, Default)]
pub struct RevocationList {
    revoked: RwLock<HashMap<String, i64>>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke `token`, which would expire at `expires_at` (Unix seconds)
    pub fn revoke(&self, token: &str, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut revoked = self
            .revoked
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(hash_token(token), expires_at);
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.revoked
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&hash_token(token))
    }

    pub fn len(&self) -> usize {
        self.revoked
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validates request credentials and hands out per-request oracles
#[derive(Clone)]
pub struct SessionAuthority {
    jwt: JwtManager,
    revocations: Arc<RevocationList>,
    cookie_name: String,
}

impl SessionAuthority {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            jwt: JwtManager::new(config.jwt_config()),
            revocations: Arc::new(RevocationList::new()),
            cookie_name: config.cookie_name.clone(),
        }
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.jwt
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn revocations(&self) -> &RevocationList {
        &self.revocations
    }

    /// Session tokens on the request, bearer header first, then the cookie
    pub fn tokens_from_headers(&self, headers: &HeaderMap) -> Vec<String> {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let cookie = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == self.cookie_name && !value.is_empty())
            .map(|(_, value)| value.to_string());

        bearer.into_iter().chain(cookie).collect()
    }

    /// Validate `token` against signature, expiry and the revocation list
    pub fn validate(&self, token: &str) -> AuthResult<SessionClaims> {
        let claims = self.jwt.validate_token(token)?;
        if self.revocations.is_revoked(token) {
            return Err(AuthError::SessionRevoked);
        }
        Ok(claims)
    }

    /// First valid credential on the request
    ///
    /// A rejected bearer token falls through to the session cookie. The
    /// error of the last rejected token is returned when none is valid.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<(String, SessionClaims)> {
        let mut rejection = AuthError::MissingToken;
        for token in self.tokens_from_headers(headers) {
            match self.validate(&token) {
                Ok(claims) => return Ok((token, claims)),
                Err(e) => rejection = e,
            }
        }
        Err(rejection)
    }

    /// Build the oracle for one request
    pub fn session_from_headers(&self, headers: &HeaderMap) -> RequestSession {
        match self.authenticate(headers) {
            Ok(credentials) => RequestSession {
                credentials: Some(credentials),
                revocations: self.revocations.clone(),
            },
            Err(AuthError::MissingToken) => RequestSession::anonymous(self.revocations.clone()),
            Err(e) => {
                if e.is_client_error() {
                    tracing::debug!(error = %e, "session token rejected");
                } else {
                    tracing::warn!(error = %e, status = e.status_code(), "session check failed");
                }
                RequestSession::anonymous(self.revocations.clone())
            }
        }
    }
}

/// Session Oracle for a single request
#[derive(Debug, Clone)]
pub struct RequestSession {
    credentials: Option<(String, SessionClaims)>,
    revocations: Arc<RevocationList>,
}

impl RequestSession {
    pub fn anonymous(revocations: Arc<RevocationList>) -> Self {
        Self {
            credentials: None,
            revocations,
        }
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        self.live_credentials().map(|(_, claims)| claims)
    }

    fn live_credentials(&self) -> Option<&(String, SessionClaims)> {
        self.credentials
            .as_ref()
            .filter(|(token, _)| !self.revocations.is_revoked(token))
    }
}

impl SessionOracle for RequestSession {
    fn is_authenticated(&self) -> bool {
        self.live_credentials().is_some()
    }

    fn role(&self) -> Option<Role> {
        self.claims().and_then(SessionClaims::role)
    }

    fn logout(&self) {
        if let Some((token, claims)) = &self.credentials {
            self.revocations.revoke(token, claims.exp);
            tracing::info!(subject = %claims.sub, "session ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn authority() -> SessionAuthority {
        SessionAuthority::new(&SessionConfig {
            jwt_secret: "session_test_secret".to_string(),
            ..SessionConfig::default()
        })
    }

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_no_credentials_is_anonymous() {
        let session = authority().session_from_headers(&HeaderMap::new());
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
    }

    #[test]
    fn test_bearer_token() {
        let authority = authority();
        let token = authority.jwt().issue_token(Uuid::new_v4(), Role::Mentor).unwrap();
        let headers = headers_with(header::AUTHORIZATION, &format!("Bearer {}", token));

        let session = authority.session_from_headers(&headers);
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Mentor));
    }

    #[test]
    fn test_cookie_token() {
        let authority = authority();
        let token = authority.jwt().issue_token(Uuid::new_v4(), Role::Student).unwrap();
        let cookie = format!("theme=dark; careerverse_session={}; other=1", token);
        let headers = headers_with(header::COOKIE, &cookie);

        assert_eq!(authority.tokens_from_headers(&headers), vec![token]);
        assert_eq!(authority.session_from_headers(&headers).role(), Some(Role::Student));
    }

    #[test]
    fn test_no_credentials_is_missing_token() {
        let result = authority().authenticate(&HeaderMap::new());
        assert_eq!(result.err(), Some(AuthError::MissingToken));
    }

    #[test]
    fn test_rejected_bearer_falls_back_to_cookie() {
        let authority = authority();
        let cookie_token = authority.jwt().issue_token(Uuid::new_v4(), Role::Mentor).unwrap();

        let mut headers = headers_with(header::AUTHORIZATION, "Bearer not-a-jwt");
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("careerverse_session={}", cookie_token)).unwrap(),
        );

        let session = authority.session_from_headers(&headers);
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Mentor));
    }

    #[test]
    fn test_revoked_bearer_falls_back_to_cookie() {
        let authority = authority();
        let bearer = authority.jwt().issue_token(Uuid::new_v4(), Role::Student).unwrap();
        let cookie_token = authority.jwt().issue_token(Uuid::new_v4(), Role::Mentor).unwrap();
        authority.revocations().revoke(&bearer, Utc::now().timestamp() + 600);

        let mut headers = headers_with(header::AUTHORIZATION, &format!("Bearer {}", bearer));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("careerverse_session={}", cookie_token)).unwrap(),
        );

        let (token, claims) = authority.authenticate(&headers).unwrap();
        assert_eq!(token, cookie_token);
        assert_eq!(claims.role(), Some(Role::Mentor));
    }

    #[test]
    fn test_only_rejected_tokens_report_last_error() {
        let authority = authority();
        let headers = headers_with(header::AUTHORIZATION, "Bearer not-a-jwt");
        assert!(matches!(
            authority.authenticate(&headers),
            Err(AuthError::MalformedToken) | Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_token_is_anonymous() {
        let authority = authority();
        let headers = headers_with(header::AUTHORIZATION, "Bearer not-a-jwt");
        assert!(!authority.session_from_headers(&headers).is_authenticated());
    }

    #[test]
    fn test_logout_revokes_immediately() {
        let authority = authority();
        let token = authority.jwt().issue_token(Uuid::new_v4(), Role::Student).unwrap();
        let headers = headers_with(header::AUTHORIZATION, &format!("Bearer {}", token));

        let session = authority.session_from_headers(&headers);
        let other_view = session.clone();
        session.logout();

        // Same request and any later request both see the logout.
        assert!(!session.is_authenticated());
        assert!(!other_view.is_authenticated());
        assert_eq!(other_view.role(), None);
        assert!(!authority.session_from_headers(&headers).is_authenticated());
        assert_eq!(authority.validate(&token), Err(AuthError::SessionRevoked));
    }

    #[test]
    fn test_revocation_list_prunes_expired_entries() {
        let list = RevocationList::new();
        let now = Utc::now().timestamp();
        list.revoke("old", now - 10);
        list.revoke("fresh", now + 600);

        assert!(!list.is_revoked("old"));
        assert!(list.is_revoked("fresh"));
        assert_eq!(list.len(), 1);
    }
}
