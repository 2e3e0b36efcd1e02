//! Unverified JWT payload decoding
//!
//! The console never checks token signatures. When the validation endpoint
//! cannot be reached it falls back to reading the stored token's payload and
//! trusting the expiry claim, so only the claims it needs are modelled here.

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

/// Claims read from a token payload without signature verification
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    #[serde(default)]
    pub sub: Option<String>,
    /// Login email
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, seconds since epoch
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Check if the token is expired. A token without an exp claim counts
    /// as expired.
    pub fn is_expired(&self) -> bool {
        match self.exp {
            Some(exp) => chrono::Utc::now().timestamp() >= exp,
            None => true,
        }
    }
}

/// Shallow shape check: exactly three dot-separated segments
pub fn has_jwt_shape(token: &str) -> bool {
    token.split('.').count() == 3
}

/// Decode the payload segment of a JWT without verifying its signature
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(Error::InvalidToken("token is not in JWT format".to_string())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| Error::InvalidToken(format!("payload is not valid base64url: {}", e)))?;
    let claims =
        serde_json::from_slice(&bytes).map_err(|e| Error::InvalidToken(format!("payload is not valid JSON: {}", e)))?;
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_token(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.sig",
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_jwt_shape() {
        assert!(has_jwt_shape("a.b.c"));
        assert!(!has_jwt_shape("a.b"));
        assert!(!has_jwt_shape("a.b.c.d"));
        assert!(!has_jwt_shape(""));
    }

    #[test]
    fn test_decode_claims() {
        let token = fake_token(r#"{"sub":"42","email":"a@b.com","exp":4102444800}"#);
        let claims = decode_claims(&token).expect("should decode");
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_missing_exp_counts_as_expired() {
        let token = fake_token(r#"{"sub":"42"}"#);
        let claims = decode_claims(&token).expect("should decode");
        assert!(claims.is_expired());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_claims("not-a-token").is_err());
        assert!(decode_claims("a.%%%.c").is_err());
        let token = fake_token("not json");
        assert!(decode_claims(&token).is_err());
    }
}
