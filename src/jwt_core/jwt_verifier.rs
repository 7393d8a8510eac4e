use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::IssuerConfig;
use crate::error::VerifyError;
use crate::types::{Claims, Role};

type HmacSha256 = Hmac<Sha256>;

/// Check an HS256 token the way a hub would and return its claims.
///
/// Only `HS256` is accepted. `exp`, when present, must lie after `clock.now()`.
pub fn verify<C: Clock>(token: &str, secret: &[u8], clock: &C) -> Result<Claims, VerifyError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(VerifyError::InvalidFormat);
    }

    let header: Value = serde_json::from_slice(&decode_segment(parts[0])?)
        .map_err(|_| VerifyError::InvalidFormat)?;
    match header.get("alg").and_then(Value::as_str) {
        Some("HS256") => {}
        Some(alg) => return Err(VerifyError::UnsupportedAlgorithm(alg.to_string())),
        None => return Err(VerifyError::InvalidFormat),
    }

    if secret.is_empty() {
        return Err(VerifyError::InvalidSignature);
    }
    let signature = decode_segment(parts[2])?;
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| VerifyError::InvalidSignature)?;
    mac.update(parts[0].as_bytes());
    mac.update(b".");
    mac.update(parts[1].as_bytes());
    // Constant-time comparison
    mac.verify_slice(&signature)
        .map_err(|_| VerifyError::InvalidSignature)?;

    let claims: Claims = serde_json::from_slice(&decode_segment(parts[1])?)
        .map_err(|e| VerifyError::Decode(e.to_string()))?;

    if let Some(exp) = claims.exp {
        let now = clock.now().timestamp();
        if now >= exp {
            return Err(VerifyError::Expired { exp, now });
        }
    }

    debug!(exp = ?claims.exp, "verified token");
    Ok(claims)
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, VerifyError> {
    base64::decode_config(segment, base64::URL_SAFE_NO_PAD).map_err(|_| VerifyError::InvalidFormat)
}

/// Hub-side counterpart of `TokenIssuer`: checks tokens against the secret of
/// the role they claim to carry.
pub struct TokenVerifier<C = SystemClock> {
    config: IssuerConfig,
    clock: C,
}

impl TokenVerifier<SystemClock> {
    pub fn new(config: IssuerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TokenVerifier<C> {
    pub fn with_clock(config: IssuerConfig, clock: C) -> Self {
        TokenVerifier { config, clock }
    }

    pub fn verify(&self, role: Role, token: &str) -> Result<Claims, VerifyError> {
        let secret = self
            .config
            .secret(role)
            .ok_or(VerifyError::MissingSecret { role })?;
        verify(token, secret.as_bytes(), &self.clock)
    }

    /// Whether `token` lets its bearer act as `role` on `topic`.
    pub fn authorize(&self, role: Role, token: &str, topic: &str) -> Result<bool, VerifyError> {
        let claims = self.verify(role, token)?;
        let allowed = claims.allows(role, topic);
        debug!(%role, topic, allowed, "authorization decision");
        Ok(allowed)
    }
}
