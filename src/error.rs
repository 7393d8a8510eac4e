use thiserror::Error;

use crate::types::Role;

#[derive(Error, Debug)]
pub enum IssueError {
    #[error("Invalid role '{0}': expected 'publisher' or 'subscriber'")]
    InvalidRole(String),
    #[error("Missing {role} secret: a non-empty signing key is required")]
    MissingSecret { role: Role },
    #[error("Missing topic: a non-empty topic is required")]
    MissingTopic,
    #[error("Invalid expiry {exp}: must be later than issuance time {now}")]
    InvalidExpiry { exp: i64, now: i64 },
    #[error("Signing failed: {0}")]
    SigningFailure(#[from] jsonwebtoken::errors::Error),
}

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Invalid JWT format")]
    InvalidFormat,
    #[error("Unsupported algorithm: {0} (only HS256 is accepted)")]
    UnsupportedAlgorithm(String),
    #[error("Missing {role} secret: cannot verify without a signing key")]
    MissingSecret { role: Role },
    #[error("Signature verification failed")]
    InvalidSignature,
    #[error("Claims decode failed: {0}")]
    Decode(String),
    #[error("Token expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },
}
