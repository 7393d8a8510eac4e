//! Issuer configuration.
//!
//! Values are read once, at startup, into an [`IssuerConfig`] that is passed
//! explicitly to the issuer. Unset values stay `None` so the issuer can report
//! which one is missing.

use crate::types::{Role, Secret};

pub const PUBLISHER_SECRET_VAR: &str = "MERCURE_JWT_PUBLISHER";
pub const SUBSCRIBER_SECRET_VAR: &str = "MERCURE_JWT_SUBSCRIBER";
pub const TOPIC_VAR: &str = "MERCURE_TOPIC";

#[derive(Debug, Clone, Default)]
pub struct IssuerConfig {
    pub publisher_secret: Option<Secret>,
    pub subscriber_secret: Option<Secret>,
    pub topic: Option<String>,
}

impl IssuerConfig {
    pub fn new(publisher_secret: Secret, subscriber_secret: Secret, topic: impl Into<String>) -> Self {
        Self {
            publisher_secret: Some(publisher_secret),
            subscriber_secret: Some(subscriber_secret),
            topic: Some(topic.into()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a map in tests, ...).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            publisher_secret: lookup(PUBLISHER_SECRET_VAR).map(Secret::from),
            subscriber_secret: lookup(SUBSCRIBER_SECRET_VAR).map(Secret::from),
            topic: lookup(TOPIC_VAR),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn secret(&self, role: Role) -> Option<&Secret> {
        match role {
            Role::Publisher => self.publisher_secret.as_ref(),
            Role::Subscriber => self.subscriber_secret.as_ref(),
        }
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }
}
