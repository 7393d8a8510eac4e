// src/types/claims.rs
use serde::{Deserialize, Serialize};

use super::Role;

/// Topic selector that matches every topic on the hub.
pub const ANY_TOPIC: &str = "*";

/// The `mercure` namespace of the payload.
///
/// An absent field and an empty list mean different things to a hub, so
/// `None` is never serialized as `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MercureClaim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub mercure: MercureClaim,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Claims granting `role` on exactly one topic.
    pub fn for_role(role: Role, topic: &str, exp: Option<i64>) -> Self {
        let topics = Some(vec![topic.to_string()]);
        let mercure = match role {
            Role::Publisher => MercureClaim {
                publish: topics,
                subscribe: None,
            },
            Role::Subscriber => MercureClaim {
                publish: None,
                subscribe: topics,
            },
        };

        Claims { mercure, exp }
    }

    pub fn topics(&self, role: Role) -> Option<&[String]> {
        match role {
            Role::Publisher => self.mercure.publish.as_deref(),
            Role::Subscriber => self.mercure.subscribe.as_deref(),
        }
    }

    /// Whether the claims let the bearer act as `role` on `topic`.
    pub fn allows(&self, role: Role, topic: &str) -> bool {
        self.topics(role)
            .map(|topics| topics.iter().any(|t| t == topic || t == ANY_TOPIC))
            .unwrap_or(false)
    }
}
