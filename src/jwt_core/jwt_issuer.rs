use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::IssuerConfig;
use crate::error::IssueError;
use crate::types::{Claims, Expiry, Role, Token};

/// Sign an HS256 token granting `role` on `topic`.
///
/// The clock is only consulted when `expiry` is set, so without one the
/// output depends on the arguments alone.
pub fn issue<C: Clock>(
    role: Role,
    secret: &[u8],
    topic: &str,
    expiry: Option<Expiry>,
    clock: &C,
) -> Result<Token, IssueError> {
    if secret.is_empty() {
        return Err(IssueError::MissingSecret { role });
    }
    if topic.is_empty() {
        return Err(IssueError::MissingTopic);
    }

    let exp = match expiry {
        Some(expiry) => {
            let issued_at = clock.now();
            let now = issued_at.timestamp();
            let exp = expiry.resolve(issued_at);
            if exp <= now {
                return Err(IssueError::InvalidExpiry { exp, now });
            }
            Some(exp)
        }
        None => None,
    };

    let claims = Claims::for_role(role, topic, exp);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?;

    debug!(%role, topic, ?exp, "issued token");
    Ok(Token::new(token))
}

/// Issues tokens from a fixed configuration.
pub struct TokenIssuer<C = SystemClock> {
    config: IssuerConfig,
    clock: C,
}

impl TokenIssuer<SystemClock> {
    pub fn new(config: IssuerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TokenIssuer<C> {
    pub fn with_clock(config: IssuerConfig, clock: C) -> Self {
        TokenIssuer { config, clock }
    }

    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn issue(&self, role: Role, expiry: Option<Expiry>) -> Result<Token, IssueError> {
        let secret = self
            .config
            .secret(role)
            .ok_or(IssueError::MissingSecret { role })?;
        let topic = self.config.topic().ok_or(IssueError::MissingTopic)?;

        issue(role, secret.as_bytes(), topic, expiry, &self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::types::Secret;

    const NOW: i64 = 1_700_000_000;

    fn segments(token: &Token) -> Vec<String> {
        token.as_str().split('.').map(String::from).collect()
    }

    fn decode_json(segment: &str) -> serde_json::Value {
        let bytes = base64::decode_config(segment, base64::URL_SAFE_NO_PAD).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_publisher_token_layout() {
        let clock = FixedClock::from_timestamp(NOW).unwrap();
        let token = issue(Role::Publisher, b"pub-secret-123", "orders/42", None, &clock).unwrap();

        let parts = segments(&token);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| !p.contains('=')));

        let header = decode_json(&parts[0]);
        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");

        let payload = decode_json(&parts[1]);
        assert_eq!(payload, serde_json::json!({"mercure": {"publish": ["orders/42"]}}));
    }

    #[test]
    fn test_expiry_is_relative_to_clock() {
        let clock = FixedClock::from_timestamp(NOW).unwrap();
        let token = issue(
            Role::Subscriber,
            b"sub-secret-456",
            "orders/*",
            Some(Expiry::from_secs(3600)),
            &clock,
        )
        .unwrap();

        let payload = decode_json(&segments(&token)[1]);
        assert_eq!(payload["exp"], NOW + 3600);
        assert_eq!(payload["mercure"]["subscribe"][0], "orders/*");
        assert!(payload["mercure"].get("publish").is_none());
    }

    #[test]
    fn test_validation_errors() {
        let clock = FixedClock::from_timestamp(NOW).unwrap();

        let err = issue(Role::Publisher, b"", "orders/42", None, &clock).unwrap_err();
        assert!(matches!(err, IssueError::MissingSecret { role: Role::Publisher }));

        let err = issue(Role::Subscriber, b"secret", "", None, &clock).unwrap_err();
        assert!(matches!(err, IssueError::MissingTopic));

        let err = issue(Role::Publisher, b"secret", "t", Some(Expiry::At(NOW)), &clock).unwrap_err();
        assert!(matches!(err, IssueError::InvalidExpiry { exp, now } if exp == NOW && now == NOW));

        let err = issue(Role::Publisher, b"secret", "t", Some(Expiry::from_secs(-5)), &clock).unwrap_err();
        assert!(matches!(err, IssueError::InvalidExpiry { .. }));
    }

    #[test]
    fn test_secret_checked_before_topic() {
        let clock = FixedClock::from_timestamp(NOW).unwrap();
        let err = issue(Role::Subscriber, b"", "", None, &clock).unwrap_err();
        assert!(matches!(err, IssueError::MissingSecret { role: Role::Subscriber }));
    }

    #[test]
    fn test_issuer_uses_role_secret() {
        let config = IssuerConfig::new(Secret::from("pub"), Secret::from("sub"), "orders/42");
        let issuer = TokenIssuer::with_clock(config, FixedClock::from_timestamp(NOW).unwrap());

        let published = issuer.issue(Role::Publisher, None).unwrap();
        let direct = issue(Role::Publisher, b"pub", "orders/42", None, issuer.clock()).unwrap();
        assert_eq!(published, direct);

        let subscribed = issuer.issue(Role::Subscriber, None).unwrap();
        let direct = issue(Role::Subscriber, b"sub", "orders/42", None, issuer.clock()).unwrap();
        assert_eq!(subscribed, direct);
    }

    #[test]
    fn test_issuer_missing_config_values() {
        let issuer = TokenIssuer::new(IssuerConfig::default());
        assert!(matches!(
            issuer.issue(Role::Subscriber, None),
            Err(IssueError::MissingSecret { role: Role::Subscriber })
        ));

        let config = IssuerConfig {
            publisher_secret: Some(Secret::from("pub")),
            ..IssuerConfig::default()
        };
        let issuer = TokenIssuer::new(config);
        assert!(matches!(issuer.issue(Role::Publisher, None), Err(IssueError::MissingTopic)));
    }
}
