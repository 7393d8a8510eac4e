use chrono::{DateTime, Utc};

/// Requested `exp` claim, either absolute or relative to issuance time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Unix timestamp in seconds.
    At(i64),
    /// Lifetime in seconds, counted from the moment of issuance.
    In(i64),
}

impl Expiry {
    pub fn from_secs(secs: i64) -> Self {
        Expiry::In(secs)
    }

    /// The `exp` value for a token issued at `now`. Saturates instead of
    /// overflowing, so an absurd lifetime still resolves to a timestamp.
    pub fn resolve(&self, now: DateTime<Utc>) -> i64 {
        match self {
            Expiry::At(ts) => *ts,
            Expiry::In(ttl) => now.timestamp().saturating_add(*ttl),
        }
    }
}
