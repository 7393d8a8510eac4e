//! Issue and check HS256 tokens for a Mercure-style publish/subscribe hub.
//!
//! A token carries a `mercure` claim listing the topics its bearer may
//! `publish` to or `subscribe` to. Publisher and subscriber tokens are signed
//! with two different secrets, so one can never stand in for the other.

pub mod clock;
pub mod config;
pub mod error;
pub mod helpers;
pub mod jwt_core;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::IssuerConfig;
pub use error::{IssueError, VerifyError};
pub use jwt_core::{issue, verify, TokenIssuer, TokenVerifier};
pub use types::{Claims, Expiry, MercureClaim, Role, Secret, Token};
