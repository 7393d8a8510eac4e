pub mod jwt_issuer;
pub mod jwt_verifier;

pub use jwt_issuer::{issue, TokenIssuer};
pub use jwt_verifier::{verify, TokenVerifier};
