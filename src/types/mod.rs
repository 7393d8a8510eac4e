// src/types/mod.rs
pub mod claims;
pub mod expiry;
pub mod output;
pub mod role;
pub mod secret;
pub mod token;

pub use claims::{Claims, MercureClaim, ANY_TOPIC};
pub use expiry::Expiry;
pub use output::Output;
pub use role::Role;
pub use secret::Secret;
pub use token::Token;
