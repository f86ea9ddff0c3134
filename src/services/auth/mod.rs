pub mod access_jwt;
pub mod claims;
pub mod error;
pub mod factory;
pub mod secret;

pub use access_jwt::{AuthService, VerifiedToken};
pub use claims::{ClaimSet, Identity};
pub use error::AuthError;
pub use factory::build_auth_service;
