//! Token issuance/verification and password hashing used by the users feature.

mod jwt;

pub mod model;
pub mod password;

pub use jwt::JwtService;
pub use password::Argon2Hasher;
