//! Authentication infrastructure: token issuing and password hashing.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;

/// Cache key under which a revoked token's `jti` is stored until expiry.
pub fn revocation_key(jti: &uuid::Uuid) -> String {
    format!("session:revoked:{jti}")
}
