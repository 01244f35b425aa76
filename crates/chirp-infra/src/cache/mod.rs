//! Cache backends. Chirp keeps revoked session ids here until the
//! corresponding tokens would have expired anyway.

mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use memory::InMemoryCache;

#[cfg(feature = "redis")]
pub use redis::{RedisCache, RedisConfig};
