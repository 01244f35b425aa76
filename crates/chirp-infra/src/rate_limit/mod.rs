//! Rate limiting - per-client login throttling.

mod memory;

pub use memory::{KeyedRateLimiter, RateLimitConfig};
