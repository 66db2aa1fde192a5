//! Sliding-window admission logic.

mod limiter;

pub use limiter::RateLimiter;
