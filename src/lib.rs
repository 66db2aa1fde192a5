//! Limitless - Sliding-Window Rate Limiting
//!
//! This crate implements a sliding-window call-rate limiter: given a maximum
//! number of admissions within a rolling time window, it suspends excess
//! callers until the oldest recorded call ages out of the window. Per-key
//! window state lives behind a pluggable storage backend; an in-memory
//! backend ships with the crate, and any store implementing the same
//! three-operation contract can be substituted.

pub mod config;
pub mod error;
pub mod ratelimit;
pub mod storage;

pub use config::LimiterConfig;
pub use error::{LimitlessError, Result};
pub use ratelimit::RateLimiter;
pub use storage::{InMemoryStorage, StorageBackend};
