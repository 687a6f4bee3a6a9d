//! Cache module for storing upstream responses to disk
//!
//! This module provides the cache manager that persists API responses to the
//! filesystem with configurable TTL (time-to-live) values, and the generic
//! `fetch_cached` helper that every data client funnels its fetches through:
//! cache hit, or one producer invocation followed by one cache write.

mod fetch;
mod manager;

pub use fetch::{fetch_cached, FetchError};
pub use manager::{CacheManager, CachedData};
