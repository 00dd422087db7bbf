// src/feed/providers/mod.rs
pub mod fixture;

#[cfg(feature = "feed-http")]
pub mod http;
