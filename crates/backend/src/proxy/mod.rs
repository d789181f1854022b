//! Reverse proxy to the internal quoting API
//!
//! Everything under the configured prefix is validated and forwarded to
//! `internal_base_url`; the browser never talks to the internal service
//! directly.

pub mod error;
pub mod forwarder;
pub mod headers;
pub mod path_guard;

pub use error::ProxyError;
pub use forwarder::{forward, ProxyState};
