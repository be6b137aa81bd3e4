//! Client for the remote site-management API.
//!
//! Dashboard handlers reach sites, pages and injected head code through the
//! [`SiteApi`] trait, always with the bearer token from the caller's session.
//!
//! - [`HttpSiteApi`] — reqwest implementation
//! - [`MockSiteApi`] — in-memory implementation for tests

pub mod api;
pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use api::{SharedSiteApi, SiteApi};
pub use client::{ClientBuilder, HttpSiteApi};
pub use error::{Result, UpstreamError};
pub use mock::MockSiteApi;
pub use types::*;
