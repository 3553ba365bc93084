//! Remote asset acquisition: HTTP downloads and git checkouts.

pub mod git;
pub mod http;

pub use git::{FetchKind, GitFetcher};
pub use http::HttpFetcher;
