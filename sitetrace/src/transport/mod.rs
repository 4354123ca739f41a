//! Page fetching through proxy profiles.

#[cfg(feature = "http")]
mod http;
mod protocols;

#[cfg(feature = "http")]
pub use http::HttpFetcher;
pub use protocols::{FetchResult, Fetcher, ProxyProfile};

#[cfg(test)]
pub use protocols::MockFetcher;
