//! Image download infrastructure.

pub mod fetcher;

pub use fetcher::{HttpClientError, HttpImageFetcher};
