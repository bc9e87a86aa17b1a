//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// HTTP image downloads.
pub mod image;
/// Outgoing message sinks.
pub mod sink;
/// Ephemeral staging storage.
pub mod staging;

pub use config::{AppConfig, CliArgs, FetchConfig, LogLevel, StorageManager};
pub use image::{HttpClientError, HttpImageFetcher};
pub use sink::{DirectorySink, StdoutSink};
pub use staging::StagingArea;
