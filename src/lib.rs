//! md-image-relay - Markdown image relay for chat transports.
//!
//! This crate detects Markdown inline images in outgoing chat messages,
//! downloads them into an ephemeral staging area and re-emits the message as
//! plain text followed by one image attachment per downloaded image.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing text services and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Host-facing plugin lifecycle.
pub mod plugin;

pub use plugin::{ImageRelayPlugin, PluginError};

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "md-image-relay";
