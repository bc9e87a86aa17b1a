//! Ephemeral staging storage for downloaded images.

pub mod staging_area;

pub use staging_area::{DEFAULT_PREFIX, StagingArea};
