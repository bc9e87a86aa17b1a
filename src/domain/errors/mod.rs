//! Domain error types.

mod emit_error;
mod fetch_error;
mod staging_error;

pub use emit_error::EmitError;
pub use fetch_error::FetchError;
pub use staging_error::StagingError;
