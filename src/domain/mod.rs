//! Domain layer with core entities, error taxonomy and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{
    ImageReference, InboundMessage, OutgoingMessage, ProcessingResult, StagedImage,
};
pub use errors::{EmitError, FetchError, StagingError};
pub use ports::{ImageFetcherPort, MessageSinkPort};
