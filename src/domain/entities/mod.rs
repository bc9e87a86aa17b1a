//! Domain entity definitions.

mod image_reference;
mod message;
mod processing;
mod staged_image;

pub use image_reference::ImageReference;
pub use message::{InboundMessage, OutgoingMessage};
pub use processing::ProcessingResult;
pub use staged_image::StagedImage;
