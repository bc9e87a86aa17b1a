//! Result of the fetch and rewrite stages of one processing cycle.

use super::StagedImage;

/// Rewritten text plus the images that were downloaded for it.
///
/// `images` keeps extraction order and only holds successful fetches, so the
/// count embedded in `text` always equals `images.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    /// Display text with image syntax stripped and the notice appended.
    pub text: String,
    /// Successfully staged images, in extraction order.
    pub images: Vec<StagedImage>,
    /// URLs whose fetch failed, in extraction order.
    pub failed_urls: Vec<String>,
}

impl ProcessingResult {
    /// Returns the number of images available for emission.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.images.len()
    }
}
