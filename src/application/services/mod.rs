//! Pure text services used by the relay pipeline.

pub mod reference_extractor;
pub mod text_rewriter;

pub use reference_extractor::ReferenceExtractor;
pub use text_rewriter::{DEFAULT_NOTICE_TEMPLATE, TextRewriter};
