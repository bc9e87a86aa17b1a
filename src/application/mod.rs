//! Application layer with text services and use cases.

/// Data transfer objects.
pub mod dto;
/// Pure text services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{ProcessOutcome, ProcessReport};
pub use services::{ReferenceExtractor, TextRewriter};
pub use use_cases::{ProcessMessageUseCase, SelfTestUseCase};
