//! Data transfer objects for the application layer.

mod process_dto;

pub use process_dto::{ProcessOutcome, ProcessReport};
