//! Outgoing message sinks.

pub mod directory_sink;
pub mod stdout_sink;

pub use directory_sink::{DirectorySink, TRANSCRIPT_FILE_NAME, TranscriptEntry};
pub use stdout_sink::StdoutSink;
