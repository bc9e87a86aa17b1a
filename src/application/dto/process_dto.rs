//! Processing cycle DTOs.

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// No image references; the message was left for normal delivery.
    Passthrough,
    /// The message was intercepted and re-emitted.
    Processed(ProcessReport),
}

impl ProcessOutcome {
    /// Returns true if the relay intercepted the message.
    #[must_use]
    pub const fn is_processed(&self) -> bool {
        matches!(self, Self::Processed(_))
    }

    /// Returns the report for intercepted messages.
    #[must_use]
    pub const fn report(&self) -> Option<&ProcessReport> {
        match self {
            Self::Processed(report) => Some(report),
            Self::Passthrough => None,
        }
    }
}

/// Counters collected during one processing cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Text that was emitted in place of the original message.
    pub text: String,
    /// Image references found in the message.
    pub references: usize,
    /// Images fetched and staged.
    pub processed: usize,
    /// URLs that could not be fetched.
    pub failed_urls: Vec<String>,
    /// Whether the sink accepted the text message.
    pub text_emitted: bool,
    /// Image attachments the sink accepted.
    pub images_emitted: usize,
    /// Staged files that could not be removed.
    pub cleanup_failures: usize,
}
