//! Diagnostic self-test use case.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::OutgoingMessage;
use crate::domain::errors::EmitError;
use crate::domain::ports::MessageSinkPort;

/// Announcement sent before the example message.
pub const SELF_TEST_ANNOUNCEMENT: &str = "发送测试消息...";

/// Example message with a heading and one inline image.
pub const SELF_TEST_MESSAGE: &str = "### 测试图片\n![](https://fastgpt.hz.flexiblecircuit.cn/api/common/file/read/685b6e7fe92629b53a08d36b-1761093814000.svg?token=test)";

/// Emits a fixed example message so the relay can be exercised end to end.
#[derive(Clone)]
pub struct SelfTestUseCase {
    sink: Arc<dyn MessageSinkPort>,
}

impl SelfTestUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(sink: Arc<dyn MessageSinkPort>) -> Self {
        Self { sink }
    }

    /// Sends the announcement followed by the example message.
    ///
    /// # Errors
    /// Returns the first error reported by the sink.
    pub async fn execute(&self) -> Result<(), EmitError> {
        info!("Sending self-test message");

        for text in [SELF_TEST_ANNOUNCEMENT, SELF_TEST_MESSAGE] {
            self.sink
                .send(OutgoingMessage::text(text))
                .await
                .inspect_err(|e| warn!(error = %e, "Self-test message rejected"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ReferenceExtractor;
    use crate::domain::ports::mocks::MockMessageSink;

    #[tokio::test]
    async fn test_sends_announcement_then_example() {
        let sink = Arc::new(MockMessageSink::new());
        let use_case = SelfTestUseCase::new(sink.clone());

        use_case.execute().await.unwrap();

        assert_eq!(sink.texts(), vec![SELF_TEST_ANNOUNCEMENT, SELF_TEST_MESSAGE]);
    }

    #[test]
    fn test_example_contains_one_image() {
        let refs = ReferenceExtractor::extract(SELF_TEST_MESSAGE);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].file_extension(), ".svg");
    }

    #[tokio::test]
    async fn test_stops_on_rejection() {
        let sink = Arc::new(MockMessageSink::new().rejecting_call(0));
        let use_case = SelfTestUseCase::new(sink.clone());

        tokio_test::assert_err!(use_case.execute().await);
        assert_eq!(sink.sent().len(), 1);
    }
}
