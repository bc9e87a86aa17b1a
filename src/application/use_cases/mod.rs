//! Use case implementations.

mod process_message_use_case;
mod self_test_use_case;

pub use process_message_use_case::ProcessMessageUseCase;
pub use self_test_use_case::{SELF_TEST_ANNOUNCEMENT, SELF_TEST_MESSAGE, SelfTestUseCase};
