//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;
pub mod recorder;

#[allow(unused_imports)]
pub use fixtures::{
    answer_text, callback_json, message_json, test_config, texts, TestEnvironment, ADMIN_ID, TOKEN,
};
#[allow(unused_imports)]
pub use recorder::RecordingApi;
