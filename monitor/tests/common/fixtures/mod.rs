//! This module provides reusable test utilities:
//! - Mock GraphQL status server
//! - Scripted status source and recording container runtime
//! - Test configuration builder
//! - Common test data

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fake_runtime;
pub mod mock_status;
pub mod scripted_source;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use fake_runtime::RecordingRuntime;
pub use mock_status::MockStatusServer;
pub use scripted_source::ScriptedStatusSource;
pub use test_config::TestConfigBuilder;
pub use test_data::*;
