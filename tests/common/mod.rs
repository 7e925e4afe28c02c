//! Shared test support for integration tests

pub mod fixtures;
pub mod mock_client;
