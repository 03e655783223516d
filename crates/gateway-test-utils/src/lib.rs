//! Test utilities for gateway integration tests.

pub mod server_harness;

pub use server_harness::{TestGateway, TEST_API_KEY, TEST_API_SECRET};
