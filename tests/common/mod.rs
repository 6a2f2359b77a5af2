//! Shared test utilities for integration tests.
//! Included by each integration test file via `mod common;`.
#![allow(dead_code)]

pub mod fixtures;
pub mod mock;
