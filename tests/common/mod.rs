//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_phases;
pub mod test_helpers;
