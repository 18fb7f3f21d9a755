//! Test helpers module
//!
//! This module provides utilities and helpers for testing the RSVP backend.
//! It includes mock servers, database helpers, and test context setup.

#![allow(dead_code, unused_imports)]

pub mod database_helper;
pub mod fastspring_mock;
pub mod identity_mock;
pub mod test_context;

pub use database_helper::*;
pub use fastspring_mock::*;
pub use identity_mock::*;
pub use test_context::*;
