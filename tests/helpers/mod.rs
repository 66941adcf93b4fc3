//! Shared fixtures and assertions for the integration tests.

#![allow(dead_code)]

pub mod prototype_fixtures;
pub mod range_assertions;
