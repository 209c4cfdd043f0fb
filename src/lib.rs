//! Library entry for langslide exposing the data pipeline for integration tests.

pub mod config;
pub mod lang;
pub mod slide;
pub mod wiki;
