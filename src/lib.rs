//! Movielst - index a directory of movie files and report on their metadata
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod metadata;
pub mod report;
pub mod scanner;
pub mod store;
