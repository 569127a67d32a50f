//! Shared request handling helpers

pub mod error;
