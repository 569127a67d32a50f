//! Domain layer containing the gateway's business entities.

pub mod entities;

pub use entities::*;
