//! Configuration modules for the kas-backend server

pub mod mail;
pub mod rate_limit;
pub mod server;
pub mod store;

pub use mail::MailConfig;
pub use rate_limit::{CategoryLimit, RateLimitConfig};
pub use server::ServerConfig;
pub use store::StoreConfig;
