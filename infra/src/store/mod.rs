//! Managed store implementations
//!
//! The store is a Supabase project reached over HTTP with the
//! service-role key: PostgREST for table rows, GoTrue admin for
//! accounts and sessions.

mod client;
mod identity_provider;
mod ledger_repository;
mod otp_repository;

pub use client::StoreClient;
pub use identity_provider::SupabaseIdentityProvider;
pub use ledger_repository::SupabaseLedgerRepository;
pub use otp_repository::SupabaseOtpRepository;
