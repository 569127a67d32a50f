//! Pass-through CRUD route handlers for the store's ledger tables
//!
//! The gateway validates required fields and forwards; ids, dates and
//! ordering are the store's business.

pub mod admin_requests;
pub mod kelas;
pub mod pemasukan;
pub mod pengeluaran;
