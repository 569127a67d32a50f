//! Repository interfaces for the managed store, plus in-memory mocks.

pub mod ledger;
pub mod otp;

pub use ledger::{LedgerRepository, MockLedgerRepository, NewAdminRequest, NewPemasukan, NewPengeluaran};
pub use otp::{MarkUsedOutcome, MockOtpRepository, OtpRepository};
