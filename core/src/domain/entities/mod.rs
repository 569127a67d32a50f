//! Domain entities representing core business objects.

pub mod account;
pub mod ledger;
pub mod otp_record;

// Re-export commonly used types
pub use account::{Account, SessionToken, UserProfile, DEFAULT_ROLE};
pub use ledger::{AdminRequest, Kelas, Pemasukan, Pengeluaran, RequestStatus};
pub use otp_record::{OtpRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
