//! Mail delivery implementations

mod smtp;

pub use smtp::SmtpMailer;
