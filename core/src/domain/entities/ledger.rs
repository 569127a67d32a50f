//! Ledger entities mirrored from the managed store's tables.
//!
//! These are pass-through rows: the gateway validates required fields
//! and forwards them; the store owns ids, timestamps, and ordering.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A class (`kelas` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kelas {
    pub id: Uuid,
    pub nama_kelas: String,
}

/// An income entry (`pemasukan` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pemasukan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kelas_id: Uuid,
    pub nominal: i64,
    /// Payment date; the store fills in today when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// An expense entry (`pengeluaran` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pengeluaran {
    pub id: Uuid,
    pub kelas_id: Uuid,
    pub alasan: String,
    pub nominal: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Status of an admin-access request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Parse a client-supplied status string; unknown values are rejected
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A pending/settled admin-access request (`admin_requests` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRequest {
    pub request_id: Uuid,
    pub user_id: Uuid,
    pub kelas_id: Uuid,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_parse() {
        assert_eq!(RequestStatus::parse("approved"), Some(RequestStatus::Approved));
        assert_eq!(RequestStatus::parse("rejected"), Some(RequestStatus::Rejected));
        assert_eq!(RequestStatus::parse("pending"), Some(RequestStatus::Pending));
        assert_eq!(RequestStatus::parse("bogus"), None);
    }

    #[test]
    fn test_request_status_serializes_lowercase() {
        let json = serde_json::to_string(&RequestStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
