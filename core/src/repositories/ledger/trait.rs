//! Ledger repository trait for the pass-through CRUD tables.
//!
//! Every operation maps one-to-one onto a store call; the gateway adds
//! nothing beyond required-field validation upstream of these methods.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::ledger::{AdminRequest, Kelas, Pemasukan, Pengeluaran, RequestStatus};
use crate::errors::DomainError;

/// Fields for a new income entry
#[derive(Debug, Clone)]
pub struct NewPemasukan {
    pub user_id: Uuid,
    pub kelas_id: Uuid,
    pub nominal: i64,
    pub tanggal: Option<NaiveDate>,
}

/// Fields for a new expense entry
#[derive(Debug, Clone)]
pub struct NewPengeluaran {
    pub kelas_id: Uuid,
    pub alasan: String,
    pub nominal: i64,
    pub tanggal: Option<NaiveDate>,
}

/// Fields for a new admin-access request (always created pending)
#[derive(Debug, Clone)]
pub struct NewAdminRequest {
    pub user_id: Uuid,
    pub kelas_id: Uuid,
}

/// Repository trait for ledger table operations
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// List all classes ordered by name
    async fn list_kelas(&self) -> Result<Vec<Kelas>, DomainError>;

    /// Insert an income entry and return the stored row
    async fn insert_pemasukan(&self, entry: NewPemasukan) -> Result<Pemasukan, DomainError>;

    /// List income entries, newest first, optionally filtered by class
    async fn list_pemasukan(&self, kelas_id: Option<Uuid>) -> Result<Vec<Pemasukan>, DomainError>;

    /// Insert an expense entry and return the stored row
    async fn insert_pengeluaran(&self, entry: NewPengeluaran) -> Result<Pengeluaran, DomainError>;

    /// List expense entries, newest first, optionally filtered by class
    async fn list_pengeluaran(
        &self,
        kelas_id: Option<Uuid>,
    ) -> Result<Vec<Pengeluaran>, DomainError>;

    /// Create a pending admin-access request
    async fn create_admin_request(
        &self,
        request: NewAdminRequest,
    ) -> Result<AdminRequest, DomainError>;

    /// List admin-access requests, newest first
    async fn list_admin_requests(&self) -> Result<Vec<AdminRequest>, DomainError>;

    /// Update a request's status and return the updated row
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No request with that id
    async fn update_admin_request_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<AdminRequest, DomainError>;
}
