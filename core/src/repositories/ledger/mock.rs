//! Mock implementation of LedgerRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::ledger::{
    AdminRequest, Kelas, Pemasukan, Pengeluaran, RequestStatus,
};
use crate::errors::DomainError;

use super::trait_::{LedgerRepository, NewAdminRequest, NewPemasukan, NewPengeluaran};

/// In-memory ledger repository for tests
#[derive(Default)]
pub struct MockLedgerRepository {
    kelas: Arc<RwLock<Vec<Kelas>>>,
    pemasukan: Arc<RwLock<Vec<Pemasukan>>>,
    pengeluaran: Arc<RwLock<Vec<Pengeluaran>>>,
    admin_requests: Arc<RwLock<Vec<AdminRequest>>>,
}

impl MockLedgerRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a class row (test helper)
    pub async fn put_kelas(&self, kelas: Kelas) {
        self.kelas.write().await.push(kelas);
    }
}

#[async_trait]
impl LedgerRepository for MockLedgerRepository {
    async fn list_kelas(&self) -> Result<Vec<Kelas>, DomainError> {
        let mut rows = self.kelas.read().await.clone();
        rows.sort_by(|a, b| a.nama_kelas.cmp(&b.nama_kelas));
        Ok(rows)
    }

    async fn insert_pemasukan(&self, entry: NewPemasukan) -> Result<Pemasukan, DomainError> {
        let row = Pemasukan {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            kelas_id: entry.kelas_id,
            nominal: entry.nominal,
            tanggal: entry.tanggal,
            created_at: Utc::now(),
        };
        self.pemasukan.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_pemasukan(&self, kelas_id: Option<Uuid>) -> Result<Vec<Pemasukan>, DomainError> {
        let mut rows: Vec<_> = self
            .pemasukan
            .read()
            .await
            .iter()
            .filter(|r| kelas_id.map_or(true, |id| r.kelas_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_pengeluaran(&self, entry: NewPengeluaran) -> Result<Pengeluaran, DomainError> {
        let row = Pengeluaran {
            id: Uuid::new_v4(),
            kelas_id: entry.kelas_id,
            alasan: entry.alasan,
            nominal: entry.nominal,
            tanggal: entry.tanggal,
            created_at: Utc::now(),
        };
        self.pengeluaran.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_pengeluaran(
        &self,
        kelas_id: Option<Uuid>,
    ) -> Result<Vec<Pengeluaran>, DomainError> {
        let mut rows: Vec<_> = self
            .pengeluaran
            .read()
            .await
            .iter()
            .filter(|r| kelas_id.map_or(true, |id| r.kelas_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_admin_request(
        &self,
        request: NewAdminRequest,
    ) -> Result<AdminRequest, DomainError> {
        let row = AdminRequest {
            request_id: Uuid::new_v4(),
            user_id: request.user_id,
            kelas_id: request.kelas_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };
        self.admin_requests.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_admin_requests(&self) -> Result<Vec<AdminRequest>, DomainError> {
        let mut rows = self.admin_requests.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_admin_request_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<AdminRequest, DomainError> {
        let mut rows = self.admin_requests.write().await;
        match rows.iter_mut().find(|r| r.request_id == request_id) {
            Some(row) => {
                row.status = status;
                Ok(row.clone())
            }
            None => Err(DomainError::NotFound {
                resource: "admin_request".to_string(),
            }),
        }
    }
}
