//! Ledger repository backed by the store's class and cash-flow tables

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use kas_core::domain::entities::{AdminRequest, Kelas, Pemasukan, Pengeluaran, RequestStatus};
use kas_core::errors::DomainError;
use kas_core::repositories::ledger::{
    LedgerRepository, NewAdminRequest, NewPemasukan, NewPengeluaran,
};

use super::client::StoreClient;

pub struct SupabaseLedgerRepository {
    client: Arc<StoreClient>,
}

impl SupabaseLedgerRepository {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }

    fn listing_query(kelas_id: Option<Uuid>) -> Vec<(&'static str, String)> {
        let mut query = vec![("order", "created_at.desc".to_string())];
        if let Some(id) = kelas_id {
            query.push(("kelas_id", format!("eq.{}", id)));
        }
        query
    }
}

#[async_trait]
impl LedgerRepository for SupabaseLedgerRepository {
    async fn list_kelas(&self) -> Result<Vec<Kelas>, DomainError> {
        let request = self
            .client
            .table(Method::GET, "kelas")
            .query(&[("order", "nama_kelas.asc")]);
        self.client.rows(request, "kelas listing").await
    }

    async fn insert_pemasukan(&self, entry: NewPemasukan) -> Result<Pemasukan, DomainError> {
        let mut body = json!({
            "user_id": entry.user_id,
            "kelas_id": entry.kelas_id,
            "nominal": entry.nominal,
        });
        if let Some(tanggal) = entry.tanggal {
            body["tanggal"] = json!(tanggal);
        }

        let request = self
            .client
            .table(Method::POST, "pemasukan")
            .header("Prefer", "return=representation")
            .json(&body);

        first_row(
            self.client.rows(request, "pemasukan insert").await?,
            "pemasukan",
        )
    }

    async fn list_pemasukan(&self, kelas_id: Option<Uuid>) -> Result<Vec<Pemasukan>, DomainError> {
        let request = self
            .client
            .table(Method::GET, "pemasukan")
            .query(&Self::listing_query(kelas_id));
        self.client.rows(request, "pemasukan listing").await
    }

    async fn insert_pengeluaran(&self, entry: NewPengeluaran) -> Result<Pengeluaran, DomainError> {
        let mut body = json!({
            "kelas_id": entry.kelas_id,
            "alasan": entry.alasan,
            "nominal": entry.nominal,
        });
        if let Some(tanggal) = entry.tanggal {
            body["tanggal"] = json!(tanggal);
        }

        let request = self
            .client
            .table(Method::POST, "pengeluaran")
            .header("Prefer", "return=representation")
            .json(&body);

        first_row(
            self.client.rows(request, "pengeluaran insert").await?,
            "pengeluaran",
        )
    }

    async fn list_pengeluaran(
        &self,
        kelas_id: Option<Uuid>,
    ) -> Result<Vec<Pengeluaran>, DomainError> {
        let request = self
            .client
            .table(Method::GET, "pengeluaran")
            .query(&Self::listing_query(kelas_id));
        self.client.rows(request, "pengeluaran listing").await
    }

    async fn create_admin_request(
        &self,
        request: NewAdminRequest,
    ) -> Result<AdminRequest, DomainError> {
        let body = json!({
            "user_id": request.user_id,
            "kelas_id": request.kelas_id,
            "status": RequestStatus::Pending.as_str(),
        });

        let request = self
            .client
            .table(Method::POST, "admin_requests")
            .header("Prefer", "return=representation")
            .json(&body);

        first_row(
            self.client.rows(request, "admin request insert").await?,
            "admin_requests",
        )
    }

    async fn list_admin_requests(&self) -> Result<Vec<AdminRequest>, DomainError> {
        let request = self
            .client
            .table(Method::GET, "admin_requests")
            .query(&[("order", "created_at.desc")]);
        self.client.rows(request, "admin request listing").await
    }

    async fn update_admin_request_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<AdminRequest, DomainError> {
        let request = self
            .client
            .table(Method::PATCH, "admin_requests")
            .query(&[("request_id", format!("eq.{}", request_id))])
            .header("Prefer", "return=representation")
            .json(&json!({ "status": status.as_str() }));

        let mut rows = self
            .client
            .rows::<AdminRequest>(request, "admin request update")
            .await?;
        let row = rows.drain(..).next().ok_or(DomainError::NotFound {
            resource: "admin_requests".to_string(),
        });
        row
    }
}

fn first_row<T>(mut rows: Vec<T>, resource: &str) -> Result<T, DomainError> {
    rows.drain(..).next().ok_or_else(|| DomainError::Internal {
        message: format!("{} insert returned no row", resource),
    })
}
