use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePemasukanRequest {
    pub user_id: Option<Uuid>,
    pub kelas_id: Option<Uuid>,
    pub nominal: Option<i64>,
    pub tanggal: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePengeluaranRequest {
    pub kelas_id: Option<Uuid>,
    pub alasan: Option<String>,
    pub nominal: Option<i64>,
    pub tanggal: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminRequestRequest {
    pub user_id: Option<Uuid>,
    pub kelas_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdminRequestRequest {
    #[serde(default)]
    pub status: String,
}

/// `?kelas_id=` filter shared by the listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct KelasFilter {
    pub kelas_id: Option<Uuid>,
}
