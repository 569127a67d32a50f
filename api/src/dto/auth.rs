use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use kas_core::domain::entities::Account;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestOtpRequest {
    /// Recipient address; presence is the only gateway-side check
    #[validate(length(min = 1, message = "email wajib"))]
    #[serde(default)]
    pub email: String,
}

/// Verification payload; register when `password` and `full_name` are
/// both present, login when both are absent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub otp_code: String,

    pub password: Option<String>,
    pub full_name: Option<String>,
    pub kelas_id: Option<Uuid>,
    pub absen: Option<i32>,
}

impl VerifyOtpRequest {
    pub fn is_registration(&self) -> bool {
        self.password.is_some() || self.full_name.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOtpResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub user: Account,
}
