//! Route handlers for the gateway's HTTP surface

pub mod auth;
pub mod ledger;

use actix_web::HttpResponse;
use std::sync::Arc;

use kas_core::repositories::ledger::LedgerRepository;
use kas_core::repositories::otp::OtpRepository;
use kas_core::services::auth::{AuthService, IdentityProvider, RateLimiterTrait};
use kas_core::services::otp::Mailer;

/// Application state that holds shared services
pub struct AppState<O, M, I, R, L>
where
    O: OtpRepository,
    M: Mailer,
    I: IdentityProvider,
    R: RateLimiterTrait,
    L: LedgerRepository,
{
    pub auth_service: Arc<AuthService<O, M, I, R>>,
    pub identity: Arc<I>,
    pub ledger: Arc<L>,
    pub mailer: Arc<M>,
    /// Address receiving admin-request notifications
    pub admin_email: String,
}

/// Handler for GET /: service info and liveness probe
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "service": "kas-backend",
        "now": chrono::Utc::now().to_rfc3339(),
    }))
}
