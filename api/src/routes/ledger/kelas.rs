use actix_web::{web, HttpRequest, HttpResponse};

use crate::handlers::error::to_http_response;
use crate::routes::AppState;

use kas_core::repositories::ledger::LedgerRepository;
use kas_core::repositories::otp::OtpRepository;
use kas_core::services::auth::{IdentityProvider, RateLimiterTrait};
use kas_core::services::otp::Mailer;

/// Handler for GET /kelas: class list ordered by name
pub async fn list<O, M, I, R, L>(
    req: HttpRequest,
    state: web::Data<AppState<O, M, I, R, L>>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    M: Mailer + 'static,
    I: IdentityProvider + 'static,
    R: RateLimiterTrait + 'static,
    L: LedgerRepository + 'static,
{
    match state.ledger.list_kelas().await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(error) => to_http_response(&error, &req),
    }
}
