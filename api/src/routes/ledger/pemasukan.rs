use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::ledger::{CreatePemasukanRequest, KelasFilter};
use crate::handlers::error::to_http_response;
use crate::routes::AppState;

use kas_core::errors::DomainError;
use kas_core::repositories::ledger::{LedgerRepository, NewPemasukan};
use kas_core::repositories::otp::OtpRepository;
use kas_core::services::auth::{IdentityProvider, RateLimiterTrait};
use kas_core::services::otp::Mailer;

/// Handler for POST /pemasukan: record an income entry
pub async fn create<O, M, I, R, L>(
    req: HttpRequest,
    state: web::Data<AppState<O, M, I, R, L>>,
    request: web::Json<CreatePemasukanRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    M: Mailer + 'static,
    I: IdentityProvider + 'static,
    R: RateLimiterTrait + 'static,
    L: LedgerRepository + 'static,
{
    let mut missing = Vec::new();
    if request.user_id.is_none() {
        missing.push("user_id");
    }
    if request.kelas_id.is_none() {
        missing.push("kelas_id");
    }
    if request.nominal.is_none() {
        missing.push("nominal");
    }
    let (Some(user_id), Some(kelas_id), Some(nominal)) =
        (request.user_id, request.kelas_id, request.nominal)
    else {
        return to_http_response(&DomainError::missing_fields(&missing), &req);
    };

    let entry = NewPemasukan {
        user_id,
        kelas_id,
        nominal,
        tanggal: request.tanggal,
    };
    match state.ledger.insert_pemasukan(entry).await {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(error) => to_http_response(&error, &req),
    }
}

/// Handler for GET /pemasukan?kelas_id=: income entries, newest first
pub async fn list<O, M, I, R, L>(
    req: HttpRequest,
    state: web::Data<AppState<O, M, I, R, L>>,
    filter: web::Query<KelasFilter>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    M: Mailer + 'static,
    I: IdentityProvider + 'static,
    R: RateLimiterTrait + 'static,
    L: LedgerRepository + 'static,
{
    match state.ledger.list_pemasukan(filter.kelas_id).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(error) => to_http_response(&error, &req),
    }
}
