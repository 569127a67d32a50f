use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::ledger::{CreatePengeluaranRequest, KelasFilter};
use crate::handlers::error::to_http_response;
use crate::routes::AppState;

use kas_core::errors::DomainError;
use kas_core::repositories::ledger::{LedgerRepository, NewPengeluaran};
use kas_core::repositories::otp::OtpRepository;
use kas_core::services::auth::{IdentityProvider, RateLimiterTrait};
use kas_core::services::otp::Mailer;
use kas_shared::utils::validation::is_present;

/// Handler for POST /pengeluaran: record an expense entry
pub async fn create<O, M, I, R, L>(
    req: HttpRequest,
    state: web::Data<AppState<O, M, I, R, L>>,
    request: web::Json<CreatePengeluaranRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    M: Mailer + 'static,
    I: IdentityProvider + 'static,
    R: RateLimiterTrait + 'static,
    L: LedgerRepository + 'static,
{
    let mut missing = Vec::new();
    if request.kelas_id.is_none() {
        missing.push("kelas_id");
    }
    if request.alasan.as_deref().map_or(true, |a| !is_present(a)) {
        missing.push("alasan");
    }
    if request.nominal.is_none() {
        missing.push("nominal");
    }
    let entry = match (request.kelas_id, request.alasan.clone(), request.nominal) {
        (Some(kelas_id), Some(alasan), Some(nominal)) if missing.is_empty() => NewPengeluaran {
            kelas_id,
            alasan,
            nominal,
            tanggal: request.tanggal,
        },
        _ => return to_http_response(&DomainError::missing_fields(&missing), &req),
    };
    match state.ledger.insert_pengeluaran(entry).await {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(error) => to_http_response(&error, &req),
    }
}

/// Handler for GET /pengeluaran?kelas_id=: expense entries, newest first
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
    match state.ledger.list_pengeluaran(filter.kelas_id).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(error) => to_http_response(&error, &req),
    }
}
