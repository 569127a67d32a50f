use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::dto::ledger::{CreateAdminRequestRequest, UpdateAdminRequestRequest};
use crate::handlers::error::to_http_response;
use crate::routes::AppState;

use kas_core::domain::entities::RequestStatus;
use kas_core::errors::DomainError;
use kas_core::repositories::ledger::{LedgerRepository, NewAdminRequest};
use kas_core::repositories::otp::OtpRepository;
use kas_core::services::auth::{IdentityProvider, RateLimiterTrait};
use kas_core::services::otp::Mailer;

/// Handler for POST /admin-requests: file a pending admin-access request
///
/// The admin notification mail is fire-and-forget: the request row is
/// already stored, so a mail outage must not fail the call.
pub async fn create<O, M, I, R, L>(
    req: HttpRequest,
    state: web::Data<AppState<O, M, I, R, L>>,
    request: web::Json<CreateAdminRequestRequest>,
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
    let (Some(user_id), Some(kelas_id)) = (request.user_id, request.kelas_id) else {
        return to_http_response(&DomainError::missing_fields(&missing), &req);
    };

    let created = state
        .ledger
        .create_admin_request(NewAdminRequest { user_id, kelas_id })
        .await;

    match created {
        Ok(row) => {
            if !state.admin_email.is_empty() {
                state
                    .mailer
                    .send_silent(
                        &state.admin_email,
                        "Permintaan akses admin baru",
                        &notification_body(user_id, kelas_id),
                    )
                    .await;
            }
            HttpResponse::Ok().json(row)
        }
        Err(error) => to_http_response(&error, &req),
    }
}

/// Handler for GET /admin-requests: all requests, newest first
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
    match state.ledger.list_admin_requests().await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(error) => to_http_response(&error, &req),
    }
}

/// Handler for PUT /admin-requests/{request_id}: settle a request
///
/// Approval also promotes the requester's profile role to "admin".
pub async fn update<O, M, I, R, L>(
    req: HttpRequest,
    state: web::Data<AppState<O, M, I, R, L>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateAdminRequestRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    M: Mailer + 'static,
    I: IdentityProvider + 'static,
    R: RateLimiterTrait + 'static,
    L: LedgerRepository + 'static,
{
    let Some(status) = RequestStatus::parse(&request.status) else {
        return to_http_response(
            &DomainError::Validation {
                message: "status tidak valid".to_string(),
            },
            &req,
        );
    };

    let updated = state
        .ledger
        .update_admin_request_status(path.into_inner(), status)
        .await;

    match updated {
        Ok(row) => {
            if status == RequestStatus::Approved {
                if let Err(error) = state.identity.set_profile_role(row.user_id, "admin").await {
                    return to_http_response(&error, &req);
                }
            }
            HttpResponse::Ok().json(row)
        }
        Err(error) => to_http_response(&error, &req),
    }
}

fn notification_body(user_id: Uuid, kelas_id: Uuid) -> String {
    format!(
        "<p>Ada permintaan akses admin baru.</p>\
         <p>User: <b>{}</b><br/>Kelas: <b>{}</b></p>\
         <p>Buka dashboard untuk menyetujui atau menolak.</p>",
        user_id, kelas_id
    )
}
