use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{RequestOtpRequest, RequestOtpResponse};
use crate::handlers::error::{extract_client_ip, to_http_response};
use crate::routes::AppState;

use kas_core::errors::DomainError;

use kas_core::repositories::ledger::LedgerRepository;
use kas_core::repositories::otp::OtpRepository;
use kas_core::services::auth::{IdentityProvider, RateLimiterTrait};
use kas_core::services::otp::Mailer;

/// Handler for POST /auth/request-otp
///
/// # Request Body
///
/// ```json
/// { "email": "budi@example.com" }
/// ```
///
/// # Responses
/// - 200 `{"message": "OTP terkirim"}`
/// - 400 missing email
/// - 429 more than 3 requests in 5 minutes from one client
/// - 500 store or mail failure
pub async fn request_otp<O, M, I, R, L>(
    req: HttpRequest,
    state: web::Data<AppState<O, M, I, R, L>>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    M: Mailer + 'static,
    I: IdentityProvider + 'static,
    R: RateLimiterTrait + 'static,
    L: LedgerRepository + 'static,
{
    if request.0.validate().is_err() {
        return to_http_response(&DomainError::missing_fields(&["email"]), &req);
    }

    let client_ip = extract_client_ip(&req);

    log::info!("Processing request-otp, ip: {}", client_ip);

    match state.auth_service.request_otp(&request.email, &client_ip).await {
        Ok(()) => HttpResponse::Ok().json(RequestOtpResponse {
            message: "OTP terkirim".to_string(),
        }),
        Err(error) => to_http_response(&error, &req),
    }
}
