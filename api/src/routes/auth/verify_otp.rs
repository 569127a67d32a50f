use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::{LoginResponse, RegisterResponse, VerifyOtpRequest};
use crate::handlers::error::to_http_response;
use crate::routes::AppState;

use kas_core::repositories::ledger::LedgerRepository;
use kas_core::repositories::otp::OtpRepository;
use kas_core::services::auth::{
    IdentityProvider, RateLimiterTrait, RegistrationFields, VerifyOtpOutcome,
};
use kas_core::services::otp::Mailer;

/// Handler for POST /auth/verify-otp
///
/// With `password` and `full_name` the call registers a new account;
/// without them it logs an existing one in. Either way the code is
/// consumed on success and cannot be replayed.
///
/// # Responses
/// - 200 registration: `{"message": "register ok", "user_id": "..."}`
/// - 200 login: `{"message": "login ok", "access_token": "...", "user": {...}}`
/// - 400 invalid, expired, or already-used code; missing fields
/// - 500 downstream failure after the code was consumed
pub async fn verify_otp<O, M, I, R, L>(
    req: HttpRequest,
    state: web::Data<AppState<O, M, I, R, L>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    M: Mailer + 'static,
    I: IdentityProvider + 'static,
    R: RateLimiterTrait + 'static,
    L: LedgerRepository + 'static,
{
    let registration = if request.is_registration() {
        Some(RegistrationFields {
            password: request.password.clone(),
            full_name: request.full_name.clone(),
            kelas_id: request.kelas_id,
            absen: request.absen,
        })
    } else {
        None
    };

    let result = state
        .auth_service
        .verify_otp(&request.email, &request.otp_code, registration)
        .await;

    match result {
        Ok(VerifyOtpOutcome::Registered { user_id }) => HttpResponse::Ok().json(RegisterResponse {
            message: "register ok".to_string(),
            user_id,
        }),
        Ok(VerifyOtpOutcome::LoggedIn { session, account }) => {
            HttpResponse::Ok().json(LoginResponse {
                message: "login ok".to_string(),
                access_token: session.access_token,
                user: account,
            })
        }
        Err(error) => to_http_response(&error, &req),
    }
}
