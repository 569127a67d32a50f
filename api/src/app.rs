//! Application factory
//!
//! Builds the route table over a generic `AppState` so integration
//! tests can swap the store, mailer and identity provider for mocks.

use actix_web::{web, App, HttpResponse};

use crate::routes::{self, AppState};

use kas_core::repositories::ledger::LedgerRepository;
use kas_core::repositories::otp::OtpRepository;
use kas_core::services::auth::{IdentityProvider, RateLimiterTrait};
use kas_core::services::otp::Mailer;
use kas_shared::errors::{error_codes, ErrorResponse};

/// Create the application with all routes wired to the given state
pub fn create_app<O, M, I, R, L>(
    app_state: web::Data<AppState<O, M, I, R, L>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    O: OtpRepository + 'static,
    M: Mailer + 'static,
    I: IdentityProvider + 'static,
    R: RateLimiterTrait + 'static,
    L: LedgerRepository + 'static,
{
    App::new()
        .app_data(app_state)
        .route("/", web::get().to(routes::service_info))
        .service(
            web::scope("/auth")
                .route(
                    "/request-otp",
                    web::post().to(routes::auth::request_otp::request_otp::<O, M, I, R, L>),
                )
                .route(
                    "/verify-otp",
                    web::post().to(routes::auth::verify_otp::verify_otp::<O, M, I, R, L>),
                ),
        )
        .route(
            "/kelas",
            web::get().to(routes::ledger::kelas::list::<O, M, I, R, L>),
        )
        .route(
            "/pemasukan",
            web::post().to(routes::ledger::pemasukan::create::<O, M, I, R, L>),
        )
        .route(
            "/pemasukan",
            web::get().to(routes::ledger::pemasukan::list::<O, M, I, R, L>),
        )
        .route(
            "/pengeluaran",
            web::post().to(routes::ledger::pengeluaran::create::<O, M, I, R, L>),
        )
        .route(
            "/pengeluaran",
            web::get().to(routes::ledger::pengeluaran::list::<O, M, I, R, L>),
        )
        .route(
            "/admin-requests",
            web::post().to(routes::ledger::admin_requests::create::<O, M, I, R, L>),
        )
        .route(
            "/admin-requests",
            web::get().to(routes::ledger::admin_requests::list::<O, M, I, R, L>),
        )
        .route(
            "/admin-requests/{request_id}",
            web::put().to(routes::ledger::admin_requests::update::<O, M, I, R, L>),
        )
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                "Resource tidak ditemukan",
            ))
        }))
}
