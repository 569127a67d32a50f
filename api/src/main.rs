use actix_web::{middleware::Logger, web, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::io;
use std::sync::Arc;

mod app;
mod dto;
mod handlers;
mod middleware;
mod routes;

use kas_core::services::auth::{AuthService, InMemoryRateLimiter};
use kas_core::services::otp::{OtpService, OtpServiceConfig};
use kas_infra::mail::SmtpMailer;
use kas_infra::store::{
    StoreClient, SupabaseIdentityProvider, SupabaseLedgerRepository, SupabaseOtpRepository,
};
use kas_shared::config::{MailConfig, RateLimitConfig, ServerConfig, StoreConfig};

use crate::middleware::{cors::create_cors, rate_limit::GeneralRateLimit};
use crate::routes::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting kas-backend");

    let server_config = ServerConfig::from_env();

    let store_config = StoreConfig::from_env().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must be set",
        )
    })?;
    let mail_config = MailConfig::from_env()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "SMTP_HOST must be set"))?;

    let environment =
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let rate_limit_config = if environment == "production" {
        RateLimitConfig::production()
    } else {
        RateLimitConfig::development()
    };

    let store_client = Arc::new(
        StoreClient::new(store_config)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );
    let mailer = Arc::new(
        SmtpMailer::new(mail_config)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );

    let otp_repository = Arc::new(SupabaseOtpRepository::new(store_client.clone()));
    let identity = Arc::new(SupabaseIdentityProvider::new(store_client.clone()));
    let ledger = Arc::new(SupabaseLedgerRepository::new(store_client.clone()));

    let otp_service = Arc::new(OtpService::new(
        otp_repository,
        mailer.clone(),
        OtpServiceConfig::default(),
    ));
    let rate_limiter = Arc::new(InMemoryRateLimiter::new(rate_limit_config));
    let auth_service = Arc::new(AuthService::new(
        otp_service,
        identity.clone(),
        rate_limiter.clone(),
    ));

    let admin_email = mailer.admin_email().to_string();
    let app_state = web::Data::new(AppState {
        auth_service,
        identity,
        ledger,
        mailer,
        admin_email,
    });

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        app::create_app(app_state.clone())
            .wrap(GeneralRateLimit::new(rate_limiter.clone()))
            .wrap(create_cors())
            .wrap(Logger::default())
    })
    .bind(&bind_address)?
    .run()
    .await
}
