//! Shared fixture for the route integration tests

use actix_web::web;
use std::sync::Arc;

use kas_api::routes::AppState;
use kas_core::repositories::ledger::MockLedgerRepository;
use kas_core::repositories::otp::MockOtpRepository;
use kas_core::services::auth::{AuthService, InMemoryRateLimiter, MockIdentityProvider};
use kas_core::services::otp::{MockMailer, OtpService, OtpServiceConfig};
use kas_shared::config::RateLimitConfig;

pub type TestState = AppState<
    MockOtpRepository,
    MockMailer,
    MockIdentityProvider,
    InMemoryRateLimiter,
    MockLedgerRepository,
>;

pub const ADMIN_EMAIL: &str = "bendahara@example.com";

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub mailer: Arc<MockMailer>,
    pub identity: Arc<MockIdentityProvider>,
    pub ledger: Arc<MockLedgerRepository>,
}

pub fn test_context() -> TestContext {
    test_context_with(MockIdentityProvider::new())
}

pub fn test_context_with(identity: MockIdentityProvider) -> TestContext {
    let otp_repository = Arc::new(MockOtpRepository::new());
    let mailer = Arc::new(MockMailer::new());
    let identity = Arc::new(identity);
    let ledger = Arc::new(MockLedgerRepository::new());

    let otp_service = Arc::new(OtpService::new(
        otp_repository,
        mailer.clone(),
        OtpServiceConfig::default(),
    ));
    let rate_limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig::default()));
    let auth_service = Arc::new(AuthService::new(
        otp_service,
        identity.clone(),
        rate_limiter,
    ));

    let state = web::Data::new(AppState {
        auth_service,
        identity: identity.clone(),
        ledger: ledger.clone(),
        mailer: mailer.clone(),
        admin_email: ADMIN_EMAIL.to_string(),
    });

    TestContext {
        state,
        mailer,
        identity,
        ledger,
    }
}
