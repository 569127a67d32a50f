//! Tests for the authentication orchestration service

use std::sync::Arc;

use crate::errors::{AuthError, DomainError};
use crate::repositories::otp::MockOtpRepository;
use crate::services::auth::{
    AuthService, InMemoryRateLimiter, MockIdentityProvider, RegistrationFields, VerifyOtpOutcome,
};
use crate::services::otp::{MockMailer, OtpService, OtpServiceConfig};
use kas_shared::config::rate_limit::RateLimitConfig;

type TestAuthService =
    AuthService<MockOtpRepository, MockMailer, MockIdentityProvider, InMemoryRateLimiter>;

struct Fixture {
    auth: TestAuthService,
    mailer: Arc<MockMailer>,
    identity: Arc<MockIdentityProvider>,
}

fn fixture() -> Fixture {
    fixture_with(MockIdentityProvider::new())
}

fn fixture_with(identity: MockIdentityProvider) -> Fixture {
    let repo = Arc::new(MockOtpRepository::new());
    let mailer = Arc::new(MockMailer::new());
    let identity = Arc::new(identity);
    let otp = Arc::new(OtpService::new(
        repo,
        mailer.clone(),
        OtpServiceConfig::default(),
    ));
    let limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig::default()));
    Fixture {
        auth: AuthService::new(otp, identity.clone(), limiter),
        mailer,
        identity,
    }
}

fn registration(password: &str, full_name: &str) -> RegistrationFields {
    RegistrationFields {
        password: Some(password.to_string()),
        full_name: Some(full_name.to_string()),
        kelas_id: None,
        absen: Some(7),
    }
}

#[tokio::test]
async fn test_request_otp_requires_email() {
    let f = fixture();

    let result = f.auth.request_otp("", "10.0.0.1").await;
    match result {
        Err(DomainError::Validation { message }) => assert_eq!(message, "email wajib"),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(f.mailer.sent_to("").is_empty());
}

#[tokio::test]
async fn test_request_otp_dispatches_mail() {
    let f = fixture();

    f.auth
        .request_otp("budi@example.com", "10.0.0.1")
        .await
        .unwrap();
    assert!(f.mailer.last_code_sent_to("budi@example.com").is_some());
}

#[tokio::test]
async fn test_fourth_request_in_window_is_rate_limited() {
    let f = fixture();

    for _ in 0..3 {
        f.auth
            .request_otp("budi@example.com", "10.0.0.1")
            .await
            .unwrap();
    }
    let fourth = f.auth.request_otp("budi@example.com", "10.0.0.1").await;
    assert!(matches!(
        fourth,
        Err(DomainError::Auth(AuthError::RateLimited { .. }))
    ));

    // the throttled request sent nothing
    assert_eq!(f.mailer.sent_to("budi@example.com").len(), 3);
}

#[tokio::test]
async fn test_rate_limit_is_per_client() {
    let f = fixture();

    for _ in 0..3 {
        f.auth
            .request_otp("budi@example.com", "10.0.0.1")
            .await
            .unwrap();
    }
    // another client is not throttled
    assert!(f
        .auth
        .request_otp("budi@example.com", "10.0.0.2")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_verify_with_registration_provisions_account() {
    let f = fixture();

    f.auth
        .request_otp("budi@example.com", "10.0.0.1")
        .await
        .unwrap();
    let code = f.mailer.last_code_sent_to("budi@example.com").unwrap();

    let outcome = f
        .auth
        .verify_otp(
            "budi@example.com",
            &code,
            Some(registration("rahasia123", "Budi Santoso")),
        )
        .await
        .unwrap();

    let user_id = match outcome {
        VerifyOtpOutcome::Registered { user_id } => user_id,
        other => panic!("expected Registered, got {:?}", other),
    };

    let profile = f.identity.profile_for(user_id).await.unwrap();
    assert_eq!(profile.full_name, "Budi Santoso");
    assert_eq!(profile.role, "user");
    assert_eq!(profile.absen, Some(7));
}

#[tokio::test]
async fn test_verify_without_registration_logs_in_existing_account() {
    let identity = MockIdentityProvider::new();
    let account_id = identity.put_account("budi@example.com").await;
    let f = fixture_with(identity);

    f.auth
        .request_otp("budi@example.com", "10.0.0.1")
        .await
        .unwrap();
    let code = f.mailer.last_code_sent_to("budi@example.com").unwrap();

    let outcome = f
        .auth
        .verify_otp("budi@example.com", &code, None)
        .await
        .unwrap();

    match outcome {
        VerifyOtpOutcome::LoggedIn { session, account } => {
            assert_eq!(account.id, account_id);
            assert!(!session.access_token.is_empty());
        }
        other => panic!("expected LoggedIn, got {:?}", other),
    }
    assert_eq!(f.identity.created_sessions().await, vec![account_id]);
}

#[tokio::test]
async fn test_login_for_unknown_account_fails_without_session() {
    let f = fixture();

    f.auth
        .request_otp("budi@example.com", "10.0.0.1")
        .await
        .unwrap();
    let code = f.mailer.last_code_sent_to("budi@example.com").unwrap();

    let result = f.auth.verify_otp("budi@example.com", &code, None).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::ProvisioningFailed { .. }))
    ));
    assert!(f.identity.created_sessions().await.is_empty());
}

#[tokio::test]
async fn test_partial_registration_fields_rejected_before_code_spent() {
    let f = fixture();

    f.auth
        .request_otp("budi@example.com", "10.0.0.1")
        .await
        .unwrap();
    let code = f.mailer.last_code_sent_to("budi@example.com").unwrap();

    let partial = RegistrationFields {
        password: Some("rahasia123".to_string()),
        ..RegistrationFields::default()
    };
    let result = f
        .auth
        .verify_otp("budi@example.com", &code, Some(partial))
        .await;
    match result {
        Err(DomainError::Validation { message }) => assert_eq!(message, "full_name wajib"),
        other => panic!("expected validation error, got {:?}", other),
    }

    // rejection happened before verification; the code is still live
    assert!(f
        .auth
        .verify_otp("budi@example.com", &code, Some(registration("x", "Budi")))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_verify_requires_email_and_code() {
    let f = fixture();

    let result = f.auth.verify_otp("", "", None).await;
    match result {
        Err(DomainError::Validation { message }) => {
            assert_eq!(message, "email, otp_code wajib")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_provisioning_failure_does_not_restore_code() {
    let f = fixture_with(MockIdentityProvider::failing());

    f.auth
        .request_otp("budi@example.com", "10.0.0.1")
        .await
        .unwrap();
    let code = f.mailer.last_code_sent_to("budi@example.com").unwrap();

    let result = f
        .auth
        .verify_otp(
            "budi@example.com",
            &code,
            Some(registration("rahasia123", "Budi")),
        )
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::ProvisioningFailed { .. }))
    ));

    // the code was consumed; a retry needs a fresh one
    let retry = f.auth.verify_otp("budi@example.com", &code, None).await;
    assert!(matches!(
        retry,
        Err(DomainError::Auth(AuthError::InvalidCode))
    ));
}
