//! Mapping from domain errors to HTTP responses
//!
//! Every error leaves the gateway as the shared JSON envelope:
//! `{error, message, details?, timestamp}`. Client mistakes (bad input,
//! bad codes, unknown resources) are 400s, throttling is 429, and
//! everything downstream is a 500, since the caller cannot fix a store or
//! mail outage.

use actix_web::{HttpRequest, HttpResponse};

use kas_core::errors::{AuthError, DomainError};
use kas_shared::errors::ErrorResponse;

pub fn to_http_response(error: &DomainError, req: &HttpRequest) -> HttpResponse {
    let body: ErrorResponse = error.into();

    log::warn!(
        "{} {} -> {}: {}",
        req.method(),
        req.path(),
        body.error,
        error
    );

    match error {
        DomainError::Validation { .. } | DomainError::NotFound { .. } => {
            HttpResponse::BadRequest().json(body)
        }
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCode | AuthError::ExpiredCode | AuthError::AlreadyUsed => {
                HttpResponse::BadRequest().json(body)
            }
            AuthError::RateLimited { .. } => HttpResponse::TooManyRequests().json(body),
            AuthError::ProvisioningFailed { .. } | AuthError::MailDispatchFailed => {
                HttpResponse::InternalServerError().json(body)
            }
        },
        DomainError::StoreUnavailable { .. } | DomainError::Internal { .. } => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Client IP for rate limiting, honoring reverse-proxy headers
pub fn extract_client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
