//! General request rate limiting middleware
//!
//! Applies the per-client general window (100 requests per 15 minutes)
//! to every route. The tighter OTP window is enforced inside the auth
//! service, closer to the expensive work it protects.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use kas_core::services::auth::{InMemoryRateLimiter, RateLimitCategory, RateLimitDecision};
use kas_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::extract_client_ip;

/// Rate limiter middleware factory sharing the process-wide limiter
pub struct GeneralRateLimit {
    limiter: Arc<InMemoryRateLimiter>,
}

impl GeneralRateLimit {
    pub fn new(limiter: Arc<InMemoryRateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GeneralRateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = GeneralRateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GeneralRateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct GeneralRateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<InMemoryRateLimiter>,
}

impl<S, B> Service<ServiceRequest> for GeneralRateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let limiter = self.limiter.clone();

        Box::pin(async move {
            let client = extract_client_ip(req.request());
            let decision =
                limiter.check_at(&client, RateLimitCategory::General, chrono::Utc::now());

            if let RateLimitDecision::Limited {
                retry_after_seconds,
            } = decision
            {
                let body = ErrorResponse::new(
                    error_codes::RATE_LIMITED,
                    "Terlalu banyak request, coba lagi nanti".to_string(),
                )
                .add_detail("retry_after_seconds", retry_after_seconds);
                let (request, _) = req.into_parts();
                let response = HttpResponse::TooManyRequests().json(body);
                return Ok(ServiceResponse::new(request, response).map_into_right_body());
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}
