use crate::services::{auth_service, SessionManager};
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

pub use crate::services::auth_service::Claims;

/// JWT gate for protected scopes. Verifies the bearer token, stores the
/// Claims in request extensions for handlers (`web::ReqData<Claims>`),
/// and stamps session activity. An optional role requirement turns the
/// gate into an admin/mentor-only check.
pub struct AuthMiddleware {
    required_role: Option<&'static str>,
}

impl AuthMiddleware {
    pub fn any() -> Self {
        AuthMiddleware { required_role: None }
    }

    pub fn role(role: &'static str) -> Self {
        AuthMiddleware {
            required_role: Some(role),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            required_role: self.required_role,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    required_role: Option<&'static str>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(|t| t.to_string());

        let token = match token {
            Some(token) => token,
            None => {
                return Box::pin(async move {
                    Err(actix_web::error::ErrorUnauthorized(
                        "Missing authorization token",
                    ))
                });
            }
        };

        let claims = match auth_service::verify_token(&token) {
            Ok(claims) => claims,
            Err(e) => {
                return Box::pin(
                    async move { Err(actix_web::error::ErrorUnauthorized(e)) },
                );
            }
        };

        if let Some(role) = self.required_role {
            if !claims.has_role(role) {
                let message = format!("Requires {} role", role);
                return Box::pin(async move {
                    Err(actix_web::error::ErrorForbidden(message))
                });
            }
        }

        // Any authenticated request counts as user activity
        if let Some(session) = req.app_data::<web::Data<SessionManager>>() {
            session.record_activity();
        }

        req.extensions_mut().insert(claims);

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}
