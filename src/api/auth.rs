use crate::services::auth_service::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services::{auth_service, SessionManager};
use crate::{database::MongoDB, middleware::auth::Claims};
use actix_web::{web, HttpRequest, HttpResponse};

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    db: web::Data<MongoDB>,
    session: web::Data<SessionManager>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /auth/login - email: {}", request.email);

    match auth_service::login(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.email);
            session.bind_user(&response.user.id);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Invalid request or user already exists")
    )
)]
pub async fn register(
    db: web::Data<MongoDB>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    log::info!("📝 POST /auth/register - email: {}", request.email);

    match auth_service::register(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Registration successful: {}", request.email);
            HttpResponse::Created().json(response)
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", request.email, e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn refresh_token(
    db: web::Data<MongoDB>,
    request: web::Json<auth_service::RefreshTokenRequest>,
) -> HttpResponse {
    log::info!("🔄 POST /auth/refresh");

    match auth_service::refresh_token(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Token refreshed");
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Token refresh failed: {}", e);
            HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/verify",
    tag = "Auth",
    responses(
        (status = 200, description = "Token is valid"),
        (status = 401, description = "Invalid or expired token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn verify_token(req: HttpRequest) -> HttpResponse {
    log::info!("✓ GET /auth/verify");

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "No valid Authorization header"
            }));
        }
    };

    match auth_service::verify_token(token) {
        Ok(claims) => {
            log::info!("✅ Token valid for user: {}", claims.sub);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "valid": true,
                "user_id": claims.sub,
                "email": claims.email,
                "roles": claims.roles,
                "exp": claims.exp
            }))
        }
        Err(e) => {
            log::warn!("❌ Invalid token: {}", e);
            HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "valid": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user info"),
        (status = 401, description = "Not authenticated")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> HttpResponse {
    match auth_service::get_current_user(&db, &user.sub).await {
        Ok(info) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user": info
        })),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// GET /api/v1/auth/session - session keep-alive status
pub async fn get_session(session: web::Data<SessionManager>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "valid": session.is_session_valid(),
        "user": session.bound_user(),
        "idle_seconds": session.idle_seconds(),
        "has_warm_token": session.current_token().is_some(),
    }))
}

/// POST /api/v1/auth/session/refresh - force a keep-alive refresh now
pub async fn refresh_session(
    db: web::Data<MongoDB>,
    session: web::Data<SessionManager>,
) -> HttpResponse {
    match session.force_token_refresh(&db).await {
        Ok(token) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "token": token
        })),
        Err(e) => HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// POST /api/v1/auth/logout - unbinds the session and stops keep-alive
pub async fn logout(session: web::Data<SessionManager>) -> HttpResponse {
    session.clear_user();
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Logged out"
    }))
}
