use crate::database::MongoDB;
use crate::models::{MentorRequestResponse, TokenAction, TokenError};
use crate::services::{request_service, token_service};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub token: String,
}

/// GET /api/mentor-actions/verify?token= - landing-page peek. Does not
/// consume the token.
pub async fn verify_action_token(
    db: web::Data<MongoDB>,
    query: web::Query<VerifyQuery>,
) -> HttpResponse {
    match token_service::verify(&db, &query.token).await {
        Ok(token) => {
            let request = request_service::get_request(&db, &token.request_id).await.ok();
            HttpResponse::Ok().json(serde_json::json!({
                "valid": true,
                "action": token.action,
                "mentor_email": token.mentor_email,
                "expires_at": token.expires_at,
                "request": request.map(MentorRequestResponse::from),
            }))
        }
        Err(e) => token_failure(e),
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ActBody {
    pub token: String,
    /// Overrides the token's action hint when both are present
    pub action: Option<TokenAction>,
    pub notes: Option<String>,
}

/// POST /api/mentor-actions/act - claims the token, then drives the
/// mentor-gate transition. The claim is atomic, so a double-click on
/// the emailed link can only act once.
#[utoipa::path(
    post,
    path = "/api/mentor-actions/act",
    tag = "MentorActions",
    request_body = ActBody,
    responses(
        (status = 200, description = "Action applied"),
        (status = 400, description = "No action specified"),
        (status = 401, description = "Token invalid, expired or used"),
        (status = 409, description = "Request already decided")
    )
)]
pub async fn act_on_token(db: web::Data<MongoDB>, body: web::Json<ActBody>) -> HttpResponse {
    let token = match token_service::claim(&db, &body.token).await {
        Ok(token) => token,
        Err(e) => return token_failure(e),
    };

    crate::api::metrics::increment_tokens_claimed();

    let action = match body.action.or(token.action) {
        Some(action) => action,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "No action specified and token carries no action hint"
            }));
        }
    };

    let approve = action == TokenAction::Approve;

    match request_service::mentor_decide(&db, &token.request_id, approve, body.notes.as_deref())
        .await
    {
        Ok(request) => {
            crate::api::metrics::increment_request_transitions();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "request": MentorRequestResponse::from(request)
            }))
        }
        Err(e) if e.contains("is not in") => HttpResponse::Conflict().json(serde_json::json!({
            "success": false,
            "error": e
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

fn token_failure(error: TokenError) -> HttpResponse {
    match &error {
        TokenError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
            "valid": false,
            "reason": error.reason(),
            "error": error.message()
        })),
        TokenError::Expired | TokenError::AlreadyUsed => {
            HttpResponse::Unauthorized().json(serde_json::json!({
                "valid": false,
                "reason": error.reason(),
                "error": error.message()
            }))
        }
        // Infrastructure failure: the token may well exist, don't tell
        // the mentor their link is dead
        TokenError::Internal(details) => {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": error.message(),
                "details": details
            }))
        }
    }
}

/// POST /api/cleanup-tokens - cron-facing purge of expired tokens.
/// Guarded by a shared bearer secret, not a user JWT.
#[utoipa::path(
    post,
    path = "/api/cleanup-tokens",
    tag = "MentorActions",
    responses(
        (status = 200, description = "Expired tokens removed"),
        (status = 401, description = "Bad or missing cleanup secret")
    )
)]
pub async fn cleanup_tokens(req: HttpRequest, db: web::Data<MongoDB>) -> HttpResponse {
    let provided = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    if !cleanup_key_matches(provided) {
        return HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Unauthorized"
        }));
    }

    match token_service::cleanup_expired(&db).await {
        Ok(0) => HttpResponse::Ok().json(serde_json::json!({
            "message": "No expired tokens to clean up",
            "count": 0
        })),
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Cleaned up {} expired tokens", count),
            "count": count
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "message": "Cleanup failed",
            "details": e
        })),
    }
}

/// CLEANUP_API_KEY is the primary secret; CLEANUP_SECRET and
/// CRON_SECRET are accepted for older cron configs
fn cleanup_key_matches(provided: Option<&str>) -> bool {
    let provided = match provided {
        Some(p) if !p.is_empty() => p,
        _ => return false,
    };

    for var in ["CLEANUP_API_KEY", "CLEANUP_SECRET", "CRON_SECRET"] {
        if let Ok(expected) = std::env::var(var) {
            if !expected.is_empty() && expected == provided {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_token_failure_status_codes() {
        assert_eq!(
            token_failure(TokenError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            token_failure(TokenError::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            token_failure(TokenError::AlreadyUsed).status(),
            StatusCode::UNAUTHORIZED
        );
        // A database outage is not a dead link
        assert_eq!(
            token_failure(TokenError::Internal("connection reset".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_cleanup_key_rejects_missing_or_empty() {
        assert!(!cleanup_key_matches(None));
        assert!(!cleanup_key_matches(Some("")));
    }

    #[test]
    fn test_cleanup_key_matches_env() {
        std::env::set_var("CLEANUP_API_KEY", "cleanup-secret-1");
        assert!(cleanup_key_matches(Some("cleanup-secret-1")));
        assert!(!cleanup_key_matches(Some("wrong-secret")));
        std::env::remove_var("CLEANUP_API_KEY");
    }
}
