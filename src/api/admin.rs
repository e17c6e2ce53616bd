use crate::database::MongoDB;
use crate::services::{auth_service, mentor_service, sheets_service};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DeleteAuthUserRequest {
    pub uid: Option<String>,
}

/// DELETE /api/admin/delete-auth-user - removes a user record and the
/// data hanging off it
#[utoipa::path(
    delete,
    path = "/api/admin/delete-auth-user",
    tag = "Admin",
    request_body = DeleteAuthUserRequest,
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "uid missing"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_auth_user(
    db: web::Data<MongoDB>,
    body: web::Json<DeleteAuthUserRequest>,
) -> HttpResponse {
    let uid = match body.uid.as_deref() {
        Some(uid) if !uid.trim().is_empty() => uid.trim(),
        _ => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "Missing required field: uid"
            }));
        }
    };

    match auth_service::delete_auth_user(&db, uid).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": format!("User {} deleted", uid)
        })),
        Err(e) if e.contains("not found") => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": e
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// POST /api/admin/migrate-mentors - legacy flat docs to core+profile
#[utoipa::path(
    post,
    path = "/api/admin/migrate-mentors",
    tag = "Admin",
    responses(
        (status = 200, description = "Migration summary")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn migrate_mentors(db: web::Data<MongoDB>) -> HttpResponse {
    match mentor_service::migrate_mentors(&db).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// POST /api/admin/import-submissions - pull rows from the configured
/// Google Sheet into the submissions collection
pub async fn import_submissions(db: web::Data<MongoDB>) -> HttpResponse {
    match sheets_service::import_submissions(&db).await {
        Ok(summary) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "imported": summary.imported,
            "skipped": summary.skipped
        })),
        Err(e) if e.contains("not configured") => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}
