use crate::database::MongoDB;
use crate::middleware::auth::Claims;
use crate::models::NotificationResponse;
use crate::services::notification_service;
use actix_web::{get, post, web, HttpResponse, Responder};

/// GET /api/v1/notifications - the logged-in user's inbox
#[get("")]
pub async fn list_notifications(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    match notification_service::list_for_user(&db, &user.sub).await {
        Ok(notifications) => {
            let notifications: Vec<NotificationResponse> = notifications
                .into_iter()
                .map(NotificationResponse::from)
                .collect();
            let total = notifications.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "notifications": notifications,
                "total": total
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// GET /api/v1/notifications/unread-count - badge number
#[get("/unread-count")]
pub async fn unread_count(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    match notification_service::unread_count(&db, &user.sub).await {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "count": count
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// POST /api/v1/notifications/{id}/read
#[post("/{id}/read")]
pub async fn mark_read(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> impl Responder {
    match notification_service::mark_read(&db, &user.sub, &path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true
        })),
        Err(e) if e.contains("not found") => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": e
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// POST /api/v1/notifications/read-all
#[post("/read-all")]
pub async fn mark_all_read(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    match notification_service::mark_all_read(&db, &user.sub).await {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "marked": count
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}
