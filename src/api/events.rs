use crate::database::MongoDB;
use crate::models::{CreateEventRequest, EventResponse, UpdateEventRequest};
use crate::services::event_service;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// GET /api/v1/events - public listing of approved events
pub async fn list_public_events(db: web::Data<MongoDB>) -> HttpResponse {
    match event_service::list_events(&db, true).await {
        Ok(events) => {
            let events: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
            let total = events.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "events": events,
                "total": total
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// GET /api/v1/admin/events - all events regardless of status
#[get("")]
pub async fn list_all_events(db: web::Data<MongoDB>) -> impl Responder {
    match event_service::list_events(&db, false).await {
        Ok(events) => {
            let events: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
            let total = events.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "events": events,
                "total": total
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// POST /api/v1/admin/events
#[post("")]
pub async fn create_event(
    db: web::Data<MongoDB>,
    request: web::Json<CreateEventRequest>,
) -> impl Responder {
    match event_service::create_event(&db, &request).await {
        Ok(id) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "id": id
        })),
        Err(e) if e.starts_with("Missing required field") => {
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

/// PUT /api/v1/admin/events/{id}
#[put("/{id}")]
pub async fn update_event(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<UpdateEventRequest>,
) -> impl Responder {
    match event_service::update_event(&db, &path.into_inner(), &request).await {
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

/// POST /api/v1/admin/events/{id}/approve
#[post("/{id}/approve")]
pub async fn approve_event(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    decide(&db, &path.into_inner(), true).await
}

/// POST /api/v1/admin/events/{id}/reject
#[post("/{id}/reject")]
pub async fn reject_event(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    decide(&db, &path.into_inner(), false).await
}

async fn decide(db: &MongoDB, event_id: &str, approve: bool) -> HttpResponse {
    match event_service::decide_event(db, event_id, approve).await {
        Ok(event) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "event": EventResponse::from(event)
        })),
        Err(e) if e.contains("not in pending state") => {
            HttpResponse::Conflict().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// DELETE /api/v1/admin/events/{id}
#[delete("/{id}")]
pub async fn delete_event(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    match event_service::delete_event(&db, &path.into_inner()).await {
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
