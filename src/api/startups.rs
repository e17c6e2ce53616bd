use crate::database::MongoDB;
use crate::models::{CreateStartupRequest, StartupResponse, UpdateStartupRequest};
use crate::services::startup_service;
use actix_web::{delete, post, put, web, HttpResponse, Responder};

/// GET /api/v1/startups - public showcase
pub async fn list_startups(db: web::Data<MongoDB>) -> HttpResponse {
    match startup_service::list_startups(&db).await {
        Ok(startups) => {
            let startups: Vec<StartupResponse> =
                startups.into_iter().map(StartupResponse::from).collect();
            let total = startups.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "startups": startups,
                "total": total
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// POST /api/v1/admin/startups
#[post("")]
pub async fn create_startup(
    db: web::Data<MongoDB>,
    request: web::Json<CreateStartupRequest>,
) -> impl Responder {
    match startup_service::create_startup(&db, &request).await {
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

/// PUT /api/v1/admin/startups/{id}
#[put("/{id}")]
pub async fn update_startup(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<UpdateStartupRequest>,
) -> impl Responder {
    match startup_service::update_startup(&db, &path.into_inner(), &request).await {
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

/// DELETE /api/v1/admin/startups/{id}
#[delete("/{id}")]
pub async fn delete_startup(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    match startup_service::delete_startup(&db, &path.into_inner()).await {
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
