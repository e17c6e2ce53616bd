use crate::database::MongoDB;
use crate::middleware::auth::Claims;
use crate::models::{CreateMentorRequest, UpdateMentorRequest};
use crate::services::mentor_service;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// GET /api/v1/mentors - public cards for active mentors
pub async fn list_public_mentors(db: web::Data<MongoDB>) -> HttpResponse {
    match mentor_service::list_mentor_cards(&db, true).await {
        Ok(mentors) => {
            let total = mentors.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "mentors": mentors,
                "total": total
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// GET /api/v1/mentor/profile - the logged-in mentor's own card
pub async fn get_own_profile(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> HttpResponse {
    match mentor_service::get_mentor(&db, &user.sub).await {
        Ok(card) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "mentor": card
        })),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// GET /api/v1/admin/mentors - all mentors including inactive
#[get("")]
pub async fn list_all_mentors(db: web::Data<MongoDB>) -> impl Responder {
    match mentor_service::list_mentor_cards(&db, false).await {
        Ok(mentors) => {
            let total = mentors.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "mentors": mentors,
                "total": total
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

/// GET /api/v1/admin/mentors/{uid}
#[get("/{uid}")]
pub async fn get_mentor(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    match mentor_service::get_mentor(&db, &path.into_inner()).await {
        Ok(card) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "mentor": card
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

/// POST /api/v1/admin/mentors
#[post("")]
pub async fn create_mentor(
    db: web::Data<MongoDB>,
    request: web::Json<CreateMentorRequest>,
) -> impl Responder {
    match mentor_service::create_mentor(&db, &request).await {
        Ok(uid) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "uid": uid
        })),
        Err(e) if e.starts_with("Missing required field") || e.contains("already exists") => {
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

/// PUT /api/v1/admin/mentors/{uid}
#[put("/{uid}")]
pub async fn update_mentor(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<UpdateMentorRequest>,
) -> impl Responder {
    match mentor_service::update_mentor(&db, &path.into_inner(), &request).await {
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

/// DELETE /api/v1/admin/mentors/{uid}
#[delete("/{uid}")]
pub async fn delete_mentor(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    match mentor_service::delete_mentor(&db, &path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true
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
