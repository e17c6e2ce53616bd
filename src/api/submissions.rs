use crate::database::MongoDB;
use crate::middleware::auth::Claims;
use crate::models::{ContactSubmissionRequest, Submission, SubmissionResponse};
use crate::services::submission_service;
use actix_web::{get, post, web, HttpResponse, Responder};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use serde::Deserialize;

/// POST /api/contact-submissions - public form intake
#[utoipa::path(
    post,
    path = "/api/contact-submissions",
    tag = "Submissions",
    request_body = ContactSubmissionRequest,
    responses(
        (status = 201, description = "Submission stored"),
        (status = 400, description = "Missing or invalid field"),
        (status = 500, description = "Unexpected error")
    )
)]
pub async fn create_submission(
    db: web::Data<MongoDB>,
    request: web::Json<ContactSubmissionRequest>,
) -> HttpResponse {
    log::info!("📨 POST /api/contact-submissions");

    match submission_service::create_submission(&db, &request).await {
        Ok(id) => {
            crate::api::metrics::increment_submissions_received();
            HttpResponse::Created().json(serde_json::json!({
                "message": "Submission received",
                "id": id
            }))
        }
        Err(e) if e.starts_with("Missing required field") || e.starts_with("Invalid") => {
            log::warn!("❌ Submission rejected: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "message": e
            }))
        }
        Err(e) => {
            log::error!("❌ Submission failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to store submission",
                "details": e
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmissionFilter {
    pub status: Option<String>,
}

/// GET /api/v1/admin/submissions - admin console listing
#[get("")]
pub async fn list_submissions(
    db: web::Data<MongoDB>,
    query: web::Query<SubmissionFilter>,
) -> impl Responder {
    let filter = match &query.status {
        Some(status) => doc! { "status": status },
        None => doc! {},
    };

    let collection = db.collection::<Submission>("submissions");

    match collection.find(filter).sort(doc! { "created_at": -1 }).await {
        Ok(mut cursor) => {
            let mut submissions = Vec::new();

            while let Some(result) = cursor.next().await {
                match result {
                    Ok(submission) => submissions.push(SubmissionResponse::from(submission)),
                    Err(e) => log::error!("❌ Error reading submission: {}", e),
                }
            }

            let total = submissions.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "submissions": submissions,
                "total": total
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to fetch submissions: {}", e)
        })),
    }
}

/// GET /api/v1/admin/submissions/{id}
#[get("/{id}")]
pub async fn get_submission(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    let submission_id = path.into_inner();
    let object_id = match ObjectId::parse_str(&submission_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "Invalid submission ID"
            }))
        }
    };

    let collection = db.collection::<Submission>("submissions");

    match collection.find_one(doc! { "_id": object_id }).await {
        Ok(Some(submission)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "submission": SubmissionResponse::from(submission)
        })),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "Submission not found"
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to fetch submission: {}", e)
        })),
    }
}

/// POST /api/v1/admin/submissions/{id}/accept
#[post("/{id}/accept")]
pub async fn accept_submission(
    admin: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> impl Responder {
    decide(&db, &path.into_inner(), true, &admin.sub).await
}

/// POST /api/v1/admin/submissions/{id}/reject
#[post("/{id}/reject")]
pub async fn reject_submission(
    admin: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> impl Responder {
    decide(&db, &path.into_inner(), false, &admin.sub).await
}

async fn decide(db: &MongoDB, submission_id: &str, accept: bool, admin_uid: &str) -> HttpResponse {
    match submission_service::decide_submission(db, submission_id, accept, admin_uid).await {
        Ok(submission) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "submission": SubmissionResponse::from(submission)
        })),
        Err(e) if e.contains("not in pending state") => {
            HttpResponse::Conflict().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
        Err(e) if e.contains("Invalid submission ID") => {
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
