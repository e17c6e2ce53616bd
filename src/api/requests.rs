use crate::database::MongoDB;
use crate::middleware::auth::Claims;
use crate::models::{CreateMentorRequestBody, DecisionBody, MentorRequestResponse, RequestStatus};
use crate::services::request_service;
use actix_web::{get, post, web, HttpResponse, Responder};
use mongodb::bson::doc;
use serde::Deserialize;

/// POST /api/v1/requests - user opens a mentoring request
#[post("")]
pub async fn create_request(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    body: web::Json<CreateMentorRequestBody>,
) -> impl Responder {
    let user_name = user.name.clone().unwrap_or_else(|| user.email.clone());

    match request_service::create_request(
        &db,
        &user.sub,
        &user_name,
        &user.email,
        &body.mentor_id,
        &body.message,
    )
    .await
    {
        Ok(id) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "id": id
        })),
        Err(e) if e.contains("not found") || e.contains("not accepting") => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
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

/// GET /api/v1/requests - user's own request history
#[get("")]
pub async fn list_own_requests(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    list(&db, doc! { "user_id": &user.sub }).await
}

#[derive(Debug, Deserialize)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
}

/// GET /api/v1/admin/requests - admin console, optionally by status
#[get("")]
pub async fn list_all_requests(
    db: web::Data<MongoDB>,
    query: web::Query<RequestFilter>,
) -> impl Responder {
    let filter = match query.status {
        Some(status) => doc! { "status": status.as_str() },
        None => doc! {},
    };
    list(&db, filter).await
}

/// POST /api/v1/admin/requests/{id}/approve - admin gate
#[post("/{id}/approve")]
pub async fn admin_approve(
    admin: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<DecisionBody>,
) -> impl Responder {
    let request_id = path.into_inner();
    match request_service::admin_approve(&db, &request_id, &admin.sub, body.notes.as_deref()).await
    {
        Ok(request) => {
            crate::api::metrics::increment_request_transitions();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "request": MentorRequestResponse::from(request)
            }))
        }
        Err(e) => transition_error(e),
    }
}

/// POST /api/v1/admin/requests/{id}/reject - admin gate
#[post("/{id}/reject")]
pub async fn admin_reject(
    admin: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<DecisionBody>,
) -> impl Responder {
    let request_id = path.into_inner();
    match request_service::admin_reject(&db, &request_id, &admin.sub, body.notes.as_deref()).await {
        Ok(request) => {
            crate::api::metrics::increment_request_transitions();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "request": MentorRequestResponse::from(request)
            }))
        }
        Err(e) => transition_error(e),
    }
}

/// GET /api/v1/mentor/requests - the mentor's inbox: forwarded requests
/// awaiting their decision, plus decided history
#[get("")]
pub async fn list_mentor_inbox(user: web::ReqData<Claims>, db: web::Data<MongoDB>) -> impl Responder {
    list(
        &db,
        doc! {
            "mentor_id": &user.sub,
            "status": { "$in": ["admin_approved", "mentor_approved", "mentor_rejected"] },
        },
    )
    .await
}

/// POST /api/v1/mentor/requests/{id}/approve - mentor gate (portal path)
#[post("/{id}/approve")]
pub async fn mentor_approve(
    mentor: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<DecisionBody>,
) -> impl Responder {
    mentor_decide(&mentor, &db, &path.into_inner(), true, body.notes.as_deref()).await
}

/// POST /api/v1/mentor/requests/{id}/reject - mentor gate (portal path)
#[post("/{id}/reject")]
pub async fn mentor_reject(
    mentor: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<DecisionBody>,
) -> impl Responder {
    mentor_decide(&mentor, &db, &path.into_inner(), false, body.notes.as_deref()).await
}

async fn mentor_decide(
    mentor: &Claims,
    db: &MongoDB,
    request_id: &str,
    approve: bool,
    notes: Option<&str>,
) -> HttpResponse {
    // Only the addressed mentor may decide through the portal
    match request_service::get_request(db, request_id).await {
        Ok(request) if request.mentor_id != mentor.sub => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "success": false,
                "error": "Request is not addressed to this mentor"
            }));
        }
        Err(e) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }));
        }
        Ok(_) => {}
    }

    match request_service::mentor_decide(db, request_id, approve, notes).await {
        Ok(request) => {
            crate::api::metrics::increment_request_transitions();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "request": MentorRequestResponse::from(request)
            }))
        }
        Err(e) => transition_error(e),
    }
}

async fn list(db: &MongoDB, filter: mongodb::bson::Document) -> HttpResponse {
    match request_service::list_requests(db, filter).await {
        Ok(requests) => {
            let requests: Vec<MentorRequestResponse> =
                requests.into_iter().map(MentorRequestResponse::from).collect();
            let total = requests.len();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "requests": requests,
                "total": total
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

fn transition_error(e: String) -> HttpResponse {
    if e.contains("is not in") {
        // CAS miss: the request already left the expected source state
        HttpResponse::Conflict().json(serde_json::json!({
            "success": false,
            "error": e
        }))
    } else if e.contains("Invalid request ID") {
        HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e
        }))
    } else {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        }))
    }
}
