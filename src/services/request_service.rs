use crate::{
    database::MongoDB,
    models::{Mentor, MentorRequest, RequestStatus, TokenAction},
    services::{notification_service, token_service},
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

const COLLECTION: &str = "mentor_requests";

/// Opens a new mentoring request against an active mentor
pub async fn create_request(
    db: &MongoDB,
    user_id: &str,
    user_name: &str,
    user_email: &str,
    mentor_id: &str,
    message: &str,
) -> Result<String, String> {
    if message.trim().is_empty() {
        return Err("Missing required field: message".to_string());
    }

    let mentors = db.collection::<Mentor>("mentors");
    let mentor = mentors
        .find_one(doc! { "uid": mentor_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "Mentor not found".to_string())?;

    if mentor.status != "active" {
        return Err("Mentor is not accepting requests".to_string());
    }

    let now = chrono::Utc::now().timestamp();

    let request = MentorRequest {
        id: None,
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        user_email: user_email.to_string(),
        mentor_id: mentor_id.to_string(),
        message: message.trim().to_string(),
        status: RequestStatus::Pending,
        admin_processed_at: None,
        admin_notes: None,
        processed_by_admin: None,
        mentor_processed_at: None,
        mentor_notes: None,
        created_at: now,
        updated_at: now,
    };

    let collection = db.collection::<MentorRequest>(COLLECTION);
    let result = collection
        .insert_one(&request)
        .await
        .map_err(|e| format!("Failed to create request: {}", e))?;

    let id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    log::info!(
        "🤝 Mentor request {} opened: user {} -> mentor {}",
        id,
        user_id,
        mentor_id
    );

    Ok(id)
}

/// Moves a request to `target` if and only if it currently sits in the
/// transition graph's required source state. The status check is part of
/// the update filter, so a request can never be processed twice even
/// under concurrent submissions.
async fn transition(
    db: &MongoDB,
    request_id: &str,
    target: RequestStatus,
    extra_set: mongodb::bson::Document,
) -> Result<MentorRequest, String> {
    let object_id =
        ObjectId::parse_str(request_id).map_err(|_| "Invalid request ID".to_string())?;

    let source = target
        .required_source()
        .ok_or_else(|| "pending is not a transition target".to_string())?;

    let mut set = extra_set;
    set.insert("status", target.as_str());
    set.insert("updated_at", chrono::Utc::now().timestamp());

    let collection = db.collection::<MentorRequest>(COLLECTION);

    let updated = collection
        .find_one_and_update(
            doc! { "_id": object_id, "status": source.as_str() },
            doc! { "$set": set },
        )
        .return_document(mongodb::options::ReturnDocument::After)
        .await
        .map_err(|e| format!("Failed to update request: {}", e))?
        .ok_or_else(|| format!("Request is not in {} state", source))?;

    if target.is_terminal() {
        log::info!("🏁 Request {} closed as {}", request_id, target);
    } else {
        log::info!("🔀 Request {} moved to {}", request_id, target);
    }

    Ok(updated)
}

/// Admin gate: forwards the request to the mentor. Notifies the user and
/// the mentor, and issues the pair of emailed action tokens.
pub async fn admin_approve(
    db: &MongoDB,
    request_id: &str,
    admin_uid: &str,
    notes: Option<&str>,
) -> Result<MentorRequest, String> {
    let now = chrono::Utc::now().timestamp();
    let mut set = doc! {
        "admin_processed_at": now,
        "processed_by_admin": admin_uid,
    };
    if let Some(notes) = notes {
        set.insert("admin_notes", notes);
    }

    let request = transition(db, request_id, RequestStatus::AdminApproved, set).await?;

    notification_service::notify(
        db,
        &request.user_id,
        "request_forwarded",
        "Request forwarded to mentor",
        "An admin approved your mentoring request and forwarded it to the mentor.",
        Some(request_id),
    )
    .await?;

    notification_service::notify(
        db,
        &request.mentor_id,
        "new_request",
        "New mentorship request",
        &format!("{} has requested your mentorship.", request.user_name),
        Some(request_id),
    )
    .await?;

    // Emailed action links for the mentor — one per decision
    let mentor = db
        .collection::<Mentor>("mentors")
        .find_one(doc! { "uid": &request.mentor_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "Mentor not found".to_string())?;

    let approve_token =
        token_service::issue(db, request_id, &mentor.email, Some(TokenAction::Approve)).await?;
    let reject_token =
        token_service::issue(db, request_id, &mentor.email, Some(TokenAction::Reject)).await?;

    // Mail delivery is owned by an external sender watching the
    // email_tokens collection; the links are logged for operators.
    log::info!(
        "✉️ Action links for {}: approve={} reject={}",
        mentor.email,
        approve_token.token_id,
        reject_token.token_id
    );

    Ok(request)
}

/// Admin gate: rejects the request outright (terminal)
pub async fn admin_reject(
    db: &MongoDB,
    request_id: &str,
    admin_uid: &str,
    notes: Option<&str>,
) -> Result<MentorRequest, String> {
    let now = chrono::Utc::now().timestamp();
    let mut set = doc! {
        "admin_processed_at": now,
        "processed_by_admin": admin_uid,
    };
    if let Some(notes) = notes {
        set.insert("admin_notes", notes);
    }

    let request = transition(db, request_id, RequestStatus::AdminRejected, set).await?;

    notification_service::notify(
        db,
        &request.user_id,
        "request_rejected",
        "Request not approved",
        "Your mentoring request was not approved by the admin team.",
        Some(request_id),
    )
    .await?;

    Ok(request)
}

/// Mentor gate: final decision on an admin-approved request (terminal)
pub async fn mentor_decide(
    db: &MongoDB,
    request_id: &str,
    approve: bool,
    notes: Option<&str>,
) -> Result<MentorRequest, String> {
    let target = if approve {
        RequestStatus::MentorApproved
    } else {
        RequestStatus::MentorRejected
    };

    let now = chrono::Utc::now().timestamp();
    let mut set = doc! { "mentor_processed_at": now };
    if let Some(notes) = notes {
        set.insert("mentor_notes", notes);
    }

    let request = transition(db, request_id, target, set).await?;

    let (kind, title, message) = if approve {
        (
            "mentorship_approved",
            "Mentorship approved",
            "Your mentor accepted the request. They will reach out to schedule a first session.",
        )
    } else {
        (
            "mentorship_rejected",
            "Mentorship declined",
            "The mentor is unable to take your request at this time.",
        )
    };

    notification_service::notify(db, &request.user_id, kind, title, message, Some(request_id))
        .await?;

    Ok(request)
}

pub async fn get_request(db: &MongoDB, request_id: &str) -> Result<MentorRequest, String> {
    let object_id =
        ObjectId::parse_str(request_id).map_err(|_| "Invalid request ID".to_string())?;

    db.collection::<MentorRequest>(COLLECTION)
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "Request not found".to_string())
}

/// Lists requests, optionally filtered (admin console, portals)
pub async fn list_requests(
    db: &MongoDB,
    filter: mongodb::bson::Document,
) -> Result<Vec<MentorRequest>, String> {
    let collection = db.collection::<MentorRequest>(COLLECTION);

    let mut cursor = collection
        .find(filter)
        .sort(doc! { "created_at": -1 })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut requests = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(request) => requests.push(request),
            Err(e) => log::error!("❌ Error reading mentor request: {}", e),
        }
    }

    Ok(requests)
}
