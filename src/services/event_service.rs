use crate::{
    database::MongoDB,
    models::{CreateEventRequest, Event, UpdateEventRequest},
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

const COLLECTION: &str = "events";

pub async fn create_event(db: &MongoDB, request: &CreateEventRequest) -> Result<String, String> {
    if request.title.trim().is_empty() {
        return Err("Missing required field: title".to_string());
    }
    if request.date.trim().is_empty() {
        return Err("Missing required field: date".to_string());
    }

    let now = chrono::Utc::now().timestamp();

    let event = Event {
        id: None,
        title: request.title.trim().to_string(),
        description: request.description.clone(),
        date: request.date.clone(),
        time: request.time.clone(),
        venue: request.venue.clone(),
        link: request.link.clone(),
        status: "pending".to_string(),
        created_at: now,
        updated_at: now,
    };

    let collection = db.collection::<Event>(COLLECTION);
    let result = collection
        .insert_one(&event)
        .await
        .map_err(|e| format!("Failed to create event: {}", e))?;

    let id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    log::info!("📅 Event created: {} -> {}", event.title, id);

    Ok(id)
}

pub async fn update_event(
    db: &MongoDB,
    event_id: &str,
    request: &UpdateEventRequest,
) -> Result<(), String> {
    let object_id = ObjectId::parse_str(event_id).map_err(|_| "Invalid event ID".to_string())?;

    let mut set = doc! { "updated_at": chrono::Utc::now().timestamp() };
    if let Some(v) = &request.title {
        set.insert("title", v);
    }
    if let Some(v) = &request.description {
        set.insert("description", v);
    }
    if let Some(v) = &request.date {
        set.insert("date", v);
    }
    if let Some(v) = &request.time {
        set.insert("time", v);
    }
    if let Some(v) = &request.venue {
        set.insert("venue", v);
    }
    if let Some(v) = &request.link {
        set.insert("link", v);
    }

    let collection = db.collection::<Event>(COLLECTION);
    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await
        .map_err(|e| format!("Failed to update event: {}", e))?;

    if result.matched_count == 0 {
        return Err("Event not found".to_string());
    }

    Ok(())
}

/// Approve or reject a pending event. Same compare-and-swap guard as
/// submissions: only a pending event can be decided.
pub async fn decide_event(db: &MongoDB, event_id: &str, approve: bool) -> Result<Event, String> {
    let object_id = ObjectId::parse_str(event_id).map_err(|_| "Invalid event ID".to_string())?;

    let new_status = if approve { "approved" } else { "rejected" };

    let collection = db.collection::<Event>(COLLECTION);

    let updated = collection
        .find_one_and_update(
            doc! { "_id": object_id, "status": "pending" },
            doc! { "$set": {
                "status": new_status,
                "updated_at": chrono::Utc::now().timestamp(),
            }},
        )
        .return_document(mongodb::options::ReturnDocument::After)
        .await
        .map_err(|e| format!("Failed to update event: {}", e))?
        .ok_or_else(|| "Event is not in pending state".to_string())?;

    log::info!("📅 Event {} marked {}", event_id, new_status);

    Ok(updated)
}

pub async fn delete_event(db: &MongoDB, event_id: &str) -> Result<(), String> {
    let object_id = ObjectId::parse_str(event_id).map_err(|_| "Invalid event ID".to_string())?;

    let collection = db.collection::<Event>(COLLECTION);
    let result = collection
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|e| format!("Failed to delete event: {}", e))?;

    if result.deleted_count == 0 {
        return Err("Event not found".to_string());
    }

    Ok(())
}

/// Public pages list approved events only, soonest first
pub async fn list_events(db: &MongoDB, approved_only: bool) -> Result<Vec<Event>, String> {
    let filter = if approved_only {
        doc! { "status": "approved" }
    } else {
        doc! {}
    };

    let collection = db.collection::<Event>(COLLECTION);
    let mut cursor = collection
        .find(filter)
        .sort(doc! { "date": 1, "time": 1 })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut events = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(event) => events.push(event),
            Err(e) => log::error!("❌ Error reading event: {}", e),
        }
    }

    Ok(events)
}
