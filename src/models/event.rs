use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Incubator event (talks, demo days, workshops)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,
    pub description: String,

    /// Display date/time as entered by the admin (e.g. "2026-09-12", "18:30")
    pub date: String,
    pub time: String,

    pub venue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// pending | approved | rejected
    pub status: String,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub link: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        EventResponse {
            id: e.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: e.title,
            description: e.description,
            date: e.date,
            time: e.time,
            venue: e.venue,
            link: e.link,
            status: e.status,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
