use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Per-user fact record shown as a badge/inbox entry in the portals.
/// Created as a side effect of mentor-request transitions; mutated only
/// by the owning user marking it read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Recipient (auth uid)
    pub user_id: String,

    /// request_forwarded | request_rejected | mentorship_approved |
    /// mentorship_rejected | new_request
    pub kind: String,

    pub title: String,
    pub message: String,

    pub read: bool,

    /// MentorRequest this notification refers to (ObjectId hex)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub request_id: Option<String>,
    pub created_at: i64,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        NotificationResponse {
            id: n.id.map(|id| id.to_hex()).unwrap_or_default(),
            kind: n.kind,
            title: n.title,
            message: n.message,
            read: n.read,
            request_id: n.request_id,
            created_at: n.created_at,
        }
    }
}
