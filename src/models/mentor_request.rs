use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a user-to-mentor mentoring request.
///
/// pending ──► admin_approved ──► mentor_approved
///    │              │
///    │              └─────────► mentor_rejected
///    └────► admin_rejected
///
/// admin_rejected, mentor_approved and mentor_rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    AdminApproved,
    AdminRejected,
    MentorApproved,
    MentorRejected,
}

impl RequestStatus {
    /// Source state a transition into `self` must start from.
    /// Pending has no source (it is the initial state).
    pub fn required_source(&self) -> Option<RequestStatus> {
        match self {
            RequestStatus::Pending => None,
            RequestStatus::AdminApproved | RequestStatus::AdminRejected => {
                Some(RequestStatus::Pending)
            }
            RequestStatus::MentorApproved | RequestStatus::MentorRejected => {
                Some(RequestStatus::AdminApproved)
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::AdminRejected
                | RequestStatus::MentorApproved
                | RequestStatus::MentorRejected
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::AdminApproved => "admin_approved",
            RequestStatus::AdminRejected => "admin_rejected",
            RequestStatus::MentorApproved => "mentor_approved",
            RequestStatus::MentorRejected => "mentor_rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mentoring request (stored in `mentor_requests`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Requesting user (auth uid)
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,

    /// Target mentor (mentor core doc uid)
    pub mentor_id: String,

    /// Free text from the user explaining what they want mentoring on
    pub message: String,

    pub status: RequestStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_processed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_by_admin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_processed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_notes: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateMentorRequestBody {
    pub mentor_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DecisionBody {
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MentorRequestResponse {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub mentor_id: String,
    pub message: String,
    pub status: RequestStatus,
    pub admin_processed_at: Option<i64>,
    pub admin_notes: Option<String>,
    pub mentor_processed_at: Option<i64>,
    pub mentor_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<MentorRequest> for MentorRequestResponse {
    fn from(r: MentorRequest) -> Self {
        MentorRequestResponse {
            id: r.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: r.user_id,
            user_name: r.user_name,
            user_email: r.user_email,
            mentor_id: r.mentor_id,
            message: r.message,
            status: r.status,
            admin_processed_at: r.admin_processed_at,
            admin_notes: r.admin_notes,
            mentor_processed_at: r.mentor_processed_at,
            mentor_notes: r.mentor_notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_sources() {
        assert_eq!(RequestStatus::Pending.required_source(), None);
        assert_eq!(
            RequestStatus::AdminApproved.required_source(),
            Some(RequestStatus::Pending)
        );
        assert_eq!(
            RequestStatus::AdminRejected.required_source(),
            Some(RequestStatus::Pending)
        );
        assert_eq!(
            RequestStatus::MentorApproved.required_source(),
            Some(RequestStatus::AdminApproved)
        );
        assert_eq!(
            RequestStatus::MentorRejected.required_source(),
            Some(RequestStatus::AdminApproved)
        );
    }

    #[test]
    fn test_mentor_decision_requires_admin_approval_first() {
        // A pending request must not be decidable by the mentor gate
        let target = RequestStatus::MentorApproved;
        assert_ne!(target.required_source(), Some(RequestStatus::Pending));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::AdminApproved.is_terminal());
        assert!(RequestStatus::AdminRejected.is_terminal());
        assert!(RequestStatus::MentorApproved.is_terminal());
        assert!(RequestStatus::MentorRejected.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::AdminApproved).unwrap(),
            "\"admin_approved\""
        );
        let parsed: RequestStatus = serde_json::from_str("\"mentor_rejected\"").unwrap();
        assert_eq!(parsed, RequestStatus::MentorRejected);
    }
}
