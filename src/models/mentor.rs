use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Mentor core document.
///
/// Two generations coexist in the `mentors` collection: legacy flat docs
/// still carry the profile fields inline (kept here as Options), migrated
/// docs hold only the reduced core shape and point at a document in
/// `mentor_profiles` keyed by `uid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// PRIMARY IDENTIFIER - matches the auth provider uid
    pub uid: String,
    pub name: String,
    pub email: String,

    #[serde(default = "default_mentor_role")]
    pub role: String,
    /// active | inactive
    #[serde(default = "default_mentor_status")]
    pub status: String,

    // Legacy inline profile fields (absent on migrated docs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

fn default_mentor_role() -> String {
    "mentor".to_string()
}

fn default_mentor_status() -> String {
    "active".to_string()
}

/// Profile sub-document (`mentor_profiles` collection, keyed by mentor uid)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// uid of the owning mentor core doc
    pub mentor_uid: String,

    pub designation: String,
    pub expertise: String,
    pub bio: String,
    pub avatar_url: String,
    pub phone: String,
    pub linkedin: String,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateMentorRequest {
    pub uid: Option<String>,
    pub name: String,
    pub email: String,
    pub designation: Option<String>,
    pub expertise: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMentorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub designation: Option<String>,
    pub expertise: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

/// Public-facing mentor card: core + profile merged, with legacy fallback
#[derive(Debug, Serialize)]
pub struct MentorCard {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub status: String,
    pub designation: String,
    pub expertise: String,
    pub bio: String,
    pub avatar_url: String,
    pub linkedin: String,
}

/// Summary returned by POST /api/admin/migrate-mentors
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    pub migrated_count: usize,
    pub skipped_count: usize,
    pub results: Vec<MigrationResult>,
}

#[derive(Debug, Serialize)]
pub struct MigrationResult {
    pub uid: String,
    /// "migrated" | "skipped"
    pub outcome: String,
}
