use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Applicant submission from the public contact form (stored in MongoDB)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Applicant full name
    pub full_name: String,

    /// What the applicant is asking for (incubation, partnership, ...)
    pub nature_of_inquiry: String,

    pub company_name: String,
    pub company_email: String,

    /// Comma-separated founder names as typed into the form
    pub founder_names: String,
    pub founder_bio: String,

    pub startup_idea: String,
    pub uniqueness: String,

    /// Classification — validated against the fixed enumerations
    pub domain: String,
    pub sector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<i32>,

    /// "campus" or "off-campus"
    pub campus_status: String,

    /// pending | accepted | rejected — only admins move this
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<String>,

    /// Unix timestamps
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for POST /api/contact-submissions
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionRequest {
    pub full_name: Option<String>,
    pub nature_of_inquiry: Option<String>,
    pub company_name: Option<String>,
    pub company_email: Option<String>,
    pub founder_names: Option<String>,
    pub founder_bio: Option<String>,
    pub startup_idea: Option<String>,
    pub uniqueness: Option<String>,
    pub domain: Option<String>,
    pub sector: Option<String>,
    pub legal_status: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub team_size: Option<i32>,
    pub campus_status: Option<String>,
}

/// Response shape returned to the admin console
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub full_name: String,
    pub nature_of_inquiry: String,
    pub company_name: String,
    pub company_email: String,
    pub founder_names: String,
    pub founder_bio: String,
    pub startup_idea: String,
    pub uniqueness: String,
    pub domain: String,
    pub sector: String,
    pub legal_status: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub team_size: Option<i32>,
    pub campus_status: String,
    pub status: String,
    pub processed_at: Option<i64>,
    pub processed_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        SubmissionResponse {
            id: s.id.map(|id| id.to_hex()).unwrap_or_default(),
            full_name: s.full_name,
            nature_of_inquiry: s.nature_of_inquiry,
            company_name: s.company_name,
            company_email: s.company_email,
            founder_names: s.founder_names,
            founder_bio: s.founder_bio,
            startup_idea: s.startup_idea,
            uniqueness: s.uniqueness,
            domain: s.domain,
            sector: s.sector,
            legal_status: s.legal_status,
            phone: s.phone,
            website: s.website,
            team_size: s.team_size,
            campus_status: s.campus_status,
            status: s.status,
            processed_at: s.processed_at,
            processed_by: s.processed_by,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
