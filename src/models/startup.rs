use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Showcase entry for the public site (plain CRUD, no lifecycle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Startup {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,
    pub tagline: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub sector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateStartupRequest {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub sector: String,
    pub founded_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStartupRequest {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub sector: Option<String>,
    pub founded_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct StartupResponse {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub sector: String,
    pub founded_year: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Startup> for StartupResponse {
    fn from(s: Startup) -> Self {
        StartupResponse {
            id: s.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: s.name,
            tagline: s.tagline,
            description: s.description,
            website: s.website,
            logo_url: s.logo_url,
            sector: s.sector,
            founded_year: s.founded_year,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
