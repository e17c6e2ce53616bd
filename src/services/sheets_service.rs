use crate::{
    database::MongoDB,
    models::{ContactSubmissionRequest, Submission},
    services::submission_service,
};
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
}

#[derive(Debug, Serialize)]
struct ServiceAccountClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: usize,
    exp: usize,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Reads GOOGLE_SERVICE_ACCOUNT_KEY_JSON (raw JSON or base64-wrapped)
fn load_service_account_key() -> Result<ServiceAccountKey, String> {
    let raw = std::env::var("GOOGLE_SERVICE_ACCOUNT_KEY_JSON")
        .map_err(|_| "GOOGLE_SERVICE_ACCOUNT_KEY_JSON not configured".to_string())?;

    let json = if raw.trim_start().starts_with('{') {
        raw
    } else {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(raw.trim())
            .map_err(|e| format!("Failed to decode service account key: {}", e))?;
        String::from_utf8(decoded)
            .map_err(|e| format!("Service account key is not valid UTF-8: {}", e))?
    };

    serde_json::from_str(&json).map_err(|e| format!("Failed to parse service account key: {}", e))
}

/// Exchanges a signed service-account JWT for a short-lived access token
async fn fetch_access_token(key: &ServiceAccountKey) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;

    let claims = ServiceAccountClaims {
        iss: key.client_email.clone(),
        scope: SHEETS_SCOPE.to_string(),
        aud: GOOGLE_TOKEN_URL.to_string(),
        iat,
        exp: iat + 3600,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| format!("Invalid service account private key: {}", e))?;

    let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| format!("Failed to sign service account JWT: {}", e))?;

    let client = reqwest::Client::new();
    let token_response = client
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await
        .map_err(|e| format!("Failed to exchange service account JWT: {}", e))?;

    if !token_response.status().is_success() {
        return Err(format!(
            "Google token endpoint returned {}",
            token_response.status()
        ));
    }

    let tokens: serde_json::Value = token_response
        .json()
        .await
        .map_err(|e| format!("Failed to parse token response: {}", e))?;

    tokens["access_token"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| "No access token in response".to_string())
}

/// Fetches the configured sheet range as rows of cell strings
async fn fetch_rows(access_token: &str) -> Result<Vec<Vec<String>>, String> {
    let spreadsheet_id = std::env::var("SHEETS_SPREADSHEET_ID")
        .map_err(|_| "SHEETS_SPREADSHEET_ID not configured".to_string())?;
    let range =
        std::env::var("SHEETS_RANGE").unwrap_or_else(|_| "Submissions!A2:L".to_string());

    let url = format!(
        "{}/{}/values/{}",
        SHEETS_API_BASE,
        spreadsheet_id,
        urlencoding::encode(&range)
    );

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch sheet values: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("Sheets API returned {}", response.status()));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse sheet values: {}", e))?;

    let rows = body["values"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    row.as_array()
                        .map(|cells| {
                            cells
                                .iter()
                                .map(|c| c.as_str().unwrap_or_default().to_string())
                                .collect()
                        })
                        .unwrap_or_default()
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(rows)
}

fn cell(row: &[String], index: usize) -> Option<String> {
    row.get(index)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Column order matches the export of the public form:
/// fullName, natureOfInquiry, companyName, companyEmail, founderNames,
/// founderBio, startupIdea, uniqueness, domain, sector, legalStatus, phone
fn row_to_request(row: &[String]) -> ContactSubmissionRequest {
    ContactSubmissionRequest {
        full_name: cell(row, 0),
        nature_of_inquiry: cell(row, 1),
        company_name: cell(row, 2),
        company_email: cell(row, 3),
        founder_names: cell(row, 4),
        founder_bio: cell(row, 5),
        startup_idea: cell(row, 6),
        uniqueness: cell(row, 7),
        domain: cell(row, 8),
        sector: cell(row, 9),
        legal_status: cell(row, 10),
        phone: cell(row, 11),
        website: None,
        team_size: None,
        campus_status: None,
    }
}

/// Imports spreadsheet rows as pending submissions. Rows that fail
/// validation or whose company email already exists are skipped, not
/// fatal — the summary tells the admin what happened.
pub async fn import_submissions(db: &MongoDB) -> Result<ImportSummary, String> {
    log::info!("📥 Importing submissions from spreadsheet...");

    let key = load_service_account_key()?;
    let access_token = fetch_access_token(&key).await?;
    let rows = fetch_rows(&access_token).await?;

    let collection = db.collection::<Submission>("submissions");

    let mut imported = 0;
    let mut skipped = 0;

    for (index, row) in rows.iter().enumerate() {
        let request = row_to_request(row);

        let submission = match submission_service::validate_submission(&request) {
            Ok(submission) => submission,
            Err(e) => {
                log::warn!("⚠️ Row {} skipped: {}", index + 2, e);
                skipped += 1;
                continue;
            }
        };

        if submission_service::submission_exists(db, &submission.company_email).await? {
            log::debug!(
                "ℹ️ Row {} skipped: {} already submitted",
                index + 2,
                submission.company_email
            );
            skipped += 1;
            continue;
        }

        collection
            .insert_one(&submission)
            .await
            .map_err(|e| format!("Failed to insert imported submission: {}", e))?;
        imported += 1;
    }

    log::info!(
        "📥 Spreadsheet import done: {} imported, {} skipped",
        imported,
        skipped
    );

    Ok(ImportSummary { imported, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_mapping_trims_and_drops_blanks() {
        let row: Vec<String> = vec![
            " Asha Rao ", "Incubation", "PayTrellis", "founders@paytrellis.io",
            "Asha, Vikram", "Ex-payments engineers", "UPI invoicing", "Offline-first",
            "FinTech", "Finance", "", "  ",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let request = row_to_request(&row);
        assert_eq!(request.full_name.as_deref(), Some("Asha Rao"));
        assert_eq!(request.domain.as_deref(), Some("FinTech"));
        assert!(request.legal_status.is_none());
        assert!(request.phone.is_none());
    }

    #[test]
    fn test_short_row_maps_to_missing_fields() {
        let row: Vec<String> = vec!["Asha Rao".to_string(), "Incubation".to_string()];
        let request = row_to_request(&row);
        assert!(request.company_name.is_none());
        assert!(request.domain.is_none());
    }
}
