use crate::{
    database::MongoDB,
    models::{ContactSubmissionRequest, Submission},
};
use lazy_static::lazy_static;
use mongodb::bson::{doc, oid::ObjectId};
use std::collections::HashSet;

const COLLECTION: &str = "submissions";

lazy_static! {
    static ref DOMAINS: HashSet<&'static str> = [
        "HealthTech", "FinTech", "EdTech", "AgriTech", "CleanTech",
        "DeepTech", "SaaS", "ECommerce", "Logistics", "Other",
    ]
    .into_iter()
    .collect();

    static ref SECTORS: HashSet<&'static str> = [
        "Technology", "Healthcare", "Financial Services", "Education", "Agriculture",
        "Energy", "Manufacturing", "Retail", "Services", "Other",
    ]
    .into_iter()
    .collect();

    static ref LEGAL_STATUSES: HashSet<&'static str> = [
        "MSME SSI", "LLP", "Private Limited", "Partnership",
        "Proprietorship", "Unregistered", "Other",
    ]
    .into_iter()
    .collect();
}

/// Validates the public form body and builds the document to store.
/// Returns a user-correctable message naming the offending field.
pub fn validate_submission(request: &ContactSubmissionRequest) -> Result<Submission, String> {
    let required: [(&str, &Option<String>); 10] = [
        ("fullName", &request.full_name),
        ("natureOfInquiry", &request.nature_of_inquiry),
        ("companyName", &request.company_name),
        ("companyEmail", &request.company_email),
        ("founderNames", &request.founder_names),
        ("founderBio", &request.founder_bio),
        ("startupIdea", &request.startup_idea),
        ("uniqueness", &request.uniqueness),
        ("domain", &request.domain),
        ("sector", &request.sector),
    ];

    for (name, value) in required {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => return Err(format!("Missing required field: {}", name)),
        }
    }

    let domain = request.domain.as_deref().unwrap_or_default().trim();
    if !DOMAINS.contains(domain) {
        return Err(format!(
            "Invalid domain '{}'. Allowed values: {}",
            domain,
            sorted_values(&DOMAINS)
        ));
    }

    let sector = request.sector.as_deref().unwrap_or_default().trim();
    if !SECTORS.contains(sector) {
        return Err(format!(
            "Invalid sector '{}'. Allowed values: {}",
            sector,
            sorted_values(&SECTORS)
        ));
    }

    let legal_status = match request.legal_status.as_deref().map(str::trim) {
        Some(ls) if !ls.is_empty() => {
            if !LEGAL_STATUSES.contains(ls) {
                return Err(format!(
                    "Invalid legalStatus '{}'. Allowed values: {}",
                    ls,
                    sorted_values(&LEGAL_STATUSES)
                ));
            }
            Some(ls.to_string())
        }
        _ => None,
    };

    let now = chrono::Utc::now().timestamp();

    Ok(Submission {
        id: None,
        full_name: request.full_name.clone().unwrap_or_default().trim().to_string(),
        nature_of_inquiry: request.nature_of_inquiry.clone().unwrap_or_default().trim().to_string(),
        company_name: request.company_name.clone().unwrap_or_default().trim().to_string(),
        company_email: request.company_email.clone().unwrap_or_default().trim().to_string(),
        founder_names: request.founder_names.clone().unwrap_or_default().trim().to_string(),
        founder_bio: request.founder_bio.clone().unwrap_or_default().trim().to_string(),
        startup_idea: request.startup_idea.clone().unwrap_or_default().trim().to_string(),
        uniqueness: request.uniqueness.clone().unwrap_or_default().trim().to_string(),
        domain: domain.to_string(),
        sector: sector.to_string(),
        legal_status,
        phone: request.phone.clone(),
        website: request.website.clone(),
        team_size: request.team_size,
        campus_status: request
            .campus_status
            .clone()
            .unwrap_or_else(|| "campus".to_string()),
        status: "pending".to_string(),
        processed_at: None,
        processed_by: None,
        created_at: now,
        updated_at: now,
    })
}

fn sorted_values(set: &HashSet<&'static str>) -> String {
    let mut values: Vec<&str> = set.iter().copied().collect();
    values.sort_unstable();
    values.join(", ")
}

/// Validates and stores a public form submission, returning the new id
pub async fn create_submission(
    db: &MongoDB,
    request: &ContactSubmissionRequest,
) -> Result<String, String> {
    let submission = validate_submission(request)?;

    let collection = db.collection::<Submission>(COLLECTION);

    let result = collection
        .insert_one(&submission)
        .await
        .map_err(|e| format!("Failed to store submission: {}", e))?;

    let id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    log::info!(
        "📨 Submission stored: {} ({}) -> {}",
        submission.company_name,
        submission.company_email,
        id
    );

    Ok(id)
}

/// Accept or reject a pending submission. The filter matches on
/// status=pending so an already-decided submission is never processed
/// twice (compare-and-swap on status).
pub async fn decide_submission(
    db: &MongoDB,
    submission_id: &str,
    accept: bool,
    admin_uid: &str,
) -> Result<Submission, String> {
    let object_id = ObjectId::parse_str(submission_id)
        .map_err(|_| "Invalid submission ID".to_string())?;

    let new_status = if accept { "accepted" } else { "rejected" };
    let now = chrono::Utc::now().timestamp();

    let collection = db.collection::<Submission>(COLLECTION);

    let filter = doc! { "_id": object_id, "status": "pending" };
    let update = doc! {
        "$set": {
            "status": new_status,
            "processed_at": now,
            "processed_by": admin_uid,
            "updated_at": now,
        }
    };

    let updated = collection
        .find_one_and_update(filter, update)
        .return_document(mongodb::options::ReturnDocument::After)
        .await
        .map_err(|e| format!("Failed to update submission: {}", e))?
        .ok_or_else(|| "Submission is not in pending state".to_string())?;

    log::info!(
        "⚖️ Submission {} marked {} by {}",
        submission_id,
        new_status,
        admin_uid
    );

    Ok(updated)
}

/// Checks whether a submission with this company email already exists.
/// Used by the spreadsheet import to skip duplicate rows.
pub async fn submission_exists(db: &MongoDB, company_email: &str) -> Result<bool, String> {
    let collection = db.collection::<Submission>(COLLECTION);

    let existing = collection
        .find_one(doc! { "company_email": company_email })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(existing.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> ContactSubmissionRequest {
        ContactSubmissionRequest {
            full_name: Some("Asha Rao".to_string()),
            nature_of_inquiry: Some("Incubation".to_string()),
            company_name: Some("PayTrellis".to_string()),
            company_email: Some("founders@paytrellis.io".to_string()),
            founder_names: Some("Asha Rao, Vikram Shah".to_string()),
            founder_bio: Some("Ex-payments engineers".to_string()),
            startup_idea: Some("UPI-native invoicing for micro merchants".to_string()),
            uniqueness: Some("Offline-first settlement".to_string()),
            domain: Some("FinTech".to_string()),
            sector: Some("Financial Services".to_string()),
            legal_status: None,
            phone: None,
            website: None,
            team_size: Some(4),
            campus_status: None,
        }
    }

    #[test]
    fn test_valid_submission_defaults() {
        let submission = validate_submission(&complete_request()).unwrap();
        assert_eq!(submission.status, "pending");
        assert_eq!(submission.campus_status, "campus");
        assert_eq!(submission.domain, "FinTech");
    }

    #[test]
    fn test_fintech_financial_services_body_accepted() {
        // Complete body classified FinTech / Financial Services must pass
        let mut request = complete_request();
        request.domain = Some("FinTech".to_string());
        request.sector = Some("Financial Services".to_string());
        let submission = validate_submission(&request).unwrap();
        assert_eq!(submission.domain, "FinTech");
        assert_eq!(submission.sector, "Financial Services");
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let mut request = complete_request();
        request.founder_bio = None;
        let err = validate_submission(&request).unwrap_err();
        assert_eq!(err, "Missing required field: founderBio");

        let mut request = complete_request();
        request.company_email = Some("   ".to_string());
        let err = validate_submission(&request).unwrap_err();
        assert_eq!(err, "Missing required field: companyEmail");
    }

    #[test]
    fn test_domain_outside_fixed_set_rejected() {
        let mut request = complete_request();
        request.domain = Some("SpaceTech".to_string());
        let err = validate_submission(&request).unwrap_err();
        assert!(err.starts_with("Invalid domain 'SpaceTech'"));
    }

    #[test]
    fn test_sector_outside_fixed_set_rejected() {
        let mut request = complete_request();
        request.sector = Some("Aerospace".to_string());
        let err = validate_submission(&request).unwrap_err();
        assert!(err.starts_with("Invalid sector 'Aerospace'"));
    }

    #[test]
    fn test_optional_legal_status_validated_when_present() {
        let mut request = complete_request();
        request.legal_status = Some("LLP".to_string());
        let submission = validate_submission(&request).unwrap();
        assert_eq!(submission.legal_status.as_deref(), Some("LLP"));

        request.legal_status = Some("Sole Trader".to_string());
        let err = validate_submission(&request).unwrap_err();
        assert!(err.starts_with("Invalid legalStatus"));
    }
}
