use crate::{
    database::MongoDB,
    models::{
        CreateMentorRequest, Mentor, MentorCard, MentorProfile, MigrationResult,
        MigrationSummary, UpdateMentorRequest,
    },
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

const MENTORS: &str = "mentors";
const PROFILES: &str = "mentor_profiles";

/// Creates a mentor in the migrated shape: core doc + profile subdoc
pub async fn create_mentor(db: &MongoDB, request: &CreateMentorRequest) -> Result<String, String> {
    if request.name.trim().is_empty() {
        return Err("Missing required field: name".to_string());
    }
    if request.email.trim().is_empty() {
        return Err("Missing required field: email".to_string());
    }

    let uid = request
        .uid
        .clone()
        .unwrap_or_else(|| ObjectId::new().to_hex());

    let mentors = db.collection::<Mentor>(MENTORS);

    if mentors
        .find_one(doc! { "uid": &uid })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .is_some()
    {
        return Err(format!("Mentor {} already exists", uid));
    }

    let now = chrono::Utc::now().timestamp();

    let core = Mentor {
        id: None,
        uid: uid.clone(),
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        role: "mentor".to_string(),
        status: "active".to_string(),
        designation: None,
        expertise: None,
        bio: None,
        avatar_url: None,
        phone: None,
        linkedin: None,
        created_at: now,
        updated_at: now,
    };

    let profile = MentorProfile {
        id: None,
        mentor_uid: uid.clone(),
        designation: request.designation.clone().unwrap_or_default(),
        expertise: request.expertise.clone().unwrap_or_default(),
        bio: request.bio.clone().unwrap_or_default(),
        avatar_url: request.avatar_url.clone().unwrap_or_default(),
        phone: request.phone.clone().unwrap_or_default(),
        linkedin: request.linkedin.clone().unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    // Both writes inside one transaction so a crash can't leave a core
    // doc without its profile
    let mut session = db
        .client()
        .start_session()
        .await
        .map_err(|e| format!("Failed to start session: {}", e))?;
    session
        .start_transaction()
        .await
        .map_err(|e| format!("Failed to start transaction: {}", e))?;

    let write = async {
        mentors
            .insert_one(&core)
            .session(&mut session)
            .await
            .map_err(|e| format!("Failed to insert mentor: {}", e))?;
        db.collection::<MentorProfile>(PROFILES)
            .insert_one(&profile)
            .session(&mut session)
            .await
            .map_err(|e| format!("Failed to insert mentor profile: {}", e))?;
        Ok::<(), String>(())
    }
    .await;

    match write {
        Ok(()) => {
            session
                .commit_transaction()
                .await
                .map_err(|e| format!("Failed to commit transaction: {}", e))?;
        }
        Err(e) => {
            let _ = session.abort_transaction().await;
            return Err(e);
        }
    }

    log::info!("🧑‍🏫 Mentor created: {} ({})", request.name, uid);

    Ok(uid)
}

/// Updates core and/or profile fields of a mentor
pub async fn update_mentor(
    db: &MongoDB,
    uid: &str,
    request: &UpdateMentorRequest,
) -> Result<(), String> {
    let now = chrono::Utc::now().timestamp();

    let mut core_set = doc! { "updated_at": now };
    if let Some(name) = &request.name {
        core_set.insert("name", name);
    }
    if let Some(email) = &request.email {
        core_set.insert("email", email);
    }
    if let Some(status) = &request.status {
        if status != "active" && status != "inactive" {
            return Err(format!("Invalid status '{}'", status));
        }
        core_set.insert("status", status);
    }

    let mentors = db.collection::<Mentor>(MENTORS);
    let result = mentors
        .update_one(doc! { "uid": uid }, doc! { "$set": core_set })
        .await
        .map_err(|e| format!("Failed to update mentor: {}", e))?;

    if result.matched_count == 0 {
        return Err("Mentor not found".to_string());
    }

    let mut profile_set = doc! { "updated_at": now };
    if let Some(v) = &request.designation {
        profile_set.insert("designation", v);
    }
    if let Some(v) = &request.expertise {
        profile_set.insert("expertise", v);
    }
    if let Some(v) = &request.bio {
        profile_set.insert("bio", v);
    }
    if let Some(v) = &request.avatar_url {
        profile_set.insert("avatar_url", v);
    }
    if let Some(v) = &request.phone {
        profile_set.insert("phone", v);
    }
    if let Some(v) = &request.linkedin {
        profile_set.insert("linkedin", v);
    }

    if profile_set.len() > 1 {
        db.collection::<MentorProfile>(PROFILES)
            .update_one(doc! { "mentor_uid": uid }, doc! { "$set": profile_set })
            .await
            .map_err(|e| format!("Failed to update mentor profile: {}", e))?;
    }

    Ok(())
}

pub async fn delete_mentor(db: &MongoDB, uid: &str) -> Result<(), String> {
    let mentors = db.collection::<Mentor>(MENTORS);

    let result = mentors
        .delete_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Failed to delete mentor: {}", e))?;

    if result.deleted_count == 0 {
        return Err("Mentor not found".to_string());
    }

    // Profile is best-effort: an orphaned profile is harmless and the
    // migration skip check keys off profile existence, not the reverse
    if let Err(e) = db
        .collection::<MentorProfile>(PROFILES)
        .delete_one(doc! { "mentor_uid": uid })
        .await
    {
        log::warn!("⚠️ Failed to delete profile for {}: {}", uid, e);
    }

    log::info!("🗑️ Mentor deleted: {}", uid);

    Ok(())
}

pub async fn get_mentor(db: &MongoDB, uid: &str) -> Result<MentorCard, String> {
    let mentor = db
        .collection::<Mentor>(MENTORS)
        .find_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "Mentor not found".to_string())?;

    let profile = db
        .collection::<MentorProfile>(PROFILES)
        .find_one(doc! { "mentor_uid": uid })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(merge_card(mentor, profile))
}

/// Lists mentors as public-facing cards. Migrated mentors read from
/// their profile subdoc; legacy flat docs fall back to inline fields.
pub async fn list_mentor_cards(db: &MongoDB, only_active: bool) -> Result<Vec<MentorCard>, String> {
    let filter = if only_active {
        doc! { "status": "active" }
    } else {
        doc! {}
    };

    let mut cursor = db
        .collection::<Mentor>(MENTORS)
        .find(filter)
        .sort(doc! { "name": 1 })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let profiles = db.collection::<MentorProfile>(PROFILES);
    let mut cards = Vec::new();

    while let Some(result) = cursor.next().await {
        match result {
            Ok(mentor) => {
                let profile = profiles
                    .find_one(doc! { "mentor_uid": &mentor.uid })
                    .await
                    .map_err(|e| format!("Database error: {}", e))?;
                cards.push(merge_card(mentor, profile));
            }
            Err(e) => log::error!("❌ Error reading mentor: {}", e),
        }
    }

    Ok(cards)
}

fn merge_card(mentor: Mentor, profile: Option<MentorProfile>) -> MentorCard {
    match profile {
        Some(p) => MentorCard {
            uid: mentor.uid,
            name: mentor.name,
            email: mentor.email,
            status: mentor.status,
            designation: p.designation,
            expertise: p.expertise,
            bio: p.bio,
            avatar_url: p.avatar_url,
            linkedin: p.linkedin,
        },
        None => MentorCard {
            uid: mentor.uid,
            name: mentor.name,
            email: mentor.email,
            status: mentor.status,
            designation: mentor.designation.unwrap_or_default(),
            expertise: mentor.expertise.unwrap_or_default(),
            bio: mentor.bio.unwrap_or_default(),
            avatar_url: mentor.avatar_url.unwrap_or_default(),
            linkedin: mentor.linkedin.unwrap_or_default(),
        },
    }
}

/// Moves every legacy flat mentor doc to the {core, profile} layout.
/// Idempotent: docs whose profile already exists are skipped, so a
/// second run reports migratedCount=0 and skippedCount=total.
pub async fn migrate_mentors(db: &MongoDB) -> Result<MigrationSummary, String> {
    log::info!("🚚 Starting mentor schema migration...");

    let mentors = db.collection::<Mentor>(MENTORS);
    let profiles = db.collection::<MentorProfile>(PROFILES);

    let mut cursor = mentors
        .find(doc! {})
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut migrated_count = 0;
    let mut skipped_count = 0;
    let mut results = Vec::new();

    while let Some(result) = cursor.next().await {
        let mentor = match result {
            Ok(mentor) => mentor,
            Err(e) => {
                log::error!("❌ Error reading mentor doc: {}", e);
                continue;
            }
        };

        let existing_profile = profiles
            .find_one(doc! { "mentor_uid": &mentor.uid })
            .await
            .map_err(|e| format!("Database error: {}", e))?;

        if existing_profile.is_some() {
            skipped_count += 1;
            results.push(MigrationResult {
                uid: mentor.uid.clone(),
                outcome: "skipped".to_string(),
            });
            continue;
        }

        migrate_one(db, &mentor).await?;

        migrated_count += 1;
        results.push(MigrationResult {
            uid: mentor.uid.clone(),
            outcome: "migrated".to_string(),
        });
        log::info!("   ✅ Migrated mentor {}", mentor.uid);
    }

    log::info!(
        "🚚 Migration finished: {} migrated, {} skipped",
        migrated_count,
        skipped_count
    );

    Ok(MigrationSummary {
        migrated_count,
        skipped_count,
        results,
    })
}

/// One mentor: build the profile from legacy fields (absent -> empty
/// string), write it, and rewrite the core doc to the reduced shape.
/// Both writes run in one transaction — all-or-nothing.
async fn migrate_one(db: &MongoDB, mentor: &Mentor) -> Result<(), String> {
    let now = chrono::Utc::now().timestamp();

    let profile = MentorProfile {
        id: None,
        mentor_uid: mentor.uid.clone(),
        designation: mentor.designation.clone().unwrap_or_default(),
        expertise: mentor.expertise.clone().unwrap_or_default(),
        bio: mentor.bio.clone().unwrap_or_default(),
        avatar_url: mentor.avatar_url.clone().unwrap_or_default(),
        phone: mentor.phone.clone().unwrap_or_default(),
        linkedin: mentor.linkedin.clone().unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    let reduced = Mentor {
        id: None,
        uid: mentor.uid.clone(),
        name: mentor.name.clone(),
        email: mentor.email.clone(),
        role: mentor.role.clone(),
        status: mentor.status.clone(),
        designation: None,
        expertise: None,
        bio: None,
        avatar_url: None,
        phone: None,
        linkedin: None,
        created_at: mentor.created_at,
        updated_at: now,
    };

    let mut session = db
        .client()
        .start_session()
        .await
        .map_err(|e| format!("Failed to start session: {}", e))?;
    session
        .start_transaction()
        .await
        .map_err(|e| format!("Failed to start transaction: {}", e))?;

    let write = async {
        db.collection::<MentorProfile>(PROFILES)
            .insert_one(&profile)
            .session(&mut session)
            .await
            .map_err(|e| format!("Failed to insert profile for {}: {}", mentor.uid, e))?;
        db.collection::<Mentor>(MENTORS)
            .replace_one(doc! { "uid": &mentor.uid }, &reduced)
            .session(&mut session)
            .await
            .map_err(|e| format!("Failed to rewrite core doc for {}: {}", mentor.uid, e))?;
        Ok::<(), String>(())
    }
    .await;

    match write {
        Ok(()) => session
            .commit_transaction()
            .await
            .map_err(|e| format!("Failed to commit migration for {}: {}", mentor.uid, e)),
        Err(e) => {
            let _ = session.abort_transaction().await;
            Err(e)
        }
    }
}
