use crate::{
    database::MongoDB,
    models::{CreateStartupRequest, Startup, UpdateStartupRequest},
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

const COLLECTION: &str = "startups";

pub async fn create_startup(db: &MongoDB, request: &CreateStartupRequest) -> Result<String, String> {
    if request.name.trim().is_empty() {
        return Err("Missing required field: name".to_string());
    }

    let now = chrono::Utc::now().timestamp();

    let startup = Startup {
        id: None,
        name: request.name.trim().to_string(),
        tagline: request.tagline.clone(),
        description: request.description.clone(),
        website: request.website.clone(),
        logo_url: request.logo_url.clone(),
        sector: request.sector.clone(),
        founded_year: request.founded_year,
        created_at: now,
        updated_at: now,
    };

    let collection = db.collection::<Startup>(COLLECTION);
    let result = collection
        .insert_one(&startup)
        .await
        .map_err(|e| format!("Failed to create startup: {}", e))?;

    let id = result
        .inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .unwrap_or_default();

    log::info!("🚀 Startup added to showcase: {} -> {}", startup.name, id);

    Ok(id)
}

pub async fn update_startup(
    db: &MongoDB,
    startup_id: &str,
    request: &UpdateStartupRequest,
) -> Result<(), String> {
    let object_id =
        ObjectId::parse_str(startup_id).map_err(|_| "Invalid startup ID".to_string())?;

    let mut set = doc! { "updated_at": chrono::Utc::now().timestamp() };
    if let Some(v) = &request.name {
        set.insert("name", v);
    }
    if let Some(v) = &request.tagline {
        set.insert("tagline", v);
    }
    if let Some(v) = &request.description {
        set.insert("description", v);
    }
    if let Some(v) = &request.website {
        set.insert("website", v);
    }
    if let Some(v) = &request.logo_url {
        set.insert("logo_url", v);
    }
    if let Some(v) = &request.sector {
        set.insert("sector", v);
    }
    if let Some(v) = request.founded_year {
        set.insert("founded_year", v);
    }

    let collection = db.collection::<Startup>(COLLECTION);
    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await
        .map_err(|e| format!("Failed to update startup: {}", e))?;

    if result.matched_count == 0 {
        return Err("Startup not found".to_string());
    }

    Ok(())
}

pub async fn delete_startup(db: &MongoDB, startup_id: &str) -> Result<(), String> {
    let object_id =
        ObjectId::parse_str(startup_id).map_err(|_| "Invalid startup ID".to_string())?;

    let collection = db.collection::<Startup>(COLLECTION);
    let result = collection
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|e| format!("Failed to delete startup: {}", e))?;

    if result.deleted_count == 0 {
        return Err("Startup not found".to_string());
    }

    Ok(())
}

pub async fn list_startups(db: &MongoDB) -> Result<Vec<Startup>, String> {
    let collection = db.collection::<Startup>(COLLECTION);

    let mut cursor = collection
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut startups = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(startup) => startups.push(startup),
            Err(e) => log::error!("❌ Error reading startup: {}", e),
        }
    }

    Ok(startups)
}
