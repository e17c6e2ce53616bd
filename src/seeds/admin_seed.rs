use crate::database::MongoDB;
use crate::services::auth_service::User;
use bcrypt::{hash, DEFAULT_COST};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};

/// Seeds the bootstrap admin account on first start. Only runs when no
/// admin exists yet; credentials come from ADMIN_EMAIL/ADMIN_PASSWORD.
pub async fn seed_admin_user(db: &MongoDB) {
    let collection = db.collection::<User>("users");

    let count = collection
        .count_documents(doc! { "roles": "admin" })
        .await
        .unwrap_or(0);

    if count > 0 {
        log::info!("👤 Admin seed: {} admin(s) already in DB — skipping", count);
        return;
    }

    let email = match std::env::var("ADMIN_EMAIL") {
        Ok(email) => email,
        Err(_) => {
            log::warn!("👤 Admin seed: no admin in DB and ADMIN_EMAIL not set — skipping");
            return;
        }
    };
    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(password) => password,
        Err(_) => {
            log::warn!("👤 Admin seed: ADMIN_PASSWORD not set — skipping");
            return;
        }
    };

    let hashed = match hash(&password, DEFAULT_COST) {
        Ok(hashed) => hashed,
        Err(e) => {
            log::error!("   ❌ Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = User {
        _id: None,
        uid: ObjectId::new().to_hex(),
        email: email.clone(),
        password: Some(hashed),
        name: Some("Administrator".to_string()),
        roles: vec!["user".to_string(), "admin".to_string()],
        is_active: true,
        created_at: Some(BsonDateTime::now()),
        updated_at: Some(BsonDateTime::now()),
        last_login: None,
    };

    match collection.insert_one(&admin).await {
        Ok(_) => log::info!("   ✅ Bootstrap admin created: {}", email),
        Err(e) => log::error!("   ❌ Failed to seed admin user: {}", e),
    }
}
