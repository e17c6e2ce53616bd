use crate::{
    database::MongoDB,
    models::{EmailToken, TokenAction, TokenError, TOKEN_TTL_SECS},
};
use mongodb::bson::doc;
use uuid::Uuid;

const COLLECTION: &str = "email_tokens";

/// Issues a single-use action token for a mentor request. The token id
/// is the capability — anyone holding it can act on the request until
/// it is used or expires.
pub async fn issue(
    db: &MongoDB,
    request_id: &str,
    mentor_email: &str,
    action: Option<TokenAction>,
) -> Result<EmailToken, String> {
    let now = chrono::Utc::now().timestamp();

    let token = EmailToken {
        id: None,
        token_id: Uuid::new_v4().to_string(),
        request_id: request_id.to_string(),
        mentor_email: mentor_email.to_string(),
        action,
        used: false,
        created_at: now,
        expires_at: now + TOKEN_TTL_SECS,
    };

    let collection = db.collection::<EmailToken>(COLLECTION);

    collection
        .insert_one(&token)
        .await
        .map_err(|e| format!("Failed to store token: {}", e))?;

    log::info!(
        "🎟️ Token issued for request {} -> {} (action: {:?})",
        request_id,
        mentor_email,
        token.action
    );

    Ok(token)
}

/// Read-only check used by the landing page. Expired tokens are deleted
/// lazily here so dead links clean up after themselves.
pub async fn verify(db: &MongoDB, token_id: &str) -> Result<EmailToken, TokenError> {
    let collection = db.collection::<EmailToken>(COLLECTION);

    let token = match collection.find_one(doc! { "token_id": token_id }).await {
        Ok(Some(token)) => token,
        Ok(None) => return Err(TokenError::NotFound),
        Err(e) => {
            log::error!("❌ Token lookup failed: {}", e);
            return Err(TokenError::Internal(format!("Token lookup failed: {}", e)));
        }
    };

    let now = chrono::Utc::now().timestamp();

    if token.is_expired_at(now) {
        // Best-effort lazy cleanup; the cron endpoint catches leftovers
        if let Err(e) = collection.delete_one(doc! { "token_id": token_id }).await {
            log::warn!("⚠️ Failed to delete expired token {}: {}", token_id, e);
        }
        return Err(TokenError::Expired);
    }

    if token.used {
        return Err(TokenError::AlreadyUsed);
    }

    Ok(token)
}

/// Atomically claims a token: flips used=false -> used=true in a single
/// conditional update so two concurrent clicks on the same emailed link
/// can never both succeed. Returns the claimed token.
pub async fn claim(db: &MongoDB, token_id: &str) -> Result<EmailToken, TokenError> {
    let collection = db.collection::<EmailToken>(COLLECTION);

    let claimed = match collection
        .find_one_and_update(
            doc! { "token_id": token_id, "used": false },
            doc! { "$set": { "used": true } },
        )
        .return_document(mongodb::options::ReturnDocument::After)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            log::error!("❌ Token claim failed: {}", e);
            return Err(TokenError::Internal(format!("Token claim failed: {}", e)));
        }
    };

    let token = match claimed {
        Some(token) => token,
        None => {
            // Either the token never existed or someone got there first —
            // disambiguate for the caller
            return match collection.find_one(doc! { "token_id": token_id }).await {
                Ok(Some(_)) => Err(TokenError::AlreadyUsed),
                Ok(None) => Err(TokenError::NotFound),
                Err(e) => Err(TokenError::Internal(format!("Token lookup failed: {}", e))),
            };
        }
    };

    let now = chrono::Utc::now().timestamp();
    if token.is_expired_at(now) {
        if let Err(e) = collection.delete_one(doc! { "token_id": token_id }).await {
            log::warn!("⚠️ Failed to delete expired token {}: {}", token_id, e);
        }
        return Err(TokenError::Expired);
    }

    log::info!("🎟️ Token {} claimed for request {}", token_id, token.request_id);

    Ok(token)
}

/// Deletes every token whose expiry has passed. Called by the cron
/// endpoint and the background cleanup job.
pub async fn cleanup_expired(db: &MongoDB) -> Result<u64, String> {
    let collection = db.collection::<EmailToken>(COLLECTION);
    let now = chrono::Utc::now().timestamp();

    let result = collection
        .delete_many(doc! { "expires_at": { "$lt": now } })
        .await
        .map_err(|e| format!("Failed to delete expired tokens: {}", e))?;

    if result.deleted_count > 0 {
        log::info!("🧹 Deleted {} expired tokens", result.deleted_count);
    }

    Ok(result.deleted_count)
}
