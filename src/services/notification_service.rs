use crate::{database::MongoDB, models::Notification};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

const COLLECTION: &str = "notifications";

/// Writes a notification fact for a user. Called as a side effect of
/// mentor-request transitions; failures are returned to the caller so
/// the transition handler can decide whether to surface them.
pub async fn notify(
    db: &MongoDB,
    user_id: &str,
    kind: &str,
    title: &str,
    message: &str,
    request_id: Option<&str>,
) -> Result<(), String> {
    let collection = db.collection::<Notification>(COLLECTION);

    let notification = Notification {
        id: None,
        user_id: user_id.to_string(),
        kind: kind.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        read: false,
        request_id: request_id.map(|r| r.to_string()),
        created_at: chrono::Utc::now().timestamp(),
    };

    collection
        .insert_one(&notification)
        .await
        .map_err(|e| format!("Failed to create notification: {}", e))?;

    log::debug!("🔔 Notification '{}' created for user {}", kind, user_id);

    Ok(())
}

/// Unread before read, newest first within each group. Served by the
/// (user_id, read) index.
fn inbox_sort() -> mongodb::bson::Document {
    doc! { "read": 1, "created_at": -1 }
}

/// Lists a user's notifications in inbox order
pub async fn list_for_user(db: &MongoDB, user_id: &str) -> Result<Vec<Notification>, String> {
    let collection = db.collection::<Notification>(COLLECTION);

    let mut cursor = collection
        .find(doc! { "user_id": user_id })
        .sort(inbox_sort())
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut notifications = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(notification) => notifications.push(notification),
            Err(e) => log::error!("❌ Error reading notification: {}", e),
        }
    }

    Ok(notifications)
}

pub async fn unread_count(db: &MongoDB, user_id: &str) -> Result<u64, String> {
    let collection = db.collection::<Notification>(COLLECTION);

    collection
        .count_documents(doc! { "user_id": user_id, "read": false })
        .await
        .map_err(|e| format!("Database error: {}", e))
}

/// Marks one notification read. Owner-guarded: the filter includes the
/// user_id so nobody can flip another user's badge.
pub async fn mark_read(db: &MongoDB, user_id: &str, notification_id: &str) -> Result<(), String> {
    let object_id = ObjectId::parse_str(notification_id)
        .map_err(|_| "Invalid notification ID".to_string())?;

    let collection = db.collection::<Notification>(COLLECTION);

    let result = collection
        .update_one(
            doc! { "_id": object_id, "user_id": user_id },
            doc! { "$set": { "read": true } },
        )
        .await
        .map_err(|e| format!("Failed to mark notification read: {}", e))?;

    if result.matched_count == 0 {
        return Err("Notification not found".to_string());
    }

    Ok(())
}

pub async fn mark_all_read(db: &MongoDB, user_id: &str) -> Result<u64, String> {
    let collection = db.collection::<Notification>(COLLECTION);

    let result = collection
        .update_many(
            doc! { "user_id": user_id, "read": false },
            doc! { "$set": { "read": true } },
        )
        .await
        .map_err(|e| format!("Failed to mark notifications read: {}", e))?;

    Ok(result.modified_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbox_sorts_unread_first_then_newest() {
        let sort = inbox_sort();
        let keys: Vec<&str> = sort.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["read", "created_at"]);
        assert_eq!(sort.get_i32("read").unwrap(), 1);
        assert_eq!(sort.get_i32("created_at").unwrap(), -1);
    }
}
