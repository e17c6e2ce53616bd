use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool tuned for a small back-office workload
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .unwrap_or("Incubator");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates necessary indexes for optimal query performance
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let indexes: Vec<(&str, mongodb::bson::Document)> = vec![
            // Admin console filters submissions by status; intake checks duplicates by email
            ("submissions", doc! { "status": 1 }),
            ("submissions", doc! { "company_email": 1 }),
            // Public pages list approved events
            ("events", doc! { "status": 1 }),
            // Portals look mentors up by auth uid
            ("mentors", doc! { "uid": 1 }),
            ("mentor_profiles", doc! { "mentor_uid": 1 }),
            // Request pipeline: user history and mentor inbox queries
            ("mentor_requests", doc! { "user_id": 1 }),
            ("mentor_requests", doc! { "mentor_id": 1, "status": 1 }),
            // Token gate: capability lookup and cron cleanup scan
            ("email_tokens", doc! { "token_id": 1 }),
            ("email_tokens", doc! { "request_id": 1 }),
            ("email_tokens", doc! { "expires_at": 1 }),
            // Notification badge: unread count per user
            ("notifications", doc! { "user_id": 1, "read": 1 }),
            ("startups", doc! { "created_at": 1 }),
        ];

        for (collection_name, keys) in indexes {
            let collection = self
                .database()
                .collection::<mongodb::bson::Document>(collection_name);

            let index = IndexModel::builder().keys(keys.clone()).build();

            match collection.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}{}", collection_name, keys),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
