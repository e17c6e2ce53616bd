// ==================== TOKEN CLEANUP SCHEDULER ====================
// Background job that purges expired email action tokens so the
// collection doesn't accumulate dead capabilities. The same work is
// exposed as POST /api/cleanup-tokens for an external cron.

use crate::{database::MongoDB, services::token_service};
use tokio::time::{interval, Duration};

const CLEANUP_INTERVAL_SECS: u64 = 6 * 3600;

/// Starts the recurring cleanup. Verification already deletes expired
/// tokens lazily when a dead link is clicked; this sweep catches the
/// tokens nobody ever clicks.
pub async fn start_token_cleanup_scheduler(db: MongoDB) {
    log::info!("📅 Starting token cleanup scheduler (runs every 6 hours)");

    tokio::spawn(async move {
        // Run immediately on startup to clear any backlog
        log::info!("🚀 Running initial token cleanup on startup...");
        match token_service::cleanup_expired(&db).await {
            Ok(count) => {
                log::info!("✅ Startup token cleanup completed: {} tokens removed", count);
            }
            Err(e) => {
                log::error!("❌ Startup token cleanup failed: {}", e);
            }
        }

        let mut ticker = interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));
        ticker.tick().await; // the interval's first tick is immediate

        loop {
            ticker.tick().await;

            match token_service::cleanup_expired(&db).await {
                Ok(count) => {
                    log::debug!("✅ Token cleanup tick: {} tokens removed", count);
                }
                Err(e) => {
                    log::error!("❌ Token cleanup tick failed: {}", e);
                }
            }
        }
    });

    log::info!("✅ Token cleanup scheduler started successfully");
}
