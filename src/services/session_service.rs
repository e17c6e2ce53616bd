use crate::{database::MongoDB, services::auth_service};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};

/// Force-refresh the access token this often while a session is bound
const REFRESH_INTERVAL_SECS: u64 = 30 * 60;
/// How often the idle checker wakes up
const ACTIVITY_CHECK_SECS: u64 = 5 * 60;
/// Idle threshold after which the checker refreshes anyway (keeps the
/// token warm instead of letting it lapse)
const IDLE_REFRESH_SECS: i64 = 2 * 3600;
/// A session older than this much idle time is no longer valid
const MAX_IDLE_SECS: i64 = 24 * 3600;

/// Keeps a signed-in session usable across long idle periods.
///
/// Explicitly constructed and owned by app state — start() and stop()
/// bracket the authenticated-session lifetime. Two cooperative timers:
/// a fixed-cadence token refresh and an idle checker. `last_activity`
/// is a plain atomic; concurrent stamps race benignly (last writer
/// wins, any recent value is good enough).
pub struct SessionManager {
    user: RwLock<Option<String>>,
    last_activity: Arc<AtomicI64>,
    current_token: Arc<RwLock<Option<String>>>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
    idle_task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        SessionManager {
            user: RwLock::new(None),
            last_activity: Arc::new(AtomicI64::new(chrono::Utc::now().timestamp())),
            current_token: Arc::new(RwLock::new(None)),
            refresh_task: Mutex::new(None),
            idle_task: Mutex::new(None),
        }
    }

    /// Binds the signed-in user. Called on login.
    pub fn bind_user(&self, uid: &str) {
        if let Ok(mut user) = self.user.write() {
            *user = Some(uid.to_string());
        }
        self.record_activity();
    }

    /// Unbinds on logout; the warm token is dropped with it
    pub fn clear_user(&self) {
        if let Ok(mut user) = self.user.write() {
            *user = None;
        }
        if let Ok(mut token) = self.current_token.write() {
            *token = None;
        }
    }

    pub fn bound_user(&self) -> Option<String> {
        self.user.read().ok().and_then(|u| u.clone())
    }

    /// Stamps now as the last activity instant. Called by the auth
    /// middleware on every authenticated request.
    pub fn record_activity(&self) {
        self.last_activity
            .store(chrono::Utc::now().timestamp(), Ordering::Relaxed);
    }

    pub fn idle_seconds(&self) -> i64 {
        let last = self.last_activity.load(Ordering::Relaxed);
        (chrono::Utc::now().timestamp() - last).max(0)
    }

    /// A session is valid while a user is bound and idle time stays
    /// under 24 hours
    pub fn is_session_valid(&self) -> bool {
        self.bound_user().is_some() && self.idle_seconds() < MAX_IDLE_SECS
    }

    pub fn current_token(&self) -> Option<String> {
        self.current_token.read().ok().and_then(|t| t.clone())
    }

    /// Mints a fresh access token for the bound user and stores it
    pub async fn force_token_refresh(&self, db: &MongoDB) -> Result<String, String> {
        let uid = self
            .bound_user()
            .ok_or_else(|| "No user bound to session".to_string())?;

        let token = auth_service::force_token_refresh(db, &uid).await?;

        if let Ok(mut current) = self.current_token.write() {
            *current = Some(token.clone());
        }

        log::debug!("🔄 Session token refreshed for {}", uid);

        Ok(token)
    }

    /// Starts both keep-alive timers. Idempotent: calling start on a
    /// running manager stops the old timers first.
    pub fn start(self: &Arc<Self>, db: MongoDB) {
        self.stop();

        log::info!(
            "⏱️ Session manager started (refresh every {}min, idle check every {}min)",
            REFRESH_INTERVAL_SECS / 60,
            ACTIVITY_CHECK_SECS / 60
        );

        let manager = Arc::clone(self);
        let refresh_db = db.clone();
        let refresh = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
            ticker.tick().await; // first tick fires immediately, skip it
            loop {
                ticker.tick().await;
                if manager.bound_user().is_none() {
                    continue;
                }
                if let Err(e) = manager.force_token_refresh(&refresh_db).await {
                    log::warn!("⚠️ Scheduled token refresh failed: {}", e);
                }
            }
        });

        let manager = Arc::clone(self);
        let idle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(ACTIVITY_CHECK_SECS));
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if manager.bound_user().is_none() {
                    continue;
                }
                let idle_secs = manager.idle_seconds();
                if idle_secs > IDLE_REFRESH_SECS && idle_secs < MAX_IDLE_SECS {
                    log::info!(
                        "💤 Session idle for {}s, refreshing token to keep it warm",
                        idle_secs
                    );
                    if let Err(e) = manager.force_token_refresh(&db).await {
                        log::warn!("⚠️ Idle refresh failed: {}", e);
                    }
                }
            }
        });

        if let Ok(mut task) = self.refresh_task.lock() {
            *task = Some(refresh);
        }
        if let Ok(mut task) = self.idle_task.lock() {
            *task = Some(idle);
        }
    }

    /// Cancels both timers. Must be called on shutdown/logout so the
    /// tasks don't outlive the session.
    pub fn stop(&self) {
        if let Ok(mut task) = self.refresh_task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
        if let Ok(mut task) = self.idle_task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_without_user() {
        let manager = SessionManager::new();
        assert!(!manager.is_session_valid());
    }

    #[test]
    fn test_valid_with_user_and_recent_activity() {
        let manager = SessionManager::new();
        manager.bind_user("user-1");
        assert!(manager.is_session_valid());
        assert!(manager.idle_seconds() < 5);
    }

    #[test]
    fn test_invalid_after_max_idle() {
        let manager = SessionManager::new();
        manager.bind_user("user-1");
        // Backdate the activity stamp past the 24h window
        manager.last_activity.store(
            chrono::Utc::now().timestamp() - MAX_IDLE_SECS - 1,
            Ordering::Relaxed,
        );
        assert!(!manager.is_session_valid());
    }

    #[test]
    fn test_clear_user_invalidates_and_drops_token() {
        let manager = SessionManager::new();
        manager.bind_user("user-1");
        if let Ok(mut token) = manager.current_token.write() {
            *token = Some("warm-token".to_string());
        }
        manager.clear_user();
        assert!(!manager.is_session_valid());
        assert!(manager.current_token().is_none());
    }

    #[test]
    fn test_record_activity_resets_idle_clock() {
        let manager = SessionManager::new();
        manager.bind_user("user-1");
        manager.last_activity.store(
            chrono::Utc::now().timestamp() - 3600,
            Ordering::Relaxed,
        );
        assert!(manager.idle_seconds() >= 3600);
        manager.record_activity();
        assert!(manager.idle_seconds() < 5);
    }
}
