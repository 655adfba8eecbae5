use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::AppError;
use crate::session::history::SessionHistory;

struct SessionEntry {
    history: Arc<Mutex<SessionHistory>>,
    last_access: Mutex<DateTime<Utc>>,
}

/// Owns one `SessionHistory` per browser session.
///
/// A session that goes unused for longer than `idle_ttl` is dropped. Expired
/// sessions are swept whenever a new one is created, and an expired id looked up
/// before the sweep is removed on the spot. Each history has its own mutex; the
/// registry lock is only held long enough to look the session up.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<SessionEntry>>>>,
    clock: Arc<dyn Clock>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(clock: Arc<dyn Clock>, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            clock,
            idle_ttl,
        }
    }

    /// Opens a new, empty session and returns its id.
    pub fn create(&self) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let now = self.clock.now();
        let mut sessions = self.sessions.write().map_err(|_| registry_poisoned())?;

        let before = sessions.len();
        sessions.retain(|_, entry| {
            entry
                .last_access
                .lock()
                .map(|last| !self.is_idle(*last, now))
                .unwrap_or(false)
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Idle sessions expired");
        }

        sessions.insert(
            id,
            Arc::new(SessionEntry {
                history: Arc::new(Mutex::new(SessionHistory::new())),
                last_access: Mutex::new(now),
            }),
        );
        Ok(id)
    }

    /// Runs `f` against the history of session `id` while holding its lock.
    /// `f` must not block; never call this across an `.await`.
    pub fn with_history<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionHistory) -> R,
    ) -> Result<R, AppError> {
        let history = self.lookup(id)?;
        let mut guard = history
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("session {id} history lock poisoned")))?;
        Ok(f(&mut guard))
    }

    /// Fails with `NotFound` unless session `id` exists and has not expired.
    pub fn ensure_exists(&self, id: Uuid) -> Result<(), AppError> {
        self.lookup(id).map(|_| ())
    }

    #[cfg(test)]
    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Returns the history of session `id` and marks the session as used.
    fn lookup(&self, id: Uuid) -> Result<Arc<Mutex<SessionHistory>>, AppError> {
        let now = self.clock.now();
        let entry = self
            .sessions
            .read()
            .map_err(|_| registry_poisoned())?
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))?;

        let mut last_access = entry
            .last_access
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("session {id} access lock poisoned")))?;
        if self.is_idle(*last_access, now) {
            drop(last_access);
            self.sessions
                .write()
                .map_err(|_| registry_poisoned())?
                .remove(&id);
            info!(session_id = %id, "Idle session expired");
            return Err(not_found(id));
        }
        *last_access = now;

        Ok(Arc::clone(&entry.history))
    }

    fn is_idle(&self, last_access: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        (now - last_access)
            .to_std()
            .map(|idle| idle > self.idle_ttl)
            .unwrap_or(false)
    }
}

fn registry_poisoned() -> AppError {
    AppError::Internal(anyhow::anyhow!("session registry lock poisoned"))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, ManualClock};
    use crate::consent::models::InteractionKind;
    use crate::session::history::InteractionRecord;
    use chrono::TimeZone;

    const IDLE_TTL: Duration = Duration::from_secs(30 * 60);

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn registry() -> SessionRegistry {
        SessionRegistry::new(Arc::new(FixedClock(start())), IDLE_TTL)
    }

    fn manual_registry() -> (Arc<ManualClock>, SessionRegistry) {
        let clock = Arc::new(ManualClock::new(start()));
        let registry = SessionRegistry::new(clock.clone(), IDLE_TTL);
        (clock, registry)
    }

    fn record(text: &str) -> InteractionRecord {
        InteractionRecord::new(Utc::now(), InteractionKind::Generate, text.to_string())
    }

    #[test]
    fn test_sessions_are_isolated() {
        let registry = registry();
        let a = registry.create().unwrap();
        let b = registry.create().unwrap();
        assert_ne!(a, b);

        registry
            .with_history(a, |h| h.append(record("only in a")))
            .unwrap();

        assert_eq!(registry.with_history(a, |h| h.len()).unwrap(), 1);
        assert_eq!(registry.with_history(b, |h| h.len()).unwrap(), 0);
        assert_eq!(registry.session_count(), 2);
    }

    #[test]
    fn test_unknown_session_is_not_found() {
        let registry = registry();
        let err = registry.with_history(Uuid::new_v4(), |h| h.len()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(
            registry.ensure_exists(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_clones_share_state() {
        let registry = registry();
        let id = registry.create().unwrap();
        let clone = registry.clone();
        clone.with_history(id, |h| h.append(record("shared"))).unwrap();
        let texts = registry
            .with_history(id, |h| {
                h.list_all()
                    .iter()
                    .map(|r| r.response_text.clone())
                    .collect::<Vec<_>>()
            })
            .unwrap();
        assert_eq!(texts, vec!["shared".to_string()]);
    }

    #[test]
    fn test_idle_sessions_are_swept_on_create() {
        let (clock, registry) = manual_registry();
        let stale = registry.create().unwrap();
        clock.advance(chrono::Duration::minutes(20));
        let fresh = registry.create().unwrap();

        clock.advance(chrono::Duration::minutes(15));
        registry.create().unwrap();

        assert_eq!(registry.session_count(), 2);
        assert!(matches!(registry.ensure_exists(stale), Err(AppError::NotFound(_))));
        assert!(registry.ensure_exists(fresh).is_ok());
    }

    #[test]
    fn test_access_keeps_a_session_alive() {
        let (clock, registry) = manual_registry();
        let id = registry.create().unwrap();

        for _ in 0..4 {
            clock.advance(chrono::Duration::minutes(25));
            registry.with_history(id, |h| h.append(record("still here"))).unwrap();
        }
        registry.create().unwrap();

        assert_eq!(registry.with_history(id, |h| h.len()).unwrap(), 4);
        assert_eq!(registry.session_count(), 2);
    }

    #[test]
    fn test_expired_session_is_removed_on_lookup() {
        let (clock, registry) = manual_registry();
        let id = registry.create().unwrap();
        clock.advance(chrono::Duration::minutes(31));

        let err = registry.with_history(id, |h| h.len()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(registry.session_count(), 0);
    }

    #[test]
    fn test_session_at_exact_ttl_is_kept() {
        let (clock, registry) = manual_registry();
        let id = registry.create().unwrap();
        clock.advance(chrono::Duration::minutes(30));
        assert!(registry.ensure_exists(id).is_ok());
    }

    #[test]
    fn test_looping_creates_stay_bounded_once_idle() {
        let (clock, registry) = manual_registry();
        for _ in 0..50 {
            registry.create().unwrap();
        }
        clock.advance(chrono::Duration::hours(1));
        registry.create().unwrap();
        assert_eq!(registry.session_count(), 1);
    }
}
