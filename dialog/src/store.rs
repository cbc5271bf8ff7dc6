//! Per-identity session storage.
//!
//! One async mutex per identity inside a concurrent map. Holding the guard serializes every
//! event for that identity; different identities never contend. The map guard itself is never
//! held across an await: the per-identity `Arc` is cloned out first.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::session::Session;

type Slot = Arc<Mutex<Session>>;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<i64, Slot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, user_id: i64) -> Slot {
        self.inner
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(Session::default())))
            .value()
            .clone()
    }

    /// Exclusive access to the identity's session until the guard drops. Unknown ids start Idle.
    pub async fn lock(&self, user_id: i64) -> OwnedMutexGuard<Session> {
        self.slot(user_id).lock_owned().await
    }

    /// Snapshot of the session; Idle for identities never seen.
    pub async fn get(&self, user_id: i64) -> Session {
        let slot = self.inner.get(&user_id).map(|r| r.value().clone());
        match slot {
            Some(slot) => slot.lock().await.clone(),
            None => Session::default(),
        }
    }

    pub async fn set(&self, user_id: i64, session: Session) {
        *self.lock(user_id).await = session;
    }

    /// Atomic read-modify-write.
    pub async fn update<F, R>(&self, user_id: i64, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut guard = self.lock(user_id).await;
        f(&mut guard)
    }

    /// Resets to Idle. The entry stays so waiters already queued on it remain ordered.
    pub async fn delete(&self, user_id: i64) {
        let slot = self.inner.get(&user_id).map(|r| r.value().clone());
        if let Some(slot) = slot {
            *slot.lock().await = Session::default();
        }
    }

    /// Number of identities seen.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DialogState;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unknown_identity_is_idle() {
        let store = SessionStore::new();
        assert!(store.get(1).await.is_idle());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = SessionStore::new();
        store
            .set(
                1,
                Session {
                    state: DialogState::AwaitingJobTitle,
                    ..Session::default()
                },
            )
            .await;
        assert_eq!(store.get(1).await.state, DialogState::AwaitingJobTitle);

        store.delete(1).await;
        assert!(store.get(1).await.is_idle());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_returns_closure_result() {
        let store = SessionStore::new();
        let tracked = store.update(3, |s| s.pending.track(10)).await;
        assert!(tracked);
        assert_eq!(store.get(3).await.pending.ids(), &[10]);
    }

    /// **Test: The lock serializes two writers for one identity.**
    ///
    /// **Setup:** Task A holds the lock and sleeps before writing.
    /// **Action:** Task B updates the same identity while A holds the lock.
    /// **Expected:** B observes A's write (runs strictly after it).
    #[tokio::test]
    async fn test_lock_orders_same_identity() {
        let store = SessionStore::new();
        let mut guard = store.lock(9).await;

        let other = store.clone();
        let waiter = tokio::spawn(async move {
            other
                .update(9, |s| {
                    let seen = s.pending.len();
                    s.pending.track(2);
                    seen
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        guard.pending.track(1);
        drop(guard);

        assert_eq!(waiter.await.unwrap(), 1);
        assert_eq!(store.get(9).await.pending.ids(), &[1, 2]);
    }

    #[tokio::test]
    async fn test_distinct_identities_do_not_block() {
        let store = SessionStore::new();
        let _held = store.lock(1).await;

        let done = tokio::time::timeout(Duration::from_millis(200), store.update(2, |s| {
            s.state = DialogState::FormName;
        }))
        .await;

        assert!(done.is_ok());
    }
}
