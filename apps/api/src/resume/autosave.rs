//! Debounced autosave.
//!
//! Each `schedule` replaces the user's pending draft and restarts a quiescence
//! timer. When the timer fires without being superseded, the draft is written
//! through the store. Writes for one user are serialized so an older draft can
//! never land after a newer one, and reads consult pending drafts first.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::models::resume::{Resume, ResumeRecord};
use crate::resume::store::ResumeStore;

struct PendingDraft {
    resume: Resume,
    generation: u64,
}

struct Inner {
    store: Arc<dyn ResumeStore>,
    delay: Duration,
    pending: Mutex<HashMap<Uuid, PendingDraft>>,
    write_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
    next_generation: std::sync::atomic::AtomicU64,
}

/// Where a loaded resume came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSource {
    Pending,
    Saved,
}

#[derive(Clone)]
pub struct Autosaver {
    inner: Arc<Inner>,
}

impl Autosaver {
    pub fn new(store: Arc<dyn ResumeStore>, delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                delay,
                pending: Mutex::new(HashMap::new()),
                write_locks: Mutex::new(HashMap::new()),
                next_generation: std::sync::atomic::AtomicU64::new(1),
            }),
        }
    }

    /// Queues `resume` as the user's latest draft and (re)starts the timer.
    pub async fn schedule(&self, user_id: Uuid, resume: Resume) {
        let generation = self
            .inner
            .next_generation
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        // Anchored to the call, not to whenever the spawned task first runs.
        let deadline = Instant::now() + self.inner.delay;

        self.inner
            .pending
            .lock()
            .await
            .insert(user_id, PendingDraft { resume, generation });

        debug!("Draft {generation} scheduled for user {user_id}");

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            match this.persist_pending(user_id, Some(generation)).await {
                Ok(true) => info!("Autosaved resume for user {user_id}"),
                Ok(false) => {}
                Err(e) => error!("Autosave failed for user {user_id}: {e:?}"),
            }
        });
    }

    /// Writes the user's pending draft through the store.
    ///
    /// With `expected` set, only that generation is written, so a superseded
    /// timer does nothing. Returns whether a write happened. The draft stays
    /// readable until the write lands and stays pending if it fails.
    async fn persist_pending(&self, user_id: Uuid, expected: Option<u64>) -> Result<bool> {
        let lock = self.write_lock(user_id).await;
        let written: Result<bool> = async {
            let _guard = lock.lock().await;

            let (resume, generation) = match self.inner.pending.lock().await.get(&user_id) {
                Some(d) if expected.map_or(true, |g| g == d.generation) => {
                    (d.resume.clone(), d.generation)
                }
                _ => return Ok(false),
            };

            self.inner.store.upsert(user_id, &resume).await?;

            let mut pending = self.inner.pending.lock().await;
            if pending
                .get(&user_id)
                .is_some_and(|d| d.generation == generation)
            {
                pending.remove(&user_id);
            }
            Ok(true)
        }
        .await;
        self.release_write_lock(user_id, lock).await;
        written
    }

    /// Discards any pending draft and writes `resume` immediately.
    pub async fn save_now(&self, user_id: Uuid, resume: &Resume) -> Result<ResumeRecord> {
        let lock = self.write_lock(user_id).await;
        let saved = async {
            let _guard = lock.lock().await;
            self.inner.pending.lock().await.remove(&user_id);
            self.inner.store.upsert(user_id, resume).await
        }
        .await;
        self.release_write_lock(user_id, lock).await;

        let record = saved?;
        info!("Saved resume for user {user_id}");
        Ok(record)
    }

    /// The user's current resume: the pending draft if there is one, else the stored record.
    pub async fn load(&self, user_id: Uuid) -> Result<Option<(Resume, ResumeSource)>> {
        if let Some(draft) = self.inner.pending.lock().await.get(&user_id) {
            return Ok(Some((draft.resume.clone(), ResumeSource::Pending)));
        }
        Ok(self
            .inner
            .store
            .fetch(user_id)
            .await?
            .map(|record| (record.content.0, ResumeSource::Saved)))
    }

    /// Persists every pending draft now. Used on shutdown.
    ///
    /// Every user is attempted. Drafts whose write fails stay pending and the
    /// call reports an error once the rest have been written.
    pub async fn flush_all(&self) -> Result<usize> {
        let user_ids: Vec<Uuid> = self.inner.pending.lock().await.keys().copied().collect();

        let mut flushed = 0;
        let mut failed = 0;
        for user_id in user_ids {
            match self.persist_pending(user_id, None).await {
                Ok(true) => flushed += 1,
                Ok(false) => {}
                Err(e) => {
                    failed += 1;
                    error!("Failed to flush draft for user {user_id}: {e:?}");
                }
            }
        }

        if flushed > 0 {
            info!("Flushed {flushed} pending drafts");
        }
        if failed > 0 {
            bail!("{failed} pending drafts could not be saved");
        }
        Ok(flushed)
    }

    async fn write_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.inner
            .write_locks
            .lock()
            .await
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the user's lock entry once nobody else holds or waits on it.
    async fn release_write_lock(&self, user_id: Uuid, lock: Arc<Mutex<()>>) {
        let mut locks = self.inner.write_locks.lock().await;
        // the map's reference plus ours
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&user_id);
        }
    }
}
