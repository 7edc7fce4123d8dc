//! Resume persistence. One record per user, upserted whole.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`: Postgres in production, the
//! in-memory map when no `DATABASE_URL` is configured.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::{Resume, ResumeRecord};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn fetch(&self, user_id: Uuid) -> Result<Option<ResumeRecord>>;

    /// Inserts or replaces the user's resume. Last write wins.
    async fn upsert(&self, user_id: Uuid, resume: &Resume) -> Result<ResumeRecord>;
}

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn fetch(&self, user_id: Uuid) -> Result<Option<ResumeRecord>> {
        Ok(sqlx::query_as::<_, ResumeRecord>(
            "SELECT user_id, content, updated_at FROM resumes WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert(&self, user_id: Uuid, resume: &Resume) -> Result<ResumeRecord> {
        Ok(sqlx::query_as::<_, ResumeRecord>(
            r#"
            INSERT INTO resumes (user_id, content, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (user_id)
            DO UPDATE SET content = EXCLUDED.content, updated_at = EXCLUDED.updated_at
            RETURNING user_id, content, updated_at
            "#,
        )
        .bind(user_id)
        .bind(Json(resume))
        .fetch_one(&self.pool)
        .await?)
    }
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryResumeStore {
    records: RwLock<HashMap<Uuid, ResumeRecord>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn fetch(&self, user_id: Uuid) -> Result<Option<ResumeRecord>> {
        Ok(self.records.read().await.get(&user_id).cloned())
    }

    async fn upsert(&self, user_id: Uuid, resume: &Resume) -> Result<ResumeRecord> {
        let record = ResumeRecord {
            user_id,
            content: Json(resume.clone()),
            updated_at: Utc::now(),
        };
        self.records.write().await.insert(user_id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_fetch_missing() {
        let store = MemoryResumeStore::new();
        assert!(store.fetch(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_upsert_replaces() {
        let store = MemoryResumeStore::new();
        let user = Uuid::new_v4();

        let mut resume = Resume::default();
        resume.summary = "first".into();
        store.upsert(user, &resume).await.unwrap();

        resume.summary = "second".into();
        store.upsert(user, &resume).await.unwrap();

        let record = store.fetch(user).await.unwrap().unwrap();
        assert_eq!(record.user_id, user);
        assert_eq!(record.content.0.summary, "second");
    }

    #[tokio::test]
    async fn test_memory_users_are_isolated() {
        let store = MemoryResumeStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store.upsert(a, &Resume::default()).await.unwrap();
        assert!(store.fetch(b).await.unwrap().is_none());
    }
}
