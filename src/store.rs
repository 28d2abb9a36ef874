// ABOUTME: Log store seam - read access to ordered health logs per user
// ABOUTME: Trait contract plus an in-memory implementation for embedding and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalog Contributors

//! Log store interface
//!
//! The engine only needs a read operation returning logs within a date
//! range, ordered by date ascending. An empty range yields an empty
//! vector, never an error. Persistence, validation, and deduplication
//! belong to the implementing collaborator.

use crate::errors::EngineResult;
use crate::models::HealthLog;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Read access to a user's health logs.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Logs for `user_id` with `from <= date <= to`, ascending by date.
    /// Must return an empty vector (not an error) when none exist.
    ///
    /// # Errors
    ///
    /// Implementations return [`EngineError::Store`] when the
    /// underlying read fails.
    ///
    /// [`EngineError::Store`]: crate::errors::EngineError::Store
    async fn fetch_logs(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<HealthLog>>;
}

/// In-memory log store keyed by (user, date).
///
/// Upserting enforces the at-most-one-log-per-day invariant; the
/// per-user `BTreeMap` keeps range reads ordered.
#[derive(Default)]
pub struct MemoryLogStore {
    logs: RwLock<HashMap<Uuid, BTreeMap<NaiveDate, HealthLog>>>,
}

impl MemoryLogStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the log for the entry's (user, date).
    pub async fn upsert(&self, log: HealthLog) {
        let mut logs = self.logs.write().await;
        logs.entry(log.user_id)
            .or_default()
            .insert(log.date, log);
    }

    /// Number of logs stored for a user.
    pub async fn count(&self, user_id: Uuid) -> usize {
        self.logs
            .read()
            .await
            .get(&user_id)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn fetch_logs(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<HealthLog>> {
        let logs = self.logs.read().await;
        Ok(logs
            .get(&user_id)
            .map(|per_day| per_day.range(from..=to).map(|(_, log)| log.clone()).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_ascending_range() {
        let store = MemoryLogStore::new();
        let user = Uuid::new_v4();
        for d in [7, 2, 5] {
            store.upsert(HealthLog::new(user, day(d))).await;
        }

        let logs = store.fetch_logs(user, day(1), day(6)).await.unwrap();
        let dates: Vec<NaiveDate> = logs.iter().map(|l| l.date).collect();
        assert_eq!(dates, vec![day(2), day(5)]);
    }

    #[tokio::test]
    async fn empty_range_is_empty_not_error() {
        let store = MemoryLogStore::new();
        let logs = store
            .fetch_logs(Uuid::new_v4(), day(1), day(28))
            .await
            .unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn upsert_enforces_one_log_per_day() {
        let store = MemoryLogStore::new();
        let user = Uuid::new_v4();
        let mut first = HealthLog::new(user, day(3));
        first.mood = Some(4.0);
        let mut second = HealthLog::new(user, day(3));
        second.mood = Some(8.0);

        store.upsert(first).await;
        store.upsert(second).await;

        assert_eq!(store.count(user).await, 1);
        let logs = store.fetch_logs(user, day(3), day(3)).await.unwrap();
        assert_eq!(logs[0].mood, Some(8.0));
    }
}
