//! Bounded per-endpoint check history

use crate::models::CheckResult;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Ring of recent results per endpoint.
///
/// The key set is fixed at construction. Each endpoint has its own lock, so
/// concurrent rounds only contend when they write the same endpoint.
#[derive(Debug)]
pub struct HistoryStore {
    entries: HashMap<String, RwLock<VecDeque<CheckResult>>>,
    capacity: usize,
}

impl HistoryStore {
    /// Create a store tracking exactly the given endpoint names.
    /// A capacity of zero is treated as one.
    pub fn new<I, S>(endpoint_names: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = endpoint_names
            .into_iter()
            .map(|name| (name.into(), RwLock::new(VecDeque::new())))
            .collect();

        Self {
            entries,
            capacity: capacity.max(1),
        }
    }

    /// Append a result, evicting the oldest entry once the ring is full.
    /// Unknown endpoints are ignored.
    pub async fn append(&self, endpoint_name: &str, result: CheckResult) {
        let Some(slot) = self.entries.get(endpoint_name) else {
            debug!("Ignoring result for unknown endpoint: {}", endpoint_name);
            return;
        };

        let mut history = slot.write().await;
        while history.len() >= self.capacity {
            history.pop_front();
        }
        history.push_back(result);
    }

    /// The most recent `limit` results, oldest first.
    ///
    /// `None` or `Some(0)` returns everything stored. Unknown endpoints yield
    /// an empty vec.
    pub async fn get(&self, endpoint_name: &str, limit: Option<usize>) -> Vec<CheckResult> {
        let Some(slot) = self.entries.get(endpoint_name) else {
            return Vec::new();
        };

        let history = slot.read().await;
        let take = match limit {
            Some(n) if n > 0 => n.min(history.len()),
            _ => history.len(),
        };
        history.iter().skip(history.len() - take).cloned().collect()
    }

    /// Full history for an endpoint, oldest first
    pub async fn all(&self, endpoint_name: &str) -> Vec<CheckResult> {
        self.get(endpoint_name, None).await
    }

    pub async fn len(&self, endpoint_name: &str) -> usize {
        match self.entries.get(endpoint_name) {
            Some(slot) => slot.read().await.len(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn result(endpoint: &str, response_time_ms: u64) -> CheckResult {
        CheckResult::from_response(endpoint, 200, response_time_ms, Utc::now())
    }

    #[tokio::test]
    async fn test_get_returns_available_entries_oldest_first() {
        let store = HistoryStore::new(["x"], DEFAULT_HISTORY_CAPACITY);
        for i in 1..=3 {
            store.append("x", result("x", i)).await;
        }

        let history = store.get("x", Some(5)).await;
        let times: Vec<u64> = history.iter().map(|r| r.response_time_ms).collect();
        assert_eq!(times, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_returns_most_recent_window() {
        let store = HistoryStore::new(["x"], DEFAULT_HISTORY_CAPACITY);
        for i in 1..=10 {
            store.append("x", result("x", i)).await;
        }

        let history = store.get("x", Some(3)).await;
        let times: Vec<u64> = history.iter().map(|r| r.response_time_ms).collect();
        assert_eq!(times, vec![8, 9, 10]);
    }

    #[tokio::test]
    async fn test_unknown_endpoint_is_permissive() {
        let store = HistoryStore::new(["x"], DEFAULT_HISTORY_CAPACITY);
        store.append("unknown-endpoint", result("unknown-endpoint", 1)).await;

        assert!(store.get("unknown-endpoint", Some(10)).await.is_empty());
        assert_eq!(store.len("unknown-endpoint").await, 0);
    }

    #[tokio::test]
    async fn test_overflow_evicts_oldest() {
        let store = HistoryStore::new(["x"], DEFAULT_HISTORY_CAPACITY);
        for i in 1..=101 {
            store.append("x", result("x", i)).await;
        }

        let history = store.all("x").await;
        assert_eq!(history.len(), 100);
        assert_eq!(history.first().unwrap().response_time_ms, 2);
        assert_eq!(history.last().unwrap().response_time_ms, 101);
    }

    #[tokio::test]
    async fn test_unbounded_limit_returns_everything() {
        let store = HistoryStore::new(["x"], 5);
        for i in 1..=4 {
            store.append("x", result("x", i)).await;
        }

        assert_eq!(store.get("x", None).await.len(), 4);
        assert_eq!(store.get("x", Some(0)).await.len(), 4);
        assert_eq!(store.get("x", Some(9)).await.len(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_appends_across_endpoints() {
        let store = Arc::new(HistoryStore::new(["a", "b"], DEFAULT_HISTORY_CAPACITY));

        let mut handles = Vec::new();
        for name in ["a", "b"] {
            for i in 0..50 {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    store.append(name, result(name, i)).await;
                }));
            }
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len("a").await, 50);
        assert_eq!(store.len("b").await, 50);
    }
}
