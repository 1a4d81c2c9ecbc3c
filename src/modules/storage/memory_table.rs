//! In-memory table keyed by a monotonically increasing id

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use crate::shared::types::{ListQuery, PageMeta};

/// Table of `T` rows. Listing returns newest rows first.
pub struct MemoryTable<T> {
    name: &'static str,
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T> std::fmt::Debug for MemoryTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTable")
            .field("name", &self.name)
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

impl<T: Clone + Send + Sync> MemoryTable<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Allocate an id and store the row built from it
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(i64) -> T,
    {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.rows.write().await.insert(id, row.clone());
        debug!("{}: inserted id={}", self.name, id);
        row
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.rows.read().await.contains_key(&id)
    }

    /// Apply `change` to the row with `id`, returning the updated row
    pub async fn update<F>(&self, id: i64, change: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.get_mut(&id)?;
        change(row);
        debug!("{}: updated id={}", self.name, id);
        Some(row.clone())
    }

    /// One page of rows accepted by `keep`, newest first.
    ///
    /// The page number is clamped to the last page, so the returned meta is
    /// authoritative for the caller.
    pub async fn page<F>(&self, query: &ListQuery, keep: F) -> (Vec<T>, PageMeta)
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.rows.read().await;
        let matching: Vec<&T> = rows.values().rev().filter(|row| keep(row)).collect();

        let meta = PageMeta::for_query(query, matching.len() as i64);
        let items = matching
            .into_iter()
            .skip(meta.offset())
            .take(meta.per_page as usize)
            .cloned()
            .collect();

        (items, meta)
    }
}
