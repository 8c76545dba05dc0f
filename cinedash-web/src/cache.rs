//! Memoized movie table
//!
//! The table is queried once and kept until `invalidate` or `reload` is
//! called. A failed load is never cached, so the next request retries.

use chrono::{DateTime, Utc};
use cinedash_common::{MovieRecord, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::db;
use crate::normalize::normalize;

/// A normalized table snapshot
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub movies: Vec<MovieRecord>,
    pub loaded_at: DateTime<Utc>,
}

/// Cache state reported by the API
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CacheStatus {
    pub loaded: bool,
    pub row_count: Option<usize>,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Query the store and normalize the result
pub async fn load_table(pool: &SqlitePool) -> Result<LoadedTable> {
    let started = Instant::now();
    let raw = db::fetch_movie_rows(pool).await?;
    let movies = normalize(&raw);

    info!(
        "Loaded {} movies in {:?}",
        movies.len(),
        started.elapsed()
    );
    if movies.is_empty() {
        warn!("movies table has no rows");
    }

    Ok(LoadedTable {
        movies,
        loaded_at: Utc::now(),
    })
}

/// Holds at most one loaded table for the lifetime of the service
pub struct MovieCache {
    pool: SqlitePool,
    slot: RwLock<Option<Arc<LoadedTable>>>,
}

impl MovieCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            slot: RwLock::new(None),
        }
    }

    /// Cached table, loading it on first use
    pub async fn get_or_load(&self) -> Result<Arc<LoadedTable>> {
        if let Some(table) = self.slot.read().await.as_ref() {
            return Ok(Arc::clone(table));
        }

        let mut slot = self.slot.write().await;
        // Another request may have loaded while we waited for the lock
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_table(&self.pool).await?);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table; the next `get_or_load` queries again
    pub async fn invalidate(&self) {
        let previous = self.slot.write().await.take();
        if previous.is_some() {
            info!("Movie cache invalidated");
        }
    }

    /// Query now and replace the cached table
    ///
    /// On failure the previous table (if any) stays cached.
    pub async fn reload(&self) -> Result<Arc<LoadedTable>> {
        let table = Arc::new(load_table(&self.pool).await?);
        *self.slot.write().await = Some(Arc::clone(&table));
        info!("Movie cache reloaded");
        Ok(table)
    }

    pub async fn status(&self) -> CacheStatus {
        match self.slot.read().await.as_ref() {
            Some(table) => CacheStatus {
                loaded: true,
                row_count: Some(table.movies.len()),
                loaded_at: Some(table.loaded_at),
            },
            None => CacheStatus {
                loaded: false,
                row_count: None,
                loaded_at: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqliteConnectOptions;
    use tempfile::TempDir;

    async fn seeded_pool(dir: &TempDir, rows: usize) -> SqlitePool {
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("movies.db"))
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.unwrap();
        sqlx::query(
            "CREATE TABLE movies (movie_name TEXT, genre TEXT, rating REAL, \
             duration_minutes INTEGER, voting_counts INTEGER)",
        )
        .execute(&pool)
        .await
        .unwrap();
        for i in 0..rows {
            insert(&pool, &format!("Movie {i}")).await;
        }
        pool
    }

    async fn insert(pool: &SqlitePool, name: &str) {
        sqlx::query("INSERT INTO movies VALUES (?, 'Drama', 7.5, 120, 1000)")
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_second_call_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let pool = seeded_pool(&dir, 2).await;
        let cache = MovieCache::new(pool.clone());

        let first = cache.get_or_load().await.unwrap();
        insert(&pool, "Late arrival").await;
        let second = cache.get_or_load().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.movies.len(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_requery() {
        let dir = TempDir::new().unwrap();
        let pool = seeded_pool(&dir, 2).await;
        let cache = MovieCache::new(pool.clone());

        cache.get_or_load().await.unwrap();
        insert(&pool, "Late arrival").await;
        cache.invalidate().await;

        assert!(!cache.status().await.loaded);
        assert_eq!(cache.get_or_load().await.unwrap().movies.len(), 3);
    }

    #[tokio::test]
    async fn test_reload_replaces_table() {
        let dir = TempDir::new().unwrap();
        let pool = seeded_pool(&dir, 1).await;
        let cache = MovieCache::new(pool.clone());

        cache.get_or_load().await.unwrap();
        insert(&pool, "Late arrival").await;
        let reloaded = cache.reload().await.unwrap();

        assert_eq!(reloaded.movies.len(), 2);
        assert_eq!(cache.status().await.row_count, Some(2));
    }

    #[tokio::test]
    async fn test_empty_table_is_cached_not_error() {
        let dir = TempDir::new().unwrap();
        let pool = seeded_pool(&dir, 0).await;
        let cache = MovieCache::new(pool);

        let table = cache.get_or_load().await.unwrap();
        assert!(table.movies.is_empty());
        assert_eq!(cache.status().await.row_count, Some(0));
    }

    #[tokio::test]
    async fn test_failed_load_not_cached() {
        let dir = TempDir::new().unwrap();
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("movies.db"))
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.unwrap();
        let cache = MovieCache::new(pool.clone());

        // No movies table yet
        assert!(cache.get_or_load().await.is_err());
        assert!(!cache.status().await.loaded);

        sqlx::query(
            "CREATE TABLE movies (movie_name TEXT, genre TEXT, rating REAL, \
             duration_minutes INTEGER, voting_counts INTEGER)",
        )
        .execute(&pool)
        .await
        .unwrap();
        insert(&pool, "Now present").await;

        assert_eq!(cache.get_or_load().await.unwrap().movies.len(), 1);
    }
}
