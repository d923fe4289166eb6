use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::*;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgProductStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("{0}")]
    Backend(String),
}

/// The product collection and the database around it.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn count_products(&self) -> Result<i64, StorageError>;

    /// Inserts the whole batch or nothing. Returns the number of documents written.
    async fn insert_products(&self, products: &[NewProduct]) -> Result<u64, StorageError>;

    async fn list_product_summaries(
        &self,
        limit: Option<Limit>,
    ) -> Result<Vec<ProductSummaryRecord>, StorageError>;

    async fn find_product_by_slug(&self, slug: &str)
        -> Result<Option<ProductRecord>, StorageError>;

    async fn database_name(&self) -> Result<String, StorageError>;

    async fn collection_names(&self) -> Result<Vec<String>, StorageError>;

    async fn close(&self);
}

/// `None` is a normal runtime state: the service keeps serving and the
/// catalog routes answer with a server error.
pub type StorageHandle = Option<Arc<dyn ProductStore>>;

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Connects and migrates. Any failure leaves the handle absent instead of
/// aborting startup.
pub async fn connect(config: &Config) -> StorageHandle {
    let Some(url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set; running without storage");
        return None;
    };

    match try_connect(url, config).await {
        Ok(store) => {
            let database = store
                .database_name()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            info!(%database, "Database connection pool established.");
            Some(Arc::new(store))
        }
        Err(e) => {
            warn!(error = %e, "Database unavailable; running without storage");
            None
        }
    }
}

async fn try_connect(url: &str, config: &Config) -> Result<PgProductStore, StorageError> {
    let mut options = PgConnectOptions::from_str(url)?;
    if let Some(name) = config.database_name.as_deref() {
        options = options.database(name);
    }

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await?;

    info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations complete.");

    Ok(PgProductStore::new(pool))
}

pub async fn close(storage: &StorageHandle) {
    if let Some(store) = storage {
        store.close().await;
        info!("Database connection closed.");
    }
}

// ── Catalog reads ─────────────────────────────────────────────────────────────

fn require(storage: &StorageHandle) -> AppResult<&dyn ProductStore> {
    storage.as_deref().ok_or(AppError::StorageUnavailable)
}

pub async fn fetch_products(
    storage: &StorageHandle,
    limit: Option<Limit>,
) -> AppResult<ProductList> {
    let store = require(storage)?;
    let items = store
        .list_product_summaries(limit)
        .await?
        .into_iter()
        .map(IntoWire::into_wire)
        .collect();
    Ok(ProductList { items })
}

pub async fn fetch_product_by_slug(storage: &StorageHandle, slug: &str) -> AppResult<Product> {
    let store = require(storage)?;
    store
        .find_product_by_slug(slug)
        .await?
        .into_wire()
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryProductStore;
    use super::*;
    use crate::seed::sample_products;

    fn seeded() -> StorageHandle {
        Some(Arc::new(InMemoryProductStore::with_products(sample_products())))
    }

    // ── List ───────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn list_without_limit_returns_everything() {
        let list = fetch_products(&seeded(), None).await.unwrap();
        assert_eq!(list.items.len(), sample_products().len());
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let storage = seeded();
        for (limit, expected) in [(1u32, 1), (3, 3), (100, 6)] {
            let limit = Limit::try_from(limit).unwrap();
            let list = fetch_products(&storage, Some(limit)).await.unwrap();
            assert_eq!(list.items.len(), expected);
        }
    }

    #[tokio::test]
    async fn list_items_expose_string_ids() {
        let list = fetch_products(&seeded(), None).await.unwrap();
        for item in &list.items {
            assert!(uuid::Uuid::parse_str(&item.id).is_ok());
        }
    }

    #[tokio::test]
    async fn list_without_storage_is_unavailable() {
        let err = fetch_products(&None, None).await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable));
    }

    #[tokio::test]
    async fn list_surfaces_storage_failures() {
        let storage: StorageHandle = Some(Arc::new(InMemoryProductStore::failing("socket closed")));
        let err = fetch_products(&storage, None).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(err.to_string(), "socket closed");
    }

    // ── Lookup ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn lookup_returns_full_document() {
        let product = fetch_product_by_slug(&seeded(), "aurora-array-pro").await.unwrap();
        assert_eq!(product.slug, "aurora-array-pro");
        assert!(!product.specs.is_empty());
        assert!(!product.features.is_empty());
        assert!(!product.images.is_empty());
        assert!(product.description.is_some());
    }

    #[tokio::test]
    async fn lookup_unknown_slug_is_not_found() {
        let err = fetch_product_by_slug(&seeded(), "does-not-exist").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn lookup_without_storage_is_unavailable() {
        let err = fetch_product_by_slug(&None, "aurora-array-pro").await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable));
    }

    #[tokio::test]
    async fn lookup_surfaces_storage_failures() {
        let storage: StorageHandle = Some(Arc::new(InMemoryProductStore::failing("timeout")));
        let err = fetch_product_by_slug(&storage, "aurora-array-pro").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    // ── Lifecycle ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn connect_without_url_leaves_storage_absent() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(connect(&config).await.is_none());
    }

    #[tokio::test]
    async fn connect_with_malformed_url_leaves_storage_absent() {
        let config = Config::from_lookup(|key| {
            (key == "DATABASE_URL").then(|| "not a database url".to_string())
        })
        .unwrap();
        assert!(connect(&config).await.is_none());
    }

    #[tokio::test]
    async fn close_marks_the_store_closed() {
        let store = Arc::new(InMemoryProductStore::default());
        let storage: StorageHandle = Some(store.clone());
        close(&storage).await;
        assert!(store.is_closed());
        assert!(store.count_products().await.is_err());
    }
}
