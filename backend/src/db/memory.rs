use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductStore, StorageError};
use crate::models::*;

/// In-process product collection for tests. Mirrors the PostgreSQL store:
/// unique slugs, all-or-nothing batch inserts, insertion-order reads.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<ProductRecord>>,
    failure: Option<String>,
    closed: AtomicBool,
}

impl InMemoryProductStore {
    pub fn with_products(products: Vec<NewProduct>) -> Self {
        let records = products
            .into_iter()
            .map(|p| ProductRecord::from_new(Uuid::new_v4(), p))
            .collect();
        Self {
            products: RwLock::new(records),
            ..Self::default()
        }
    }

    /// A store whose every operation fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.is_closed() {
            return Err(StorageError::Backend("store is closed".to_string()));
        }
        match &self.failure {
            Some(message) => Err(StorageError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn count_products(&self) -> Result<i64, StorageError> {
        self.check()?;
        Ok(self.products.read().await.len() as i64)
    }

    async fn insert_products(&self, products: &[NewProduct]) -> Result<u64, StorageError> {
        self.check()?;
        let mut stored = self.products.write().await;

        for (i, p) in products.iter().enumerate() {
            let clashes = stored.iter().any(|r| r.slug == p.slug)
                || products[..i].iter().any(|earlier| earlier.slug == p.slug);
            if clashes {
                return Err(StorageError::Backend(format!(
                    "duplicate key value violates unique constraint \"product_slug_key\": {}",
                    p.slug
                )));
            }
        }

        stored.extend(
            products
                .iter()
                .cloned()
                .map(|p| ProductRecord::from_new(Uuid::new_v4(), p)),
        );
        Ok(products.len() as u64)
    }

    async fn list_product_summaries(
        &self,
        limit: Option<Limit>,
    ) -> Result<Vec<ProductSummaryRecord>, StorageError> {
        self.check()?;
        let take = limit.map_or(usize::MAX, |l| l.get() as usize);
        Ok(self
            .products
            .read()
            .await
            .iter()
            .take(take)
            .map(ProductSummaryRecord::from)
            .collect())
    }

    async fn find_product_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductRecord>, StorageError> {
        self.check()?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|r| r.slug == slug)
            .cloned())
    }

    async fn database_name(&self) -> Result<String, StorageError> {
        self.check()?;
        Ok("memory".to_string())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        Ok(vec!["product".to_string()])
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_products;

    #[tokio::test]
    async fn duplicate_slugs_reject_the_whole_batch() {
        let store = InMemoryProductStore::default();
        let mut batch = sample_products();
        batch.push(batch[0].clone());

        assert!(store.insert_products(&batch).await.is_err());
        assert_eq!(store.count_products().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn slug_must_be_unique_across_inserts() {
        let store = InMemoryProductStore::with_products(sample_products());
        let again = vec![sample_products().remove(0)];
        assert!(store.insert_products(&again).await.is_err());
        assert_eq!(store.count_products().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn identifiers_are_assigned_per_document() {
        let store = InMemoryProductStore::with_products(sample_products());
        let rows = store.list_product_summaries(None).await.unwrap();
        let mut ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), rows.len());
    }
}
