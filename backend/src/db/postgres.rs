use async_trait::async_trait;
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};

use super::{ProductStore, StorageError};
use crate::models::*;

/// Product collection backed by the `product` table.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn count_products(&self) -> Result<i64, StorageError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn insert_products(&self, products: &[NewProduct]) -> Result<u64, StorageError> {
        if products.is_empty() {
            return Ok(0);
        }

        // One multi-row INSERT: the batch lands whole or not at all.
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO product (slug, title, subtitle, description, price, category, \
             in_stock, hero_image, images, features, tags, specs) ",
        );
        builder.push_values(products, |mut row, p| {
            row.push_bind(&p.slug)
                .push_bind(&p.title)
                .push_bind(&p.subtitle)
                .push_bind(&p.description)
                .push_bind(p.price)
                .push_bind(&p.category)
                .push_bind(p.in_stock)
                .push_bind(&p.hero_image)
                .push_bind(&p.images)
                .push_bind(&p.features)
                .push_bind(&p.tags)
                .push_bind(Json(&p.specs));
        });

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn list_product_summaries(
        &self,
        limit: Option<Limit>,
    ) -> Result<Vec<ProductSummaryRecord>, StorageError> {
        // LIMIT NULL is no limit.
        let products = sqlx::query_as::<_, ProductSummaryRecord>(
            r#"
            SELECT id, slug, title, subtitle, price, category, hero_image, tags
            FROM product
            LIMIT $1::bigint
            "#,
        )
        .bind(limit.map(|l| i64::from(l.get())))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_product_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ProductRecord>, StorageError> {
        let product = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, slug, title, subtitle, description, price, category, in_stock,
                   hero_image, images, features, tags, specs
            FROM product
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn database_name(&self) -> Result<String, StorageError> {
        let row: (String,) = sqlx::query_as("SELECT current_database()")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn collection_names(&self) -> Result<Vec<String>, StorageError> {
        let names: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = current_schema()
            ORDER BY table_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
