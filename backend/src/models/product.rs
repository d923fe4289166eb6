use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use thiserror::Error;
use uuid::Uuid;

// ── Insert document ───────────────────────────────────────────────────────────

/// A product document as handed to storage. Storage assigns the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    /// Price in dollars
    pub price: Option<f64>,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub hero_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub specs: IndexMap<String, String>,
}

fn default_in_stock() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidProduct {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("slug {0:?} is not URL-safe")]
    InvalidSlug(String),
    #[error("price must be >= 0, got {0}")]
    NegativePrice(f64),
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if self.title.trim().is_empty() {
            return Err(InvalidProduct::EmptyField("title"));
        }
        if self.category.trim().is_empty() {
            return Err(InvalidProduct::EmptyField("category"));
        }
        if !is_url_safe_slug(&self.slug) {
            return Err(InvalidProduct::InvalidSlug(self.slug.clone()));
        }
        match self.price {
            Some(price) if price.is_nan() || price < 0.0 => {
                Err(InvalidProduct::NegativePrice(price))
            }
            _ => Ok(()),
        }
    }
}

/// Lowercase ASCII words separated by single hyphens, e.g. `aurora-array-pro`.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

// ── Stored rows ───────────────────────────────────────────────────────────────

/// Full stored document. Not `Serialize`: the native UUID only
/// leaves the service through the projection in [`super::projection`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: String,
    pub in_stock: bool,
    pub hero_image: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub tags: Vec<String>,
    pub specs: Json<IndexMap<String, String>>,
}

/// The subset of stored columns read by the list view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductSummaryRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub price: Option<f64>,
    pub category: String,
    pub hero_image: Option<String>,
    pub tags: Vec<String>,
}

#[cfg(test)]
impl ProductRecord {
    pub fn from_new(id: Uuid, product: NewProduct) -> Self {
        Self {
            id,
            slug: product.slug,
            title: product.title,
            subtitle: product.subtitle,
            description: product.description,
            price: product.price,
            category: product.category,
            in_stock: product.in_stock,
            hero_image: product.hero_image,
            images: product.images,
            features: product.features,
            tags: product.tags,
            specs: Json(product.specs),
        }
    }
}

#[cfg(test)]
impl From<&ProductRecord> for ProductSummaryRecord {
    fn from(record: &ProductRecord) -> Self {
        Self {
            id: record.id,
            slug: record.slug.clone(),
            title: record.title.clone(),
            subtitle: record.subtitle.clone(),
            price: record.price,
            category: record.category.clone(),
            hero_image: record.hero_image.clone(),
            tags: record.tags.clone(),
        }
    }
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

/// Full product as returned by `GET /api/products/{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: String,
    pub in_stock: bool,
    pub hero_image: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub tags: Vec<String>,
    pub specs: IndexMap<String, String>,
}

/// List-view product: no description, images, features, specs or stock flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub price: Option<f64>,
    pub category: String,
    pub hero_image: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    pub items: Vec<ProductSummary>,
}

// ── Query parameters ──────────────────────────────────────────────────────────

/// Page size for the list view, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u32")]
pub struct Limit(u32);

impl Limit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Limit {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "limit must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            ))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub limit: Option<Limit>,
}
