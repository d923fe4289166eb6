use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::{
    db,
    error::AppResult,
    models::{Limit, Product, ProductList, ProductQuery},
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ProductList>> {
    let start = Instant::now();
    let list = db::fetch_products(&state.storage, query.limit).await?;

    info!(
        count = list.items.len(),
        limit = query.limit.map(Limit::get),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products"
    );

    Ok(Json(list))
}

// ── Get by slug ───────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Product>> {
    let start = Instant::now();
    let product = db::fetch_product_by_slug(&state.storage, &slug).await?;

    info!(
        slug = %slug,
        id = %product.id,
        elapsed_ms = start.elapsed().as_millis(),
        "Fetched product"
    );

    Ok(Json(product))
}
