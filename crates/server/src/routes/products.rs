//! Product route handlers for the dashboard catalog.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use billfold_core::{BusinessId, PageParams, Pagination};

use crate::db::{ProductListQuery, ProductRepository, ProductSortKey, SortOrder};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CreateProductInput, Product};
use crate::state::AppState;

/// Query parameters for the product list.
#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    #[serde(alias = "businessId")]
    pub business_id: Option<i32>,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Response body for the product list.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// List the account's products.
#[instrument(skip(state))]
pub async fn list_products(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<ProductsResponse>> {
    let page = PageParams::new(params.page.unwrap_or(1), params.limit.unwrap_or(10))
        .ok_or_else(|| AppError::Validation("Page and limit must be positive".to_string()))?;

    let query = ProductListQuery {
        user_id: user.id,
        search: params.search.clone(),
        business_id: params.business_id.map(BusinessId::new),
        sort_by: ProductSortKey::from_param(params.sort_by.as_deref()),
        sort_order: SortOrder::from_param(params.sort_order.as_deref()),
    };

    let repo = ProductRepository::new(state.pool());
    let (products, total) = tokio::try_join!(repo.list(&query, page), repo.count(&query))?;

    Ok(Json(ProductsResponse {
        products,
        pagination: page.summarize(total),
    }))
}

/// Create a product; positive starting stock also records an initial
/// stock-log entry.
#[instrument(skip(state, input))]
pub async fn create_product(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<Json<Product>> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if input.price < Decimal::ZERO {
        return Err(AppError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    if input.stock < 0 || input.min_stock < 0 {
        return Err(AppError::Validation(
            "Stock must not be negative".to_string(),
        ));
    }

    let product = ProductRepository::new(state.pool())
        .create(user.id, &input)
        .await?;

    Ok(Json(product))
}
