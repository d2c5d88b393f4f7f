//! Invoice route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use billfold_core::{BusinessId, PageParams, Pagination};

use crate::db::{InvoiceListQuery, InvoiceRepository, InvoiceSortKey, SortOrder};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::InvoiceSummary;
use crate::state::AppState;

/// Query parameters for the invoice list.
#[derive(Debug, Deserialize)]
pub struct InvoiceListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Substring filter on the billed client's name.
    pub search: Option<String>,
    #[serde(alias = "businessId")]
    pub business_id: Option<i32>,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Response body for the invoice list.
#[derive(Debug, Serialize)]
pub struct InvoicesResponse {
    pub invoices: Vec<InvoiceSummary>,
    pub pagination: Pagination,
}

/// List the account's invoices with client/business names and the
/// paid-to-date sum.
#[instrument(skip(state))]
pub async fn list_invoices(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<InvoiceListParams>,
) -> Result<Json<InvoicesResponse>> {
    let page = PageParams::new(params.page.unwrap_or(1), params.limit.unwrap_or(10))
        .ok_or_else(|| AppError::Validation("Page and limit must be positive".to_string()))?;

    let query = InvoiceListQuery {
        user_id: user.id,
        search: params.search.clone(),
        business_id: params.business_id.map(BusinessId::new),
        sort_by: InvoiceSortKey::from_param(params.sort_by.as_deref()),
        sort_order: SortOrder::from_param(params.sort_order.as_deref()),
    };

    let repo = InvoiceRepository::new(state.pool());
    let (invoices, total) = tokio::try_join!(repo.list(&query, page), repo.count(&query))?;

    Ok(Json(InvoicesResponse {
        invoices,
        pagination: page.summarize(total),
    }))
}
