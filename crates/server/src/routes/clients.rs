//! Client route handlers: the scoped list with dues summaries, and the
//! upsert-by-phone write.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use billfold_core::{BusinessId, ClientId, Email, InvoiceId, PageParams, Pagination, Phone};

use crate::db::{ClientListQuery, ClientRepository, ClientSortKey, SortOrder};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Client, ClientWithDues, UpsertClientInput};
use crate::services::dues::{self, InvoiceDues};
use crate::state::AppState;

/// Query parameters for the client list.
///
/// Aliases keep the original dashboard's camelCase parameters working.
#[derive(Debug, Deserialize)]
pub struct ClientListParams {
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

/// Response body for the client list.
#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    pub clients: Vec<ClientWithDues>,
    pub pagination: Pagination,
}

/// List the account's clients, each decorated with its outstanding balance
/// and per-merchant breakdown.
#[instrument(skip(state))]
pub async fn list_clients(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ClientListParams>,
) -> Result<Json<ClientsResponse>> {
    let page = PageParams::new(params.page.unwrap_or(1), params.limit.unwrap_or(10))
        .ok_or_else(|| AppError::Validation("Page and limit must be positive".to_string()))?;

    let query = ClientListQuery {
        user_id: user.id,
        search: params.search.clone(),
        business_id: params.business_id.map(BusinessId::new),
        sort_by: ClientSortKey::from_param(params.sort_by.as_deref()),
        sort_order: SortOrder::from_param(params.sort_order.as_deref()),
    };

    let repo = ClientRepository::new(state.pool());
    let (clients, total) = tokio::try_join!(repo.list(&query, page), repo.count(&query))?;

    // Eager-load the invoice/payment tree for this page of clients, then
    // fold it into dues summaries in memory.
    let client_ids: Vec<ClientId> = clients.iter().map(|c| c.id).collect();
    let invoices = repo.invoices_for_clients(&client_ids).await?;
    let invoice_ids: Vec<InvoiceId> = invoices.iter().map(|i| InvoiceId::new(i.id)).collect();
    let payments = repo.payments_for_invoices(&invoice_ids).await?;

    let mut payments_by_invoice: HashMap<i32, Vec<Decimal>> = HashMap::new();
    for payment in payments {
        payments_by_invoice
            .entry(payment.invoice_id)
            .or_default()
            .push(payment.amount);
    }

    let mut dues_by_client: HashMap<i32, Vec<InvoiceDues>> = HashMap::new();
    for invoice in invoices {
        dues_by_client
            .entry(invoice.client_id)
            .or_default()
            .push(InvoiceDues {
                business_id: BusinessId::new(invoice.business_id),
                business_name: invoice.business_name,
                total: invoice.total,
                payments: payments_by_invoice
                    .remove(&invoice.id)
                    .unwrap_or_default(),
            });
    }

    let clients = clients
        .into_iter()
        .map(|client| {
            let invoices = dues_by_client
                .remove(&client.id.as_i32())
                .unwrap_or_default();
            let summary = dues::aggregate(&invoices);
            ClientWithDues {
                client,
                total_credit: summary.total_credit,
                business_invoices: summary.business_invoices,
            }
        })
        .collect();

    Ok(Json(ClientsResponse {
        clients,
        pagination: page.summarize(total),
    }))
}

/// Create or update a client, keyed by (account, phone).
#[instrument(skip(state, input))]
pub async fn upsert_client(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpsertClientInput>,
) -> Result<Json<Client>> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    let phone =
        Phone::parse(&input.phone).map_err(|e| AppError::Validation(e.to_string()))?;
    if let Some(email) = input.email.as_deref().filter(|e| !e.trim().is_empty()) {
        Email::parse(email).map_err(|e| AppError::Validation(e.to_string()))?;
    }

    let client = ClientRepository::new(state.pool())
        .upsert_by_phone(user.id, &phone, &input)
        .await?;

    Ok(Json(client))
}
