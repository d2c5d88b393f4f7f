//! Invoice domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use billfold_core::{BusinessId, ClientId, InvoiceId, InvoiceStatus};

/// An invoice row for the list endpoint, annotated with its client and
/// business names and the paid-to-date sum.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Billed client.
    pub client_id: ClientId,
    /// Client display name.
    pub client_name: String,
    /// Issuing business.
    pub business_id: BusinessId,
    /// Business display name.
    pub business_name: String,
    /// Invoice total.
    pub total: Decimal,
    /// Sum of recorded payments.
    pub paid: Decimal,
    /// Lifecycle status; informational, balances are always recomputed
    /// from totals and payments.
    pub status: InvoiceStatus,
    /// When the invoice was issued.
    pub created_at: DateTime<Utc>,
}
