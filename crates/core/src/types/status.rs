//! Status enums for invoices.

use serde::{Deserialize, Serialize};

/// Invoice lifecycle status.
///
/// Informational only: the dues aggregation never derives balances from the
/// status, it always recomputes them from invoice totals and payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    PartiallyPaid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    /// Database representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::PartiallyPaid => "PARTIALLY_PAID",
            Self::Overdue => "OVERDUE",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parse the database representation, falling back to `Pending` for
    /// values written before the status column was constrained.
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "PAID" => Self::Paid,
            "PARTIALLY_PAID" => Self::PartiallyPaid,
            "OVERDUE" => Self::Overdue,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_roundtrip() {
        for status in [
            InvoiceStatus::Pending,
            InvoiceStatus::Paid,
            InvoiceStatus::PartiallyPaid,
            InvoiceStatus::Overdue,
            InvoiceStatus::Cancelled,
        ] {
            assert_eq!(InvoiceStatus::from_db(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_pending() {
        assert_eq!(InvoiceStatus::from_db("DRAFT"), InvoiceStatus::Pending);
    }
}
