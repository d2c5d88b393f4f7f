//! Client dues aggregation.
//!
//! A pure fold over a client's invoices and their payments, producing the
//! client-level outstanding balance and a per-merchant breakdown. All sums
//! use `Decimal` so many small payments cannot drift the balance the way
//! floating-point accumulation would.
//!
//! The client-level balance and the per-merchant credits come out of the same
//! fold, so they agree exactly by construction: there is no second code path
//! that could round differently.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use billfold_core::BusinessId;

/// One invoice as consumed by the aggregator: its owning merchant, its total,
/// and the individual payment amounts applied to it.
#[derive(Debug, Clone)]
pub struct InvoiceDues {
    pub business_id: BusinessId,
    pub business_name: String,
    pub total: Decimal,
    pub payments: Vec<Decimal>,
}

/// Per-merchant accumulation bucket.
///
/// `credit` is recomputed after every accumulation, so a partially built
/// summary is still internally consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantDues {
    /// Merchant display name.
    pub business_name: String,
    /// Total billed by this merchant.
    pub total: Decimal,
    /// Total payments received by this merchant.
    pub paid: Decimal,
    /// Outstanding: `total - paid`. Negative on overpayment, never clamped.
    pub credit: Decimal,
}

/// The derived dues summary for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuesSummary {
    /// Outstanding balance across all merchants.
    pub total_credit: Decimal,
    /// Breakdown keyed by merchant.
    pub business_invoices: BTreeMap<BusinessId, MerchantDues>,
}

/// Fold a client's invoices into its dues summary.
#[must_use]
pub fn aggregate(invoices: &[InvoiceDues]) -> DuesSummary {
    let mut business_invoices: BTreeMap<BusinessId, MerchantDues> = BTreeMap::new();

    for invoice in invoices {
        let paid: Decimal = invoice.payments.iter().copied().sum();

        let bucket = business_invoices
            .entry(invoice.business_id)
            .or_insert_with(|| MerchantDues {
                business_name: invoice.business_name.clone(),
                total: Decimal::ZERO,
                paid: Decimal::ZERO,
                credit: Decimal::ZERO,
            });
        bucket.total += invoice.total;
        bucket.paid += paid;
        bucket.credit = bucket.total - bucket.paid;
    }

    // The grand total is the sum of the per-merchant credits from the same
    // fold, so the two views cannot disagree.
    let total_credit = business_invoices.values().map(|b| b.credit).sum();

    DuesSummary {
        total_credit,
        business_invoices,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn invoice(business_id: i32, total: &str, payments: &[&str]) -> InvoiceDues {
        InvoiceDues {
            business_id: BusinessId::new(business_id),
            business_name: format!("Business {business_id}"),
            total: dec(total),
            payments: payments.iter().map(|p| dec(p)).collect(),
        }
    }

    #[test]
    fn test_no_invoices_means_zero_dues() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total_credit, Decimal::ZERO);
        assert!(summary.business_invoices.is_empty());
    }

    #[test]
    fn test_outstanding_balance() {
        // [{total: 100, payments: [40, 30]}, {total: 50, payments: []}]
        // => outstanding = 100 + 50 - (40 + 30) = 80
        let invoices = vec![
            invoice(1, "100", &["40", "30"]),
            invoice(1, "50", &[]),
        ];
        let summary = aggregate(&invoices);
        assert_eq!(summary.total_credit, dec("80"));

        let bucket = &summary.business_invoices[&BusinessId::new(1)];
        assert_eq!(bucket.total, dec("150"));
        assert_eq!(bucket.paid, dec("70"));
        assert_eq!(bucket.credit, dec("80"));
    }

    #[test]
    fn test_overpayment_goes_negative() {
        // total 100, payments sum 120 => outstanding -20, not clamped to 0
        let invoices = vec![invoice(1, "100", &["70", "50"])];
        let summary = aggregate(&invoices);
        assert_eq!(summary.total_credit, dec("-20"));
        assert_eq!(
            summary.business_invoices[&BusinessId::new(1)].credit,
            dec("-20")
        );
    }

    #[test]
    fn test_per_merchant_credits_sum_to_total() {
        let invoices = vec![
            invoice(1, "100", &["25"]),
            invoice(2, "200", &["199.99"]),
            invoice(3, "0.01", &[]),
            invoice(2, "75.50", &["80"]),
        ];
        let summary = aggregate(&invoices);
        let merchant_sum: Decimal = summary.business_invoices.values().map(|b| b.credit).sum();
        assert_eq!(summary.total_credit, merchant_sum);

        // And both equal the grand billed minus the grand paid.
        let billed: Decimal = invoices.iter().map(|i| i.total).sum();
        let paid: Decimal = invoices
            .iter()
            .flat_map(|i| i.payments.iter().copied())
            .sum();
        assert_eq!(summary.total_credit, billed - paid);
    }

    #[test]
    fn test_many_small_payments_stay_exact() {
        // 0.1-style accumulation is exactly the drift Decimal avoids.
        let payments = vec!["0.10"; 1000];
        let invoices = vec![invoice(1, "100", &payments)];
        let summary = aggregate(&invoices);
        assert_eq!(summary.total_credit, Decimal::ZERO);
    }

    #[test]
    fn test_merchants_partition_invoices() {
        let invoices = vec![
            invoice(1, "10", &[]),
            invoice(2, "20", &["5"]),
            invoice(1, "30", &["30"]),
        ];
        let summary = aggregate(&invoices);
        assert_eq!(summary.business_invoices.len(), 2);
        assert_eq!(summary.business_invoices[&BusinessId::new(1)].credit, dec("10"));
        assert_eq!(summary.business_invoices[&BusinessId::new(2)].credit, dec("15"));
        assert_eq!(summary.total_credit, dec("25"));
    }
}
