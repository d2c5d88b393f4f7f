//! Client domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billfold_core::{BusinessId, ClientId, UserId};

use crate::services::dues::MerchantDues;

/// A client (customer of one of the account holder's businesses).
///
/// Serialized camelCase; the dashboard reads `createdAt`, `totalCredit`,
/// and friends.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// Owning account.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Normalized phone number; dedup key within the account.
    pub phone: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A client decorated with its dues summary for the list endpoint.
///
/// The raw invoice collection is deliberately absent: the response carries
/// the derived summary only, keeping the payload compact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientWithDues {
    #[serde(flatten)]
    pub client: Client,
    /// Outstanding balance across all merchants; negative on overpayment.
    pub total_credit: Decimal,
    /// Per-merchant billed/paid/outstanding breakdown.
    pub business_invoices: BTreeMap<BusinessId, MerchantDues>,
}

/// Request body for the client upsert endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertClientInput {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_client() -> Client {
        Client {
            id: ClientId::new(1),
            user_id: UserId::new(2),
            name: "Asha Stores".to_string(),
            phone: "+919876543210".to_string(),
            email: None,
            address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_client_serializes_camel_case() {
        let json = serde_json::to_value(sample_client()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("userId"));
        assert!(obj.contains_key("createdAt"));
        assert!(obj.contains_key("updatedAt"));
        assert!(!obj.contains_key("user_id"));
    }

    #[test]
    fn test_dues_fields_use_dashboard_key_names() {
        let mut business_invoices = BTreeMap::new();
        business_invoices.insert(
            BusinessId::new(9),
            MerchantDues {
                business_name: "Ramdhanu Garments".to_string(),
                total: "150".parse().unwrap(),
                paid: "70".parse().unwrap(),
                credit: "80".parse().unwrap(),
            },
        );
        let decorated = ClientWithDues {
            client: sample_client(),
            total_credit: "80".parse().unwrap(),
            business_invoices,
        };

        let json = serde_json::to_value(&decorated).unwrap();
        let obj = json.as_object().unwrap();
        // Flattened client fields sit next to the dues summary.
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("totalCredit"));
        assert!(obj.contains_key("businessInvoices"));
        assert!(!obj.contains_key("total_credit"));

        let bucket = &json["businessInvoices"]["9"];
        assert_eq!(bucket["businessName"], "Ramdhanu Garments");
        assert_eq!(bucket["credit"], "80");
    }
}
