//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billfold_core::{BusinessId, ProductId, UserId};

/// A product in the account holder's catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Owning account.
    pub user_id: UserId,
    /// Business the product is sold under.
    pub business_id: BusinessId,
    /// Display name.
    pub name: String,
    /// Free-form category label.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Sale price; never negative.
    pub price: Decimal,
    /// Image references.
    pub images: Vec<String>,
    /// Units currently on hand.
    pub stock: i32,
    /// Reorder threshold.
    pub min_stock: i32,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A product row returned by the nearby-products endpoint, annotated with
/// its merchant's name and distance from the query point.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(rename = "merchantName")]
    pub merchant_name: String,
    /// Distance to the owning merchant in kilometers. Stays snake_case on
    /// the wire, unlike the merchant name.
    pub distance_km: f64,
    pub images: Vec<String>,
    pub category: String,
    pub description: String,
}

/// Request body for creating a product.
///
/// Aliases accept the dashboard's camelCase body keys.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    #[serde(alias = "businessId")]
    pub business_id: BusinessId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default, alias = "minStock")]
    pub min_stock: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_product_key_names() {
        let product = NearbyProduct {
            id: ProductId::new(4),
            name: "Jasmine Tea".to_string(),
            price: "120.00".parse().unwrap(),
            merchant_name: "Chai Corner".to_string(),
            distance_km: 1.25,
            images: vec![],
            category: "beverages".to_string(),
            description: String::new(),
        };

        let json = serde_json::to_value(&product).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("merchantName"));
        assert!(obj.contains_key("distance_km"));
        assert!(!obj.contains_key("merchant_name"));
    }

    #[test]
    fn test_create_input_accepts_camel_case_body() {
        let input: CreateProductInput = serde_json::from_str(
            r#"{"businessId": 3, "name": "Jasmine Tea", "price": "120.00", "minStock": 2}"#,
        )
        .unwrap();
        assert_eq!(input.business_id, BusinessId::new(3));
        assert_eq!(input.min_stock, 2);
        assert_eq!(input.stock, 0);
    }
}
