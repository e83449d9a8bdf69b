//! Invoice data model.
//!
//! Wire field names keep the casing of the public API contract
//! (`Item_ID`, `Unit_Price`, ...) via serde renames; Rust field names stay
//! snake_case.

use serde::{Deserialize, Serialize};

/// One line item on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Part number or unique identifier for the item, 5 to 12 characters.
    #[serde(rename = "Item_ID")]
    pub item_id: String,

    /// Textual description of the item, at least 5 characters.
    #[serde(rename = "Item_Description")]
    pub description: String,

    /// Price for a single unit, excluding tax.
    #[serde(rename = "Unit_Price")]
    pub unit_price: f64,

    /// Number of units purchased.
    #[serde(rename = "Quantity")]
    pub quantity: i64,

    /// Total tax applied to the item.
    #[serde(rename = "Tax")]
    pub tax: f64,

    /// Total cost of the item, including tax.
    #[serde(rename = "Total_Amount")]
    pub total_amount: f64,
}

/// The structured record extracted from one invoice image.
///
/// Arithmetic relationships between the product fields are not enforced;
/// the model's numbers are passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice issue date (`DD-MM-YYYY`), when the model could read one.
    pub date: Option<String>,

    /// Line items in document order.
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Success response body: the invoice wrapped under a `data` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceEnvelope {
    pub data: Invoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_uses_wire_field_names() {
        let product = Product {
            item_id: "AB-1234".to_string(),
            description: "Brake pad set".to_string(),
            unit_price: 120.0,
            quantity: 2,
            tax: 36.0,
            total_amount: 276.0,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({
                "Item_ID": "AB-1234",
                "Item_Description": "Brake pad set",
                "Unit_Price": 120.0,
                "Quantity": 2,
                "Tax": 36.0,
                "Total_Amount": 276.0,
            })
        );
    }

    #[test]
    fn invoice_products_default_to_empty() {
        let invoice: Invoice = serde_json::from_value(json!({"date": null})).unwrap();
        assert_eq!(invoice.date, None);
        assert!(invoice.products.is_empty());
    }
}
