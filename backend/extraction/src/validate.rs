//! Structural validation of repaired model output.
//!
//! Checks the repaired JSON against an explicit description of the invoice
//! schema (field names, types, length bounds) instead of trusting the
//! provider to have honored the requested response schema. Arithmetic
//! between the product fields is deliberately not checked.

use serde_json::Value;
use thiserror::Error;
use vatlens_core::{Invoice, Product};

/// A single schema mismatch, with the JSON path it was found at.
#[derive(Debug, Error)]
#[error("schema violation at {path}: {message}")]
pub struct SchemaViolation {
    path: String,
    message: String,
}

fn violation(path: impl Into<String>, message: impl Into<String>) -> SchemaViolation {
    SchemaViolation {
        path: path.into(),
        message: message.into(),
    }
}

/// Validate a repaired JSON value as an invoice.
///
/// Accepts either the enveloped form `{"data": {...}}` the model is asked
/// for, or a bare invoice object.
pub fn validate_invoice(value: &Value) -> Result<Invoice, SchemaViolation> {
    let inner = match value.get("data") {
        Some(data) if data.is_object() => data,
        _ => value,
    };
    let map = inner
        .as_object()
        .ok_or_else(|| violation("$", "expected an invoice object"))?;

    let date = match map.get("date") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let len = s.chars().count();
            if !(8..=10).contains(&len) {
                return Err(violation("date", "expected 8 to 10 characters"));
            }
            Some(s.clone())
        }
        Some(_) => return Err(violation("date", "expected a string or null")),
    };

    let mut products = Vec::new();
    match map.get("products") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                products.push(validate_product(index, item)?);
            }
        }
        Some(_) => return Err(violation("products", "expected an array")),
    }

    Ok(Invoice { date, products })
}

fn validate_product(index: usize, value: &Value) -> Result<Product, SchemaViolation> {
    let path = |field: &str| format!("products[{index}].{field}");
    let map = value
        .as_object()
        .ok_or_else(|| violation(format!("products[{index}]"), "expected an object"))?;

    let string_field = |field: &str, min: usize, max: Option<usize>| {
        let s = map
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| violation(path(field), "expected a string"))?;
        let len = s.chars().count();
        if len < min || max.is_some_and(|max| len > max) {
            return Err(violation(path(field), "length out of bounds"));
        }
        Ok(s.to_string())
    };

    let number_field = |field: &str| {
        map.get(field)
            .and_then(Value::as_f64)
            .ok_or_else(|| violation(path(field), "expected a number"))
    };

    let quantity = map
        .get("Quantity")
        .and_then(as_integer)
        .ok_or_else(|| violation(path("Quantity"), "expected an integer"))?;

    Ok(Product {
        item_id: string_field("Item_ID", 5, Some(12))?,
        description: string_field("Item_Description", 5, None)?,
        unit_price: number_field("Unit_Price")?,
        quantity,
        tax: number_field("Tax")?,
        total_amount: number_field("Total_Amount")?,
    })
}

/// Accept both proper JSON integers and whole-valued floats the model may
/// emit for integer columns.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_json() -> Value {
        json!({
            "Item_ID": "AB-1234",
            "Item_Description": "Front brake pad set",
            "Unit_Price": 120.0,
            "Quantity": 2,
            "Tax": 36.0,
            "Total_Amount": 276.0,
        })
    }

    #[test]
    fn accepts_enveloped_invoice() {
        let value = json!({"data": {"date": "01-01-2024", "products": [product_json()]}});
        let invoice = validate_invoice(&value).unwrap();
        assert_eq!(invoice.date.as_deref(), Some("01-01-2024"));
        assert_eq!(invoice.products.len(), 1);
        assert_eq!(invoice.products[0].item_id, "AB-1234");
    }

    #[test]
    fn accepts_bare_invoice_without_envelope() {
        let value = json!({"date": "01-01-2024", "products": []});
        let invoice = validate_invoice(&value).unwrap();
        assert_eq!(invoice.date.as_deref(), Some("01-01-2024"));
        assert!(invoice.products.is_empty());
    }

    #[test]
    fn null_date_is_allowed() {
        let value = json!({"date": null, "products": [product_json()]});
        let invoice = validate_invoice(&value).unwrap();
        assert_eq!(invoice.date, None);
    }

    #[test]
    fn missing_products_default_to_empty() {
        let invoice = validate_invoice(&json!({"date": "01-01-2024"})).unwrap();
        assert!(invoice.products.is_empty());
    }

    #[test]
    fn rejects_short_item_id() {
        let mut product = product_json();
        product["Item_ID"] = json!("A1");
        let value = json!({"date": null, "products": [product]});
        let err = validate_invoice(&value).unwrap_err();
        assert!(err.to_string().contains("Item_ID"));
    }

    #[test]
    fn rejects_short_description() {
        let mut product = product_json();
        product["Item_Description"] = json!("pad");
        let value = json!({"date": null, "products": [product]});
        assert!(validate_invoice(&value).is_err());
    }

    #[test]
    fn rejects_out_of_range_date() {
        let value = json!({"date": "2024", "products": []});
        assert!(validate_invoice(&value).is_err());
    }

    #[test]
    fn rejects_non_numeric_price() {
        let mut product = product_json();
        product["Unit_Price"] = json!("120 SAR");
        let value = json!({"date": null, "products": [product]});
        assert!(validate_invoice(&value).is_err());
    }

    #[test]
    fn whole_float_quantity_is_accepted() {
        let mut product = product_json();
        product["Quantity"] = json!(2.0);
        let value = json!({"date": null, "products": [product]});
        let invoice = validate_invoice(&value).unwrap();
        assert_eq!(invoice.products[0].quantity, 2);
    }

    #[test]
    fn fractional_quantity_is_rejected() {
        let mut product = product_json();
        product["Quantity"] = json!(2.5);
        let value = json!({"date": null, "products": [product]});
        assert!(validate_invoice(&value).is_err());
    }

    #[test]
    fn non_object_input_is_rejected() {
        assert!(validate_invoice(&json!([1, 2, 3])).is_err());
        assert!(validate_invoice(&json!("invoice")).is_err());
    }
}
