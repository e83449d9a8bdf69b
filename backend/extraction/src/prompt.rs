//! Prompt and response schema sent to the vision model.
//!
//! The schema mirrors the invoice data model field for field, with per-field
//! descriptions so the model knows what each column on the invoice maps to.

use serde_json::{Value, json};

/// Fixed system instruction describing the extraction task.
pub fn system_instruction() -> String {
    [
        "You are a helpful assistant specialized in extracting structured data from images of Arabic VAT invoices.",
        "The user will provide an image of an invoice. Extract all data and combine into one JSON.",
        "Extract for each product: Item_ID, Item_Description, Unit_Price, Quantity, Tax, and Total_Amount.",
        "Also extract the invoice issue date (DD-MM-YYYY)",
        "Follow the exact response schema. Output JSON only, with no extra text or explanation.",
        "If invoice is in Arabic, keep all Arabic text and digits as-is.",
    ]
    .join("\n")
}

/// JSON schema constraining the model's reply to the invoice envelope.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "data": {
                "type": "OBJECT",
                "properties": {
                    "date": {
                        "type": "STRING",
                        "nullable": true,
                        "description": "Invoice issue date only (DD-MM-YYYY)"
                    },
                    "products": {
                        "type": "ARRAY",
                        "description": "List of products in the invoice",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "Item_ID": {
                                    "type": "STRING",
                                    "description": "The part number or unique identifier for the item listed on the invoice."
                                },
                                "Item_Description": {
                                    "type": "STRING",
                                    "description": "A textual description of the item, usually including product type and compatibility."
                                },
                                "Unit_Price": {
                                    "type": "NUMBER",
                                    "description": "The price for a single unit of the item, excluding any tax."
                                },
                                "Quantity": {
                                    "type": "INTEGER",
                                    "description": "The number of units of the item purchased."
                                },
                                "Tax": {
                                    "type": "NUMBER",
                                    "description": "The total amount of tax applied to the item."
                                },
                                "Total_Amount": {
                                    "type": "NUMBER",
                                    "description": "The total cost of the item, including tax."
                                }
                            },
                            "required": [
                                "Item_ID",
                                "Item_Description",
                                "Unit_Price",
                                "Quantity",
                                "Tax",
                                "Total_Amount"
                            ]
                        }
                    }
                },
                "required": ["date", "products"]
            }
        },
        "required": ["data"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_wraps_invoice_under_data() {
        let schema = response_schema();
        assert_eq!(schema["required"][0], "data");
        let product = &schema["properties"]["data"]["properties"]["products"]["items"];
        assert_eq!(product["properties"]["Item_ID"]["type"], "STRING");
        assert_eq!(product["properties"]["Quantity"]["type"], "INTEGER");
    }

    #[test]
    fn instruction_demands_json_only() {
        assert!(system_instruction().contains("Output JSON only"));
    }
}
