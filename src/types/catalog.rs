use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::CatalogError;

/// Request body for `POST /products` and `PUT /products/{id}`.
///
/// An `id` field in the body is ignored; identity comes from storage or the path.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category_id: i64,
}

impl ProductPayload {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidPayload(
                "product name must not be blank".to_string(),
            ));
        }
        if self.price < Decimal::ZERO {
            return Err(CatalogError::InvalidPayload(
                "price must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request body for `POST /categories`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
}

impl CategoryPayload {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidPayload(
                "category name must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_payload_reads_camel_case_and_ignores_id() {
        let payload: ProductPayload = serde_json::from_str(
            r#"{"id": 42, "name": "Tablet", "description": "10 inch", "price": 349.5, "categoryId": 1}"#,
        )
        .expect("valid payload");
        assert_eq!(payload.name, "Tablet");
        assert_eq!(payload.price, Decimal::new(3495, 1));
        assert_eq!(payload.category_id, 1);
    }

    #[test]
    fn description_defaults_to_empty() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"name": "Pen", "price": 2, "categoryId": 2}"#)
                .expect("valid payload");
        assert!(payload.description.is_empty());
    }

    #[test]
    fn negative_price_is_rejected() {
        let payload = ProductPayload {
            name: "Refund".to_string(),
            description: String::new(),
            price: Decimal::new(-1, 0),
            category_id: 1,
        };
        assert!(matches!(
            payload.validate(),
            Err(CatalogError::InvalidPayload(_))
        ));
    }

    #[test]
    fn zero_price_is_accepted() {
        let payload = ProductPayload {
            name: "Sample".to_string(),
            description: String::new(),
            price: Decimal::ZERO,
            category_id: 1,
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn blank_category_name_is_rejected() {
        let payload = CategoryPayload {
            name: "   ".to_string(),
        };
        assert!(payload.validate().is_err());
    }
}
