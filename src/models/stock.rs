use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Fabric categories offered by the stock entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stock_category")]
pub enum StockCategory {
    Cotton,
    Silk,
    Wool,
    Polyester,
    Linen,
    Denim,
    Velvet,
    Satin,
    Chiffon,
    Jersey,
    Other,
}

/// Units a stock item can be counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stock_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StockUnit {
    Pieces,
    Meters,
    Kg,
    Yards,
    Rolls,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: Uuid,
    pub name: String,
    pub category: StockCategory,
    pub unit: StockUnit,
    pub total_quantity: Decimal,
    // Initialized equal to total_quantity. Sales do not decrement it; the
    // original system never reconciled the two either.
    pub remaining_quantity: Decimal,
    pub price_per_unit: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockItemPayload {
    #[validate(length(min = 1, message = "The item name is required."))]
    pub name: String,

    pub category: StockCategory,
    pub unit: StockUnit,

    pub total_quantity: Decimal,
    pub price_per_unit: Decimal,
}

impl CreateStockItemPayload {
    /// The numeric fields must be strictly positive; `validator` has no
    /// Decimal range rule, so this mirrors the form checks by hand.
    pub fn validate_amounts(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();
        if self.total_quantity <= Decimal::ZERO {
            errors.add("totalQuantity", positive_error("Please enter a valid quantity."));
        }
        if self.price_per_unit <= Decimal::ZERO {
            errors.add(
                "pricePerUnit",
                positive_error("Please enter a valid price per unit."),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub(crate) fn positive_error(message: &'static str) -> validator::ValidationError {
    let mut err = validator::ValidationError::new("positive");
    err.message = Some(message.into());
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payload(quantity: Decimal, price: Decimal) -> CreateStockItemPayload {
        CreateStockItemPayload {
            name: "Cotton Fabric".to_string(),
            category: StockCategory::Cotton,
            unit: StockUnit::Meters,
            total_quantity: quantity,
            price_per_unit: price,
        }
    }

    #[test]
    fn positive_amounts_pass() {
        assert!(payload(dec!(100), dec!(5000)).validate_amounts().is_ok());
    }

    #[test]
    fn zero_or_negative_amounts_fail() {
        let errors = payload(dec!(0), dec!(-1)).validate_amounts().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("totalQuantity"));
        assert!(fields.contains_key("pricePerUnit"));
    }
}
