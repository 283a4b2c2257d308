use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::stock::positive_error;

/// Fixed material list offered by the sale form. Free text is also accepted,
/// so this is a convenience catalogue rather than a constraint.
pub const MATERIAL_OPTIONS: &[&str] = &[
    "Tanasha()",
    "Rotana",
    "tiktok",
    "Milano(sattin stretcher)",
    "Silk(sattin-halil)",
    "Wool peach",
    "Polyester plain",
    "Tetema",
    "American sattin crep",
    "English sattin plain",
    "Velvet plain",
    "Valvet spangle",
    "Valvet squeen",
    "Stone dubai",
    "Stone uganda",
    "Kikutiya",
    "Babi plain",
    "Zaitun plain",
    "Gomesi bagole",
    "plain",
    "Gomesi",
    "Other",
];

pub const DEFAULT_CUSTOMER: &str = "Walk-in Customer";
pub const DEFAULT_SHOP: &str = "Shop 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SaleUnit {
    Meters,
    Yards,
    Pieces,
    Rolls,
}

impl SaleUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            SaleUnit::Meters => "meters",
            SaleUnit::Yards => "yards",
            SaleUnit::Pieces => "pieces",
            SaleUnit::Rolls => "rolls",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub material_name: String,
    pub rate: Decimal,
    pub quantity: Decimal,
    pub unit: SaleUnit,
    pub customer_name: String,
    // rate × quantity, stored redundantly alongside its factors.
    pub total_amount: Decimal,
    pub shop_name: String,
    pub user_id: Uuid,
    pub sale_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shared body for creating and updating a transaction; both paths recompute
/// the stored total from rate × quantity.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    #[validate(length(min = 1, message = "Please enter a material name."))]
    pub material_name: String,

    pub rate: Decimal,
    pub quantity: Decimal,
    pub unit: SaleUnit,

    #[serde(default)]
    pub customer_name: Option<String>,
}

impl SalePayload {
    pub fn validate_amounts(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();
        if self.rate <= Decimal::ZERO {
            errors.add("rate", positive_error("Please enter a valid rate."));
        }
        if self.quantity <= Decimal::ZERO {
            errors.add("quantity", positive_error("Please enter a valid quantity."));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn total_amount(&self) -> Decimal {
        (self.rate * self.quantity).round_dp(2)
    }

    /// Trimmed customer name, falling back to the walk-in default.
    pub fn customer(&self) -> String {
        match self.customer_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_CUSTOMER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payload() -> SalePayload {
        SalePayload {
            material_name: "Rotana".to_string(),
            rate: dec!(15000),
            quantity: dec!(10),
            unit: SaleUnit::Meters,
            customer_name: None,
        }
    }

    #[test]
    fn total_is_rate_times_quantity() {
        assert_eq!(payload().total_amount(), dec!(150000));
    }

    #[test]
    fn blank_customer_defaults_to_walk_in() {
        let mut p = payload();
        assert_eq!(p.customer(), DEFAULT_CUSTOMER);
        p.customer_name = Some("   ".to_string());
        assert_eq!(p.customer(), DEFAULT_CUSTOMER);
        p.customer_name = Some("  Jane ".to_string());
        assert_eq!(p.customer(), "Jane");
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut p = payload();
        p.rate = dec!(0);
        p.quantity = dec!(-2);
        let errors = p.validate_amounts().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("rate"));
        assert!(fields.contains_key("quantity"));
    }

    #[test]
    fn material_catalogue_ends_with_other() {
        assert_eq!(MATERIAL_OPTIONS.len(), 22);
        assert_eq!(*MATERIAL_OPTIONS.last().unwrap(), "Other");
    }
}
