use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::sales::Sale;

/// `{count, total}` pair used for the today/overall cards.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub count: usize,
    pub total: Decimal,
}

impl SalesTotals {
    pub fn zero() -> Self {
        Self {
            count: 0,
            total: Decimal::ZERO,
        }
    }
}

/// Per-shop aggregate, kept in first-seen order for display.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShopAggregate {
    pub shop_name: String,
    pub count: usize,
    pub total: Decimal,
}

/// Per-material aggregate, kept in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialAggregate {
    pub material_name: String,
    pub total_quantity: Decimal,
    pub total_amount: Decimal,
    pub count: usize,
}

/// Pie-chart slice: top materials by revenue.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSlice {
    pub name: String,
    pub value: Decimal,
}

/// One bar of the daily sales chart. Days without sales produce no entry.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub sales: usize,
    pub amount: Decimal,
}

/// Everything the admin dashboard renders, derived in one pass from the
/// latest sales snapshot.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalytics {
    pub today_sales: SalesTotals,
    pub total_sales: SalesTotals,
    pub shop_sales: Vec<ShopAggregate>,
    pub material_sales: Vec<MaterialAggregate>,
    pub recent_transactions: Vec<Sale>,
    pub daily_sales_chart: Vec<DailyPoint>,
    pub material_distribution: Vec<MaterialSlice>,
}

impl SalesAnalytics {
    /// Identity value for the zero-record case.
    pub fn empty() -> Self {
        Self {
            today_sales: SalesTotals::zero(),
            total_sales: SalesTotals::zero(),
            shop_sales: Vec::new(),
            material_sales: Vec::new(),
            recent_transactions: Vec::new(),
            daily_sales_chart: Vec::new(),
            material_distribution: Vec::new(),
        }
    }
}
