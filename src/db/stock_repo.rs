use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::stock::{StockCategory, StockItem, StockUnit},
};

/// All access to the `stock_items` table. Items are append-only: the UI never
/// edits or deletes them.
#[derive(Clone)]
pub struct StockRepository {
    pool: PgPool,
}

impl StockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_item(
        &self,
        name: &str,
        category: StockCategory,
        unit: StockUnit,
        total_quantity: Decimal,
        price_per_unit: Decimal,
    ) -> Result<StockItem, AppError> {
        // remaining starts equal to total; nothing decrements it on sale.
        let item = sqlx::query_as::<_, StockItem>(
            r#"
            INSERT INTO stock_items
                (name, category, unit, total_quantity, remaining_quantity, price_per_unit)
            VALUES ($1, $2, $3, $4, $4, $5)
            RETURNING id, name, category, unit, total_quantity, remaining_quantity,
                      price_per_unit, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(unit)
        .bind(total_quantity)
        .bind(price_per_unit)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn list_items(&self) -> Result<Vec<StockItem>, AppError> {
        let items = sqlx::query_as::<_, StockItem>(
            r#"
            SELECT id, name, category, unit, total_quantity, remaining_quantity,
                   price_per_unit, created_at, updated_at
            FROM stock_items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
