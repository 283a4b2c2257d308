use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{Sale, SaleUnit},
};

const SALE_COLUMNS: &str = "id, material_name, rate, quantity, unit, customer_name, \
                            total_amount, shop_name, user_id, sale_date, created_at, updated_at";

/// All access to the `sales` table.
#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_sale(
        &self,
        material_name: &str,
        rate: Decimal,
        quantity: Decimal,
        unit: SaleUnit,
        customer_name: &str,
        total_amount: Decimal,
        shop_name: &str,
        user_id: Uuid,
    ) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            r#"
            INSERT INTO sales
                (material_name, rate, quantity, unit, customer_name,
                 total_amount, shop_name, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SALE_COLUMNS}
            "#,
        ))
        .bind(material_name)
        .bind(rate)
        .bind(quantity)
        .bind(unit)
        .bind(customer_name)
        .bind(total_amount)
        .bind(shop_name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(sale)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(sale)
    }

    /// Full collection snapshot, newest first. Feeds the admin dashboard.
    pub async fn list_all(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY sale_date DESC",
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    /// One user's transactions, newest first. Feeds the shop screen.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE user_id = $1 ORDER BY sale_date DESC",
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_sale(
        &self,
        id: Uuid,
        material_name: &str,
        rate: Decimal,
        quantity: Decimal,
        unit: SaleUnit,
        customer_name: &str,
        total_amount: Decimal,
    ) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            r#"
            UPDATE sales
            SET material_name = $2, rate = $3, quantity = $4, unit = $5,
                customer_name = $6, total_amount = $7, updated_at = now()
            WHERE id = $1
            RETURNING {SALE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(material_name)
        .bind(rate)
        .bind(quantity)
        .bind(unit)
        .bind(customer_name)
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await?;
        Ok(sale)
    }

    pub async fn delete_sale(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
