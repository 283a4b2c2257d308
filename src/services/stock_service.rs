use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::StockRepository,
    live::SnapshotHub,
    models::stock::{StockCategory, StockItem, StockUnit},
};

#[derive(Clone)]
pub struct StockService {
    repo: StockRepository,
    hub: SnapshotHub,
}

impl StockService {
    pub fn new(repo: StockRepository, hub: SnapshotHub) -> Self {
        Self { repo, hub }
    }

    pub async fn create_item(
        &self,
        name: &str,
        category: StockCategory,
        unit: StockUnit,
        total_quantity: Decimal,
        price_per_unit: Decimal,
    ) -> Result<StockItem, AppError> {
        let item = self
            .repo
            .create_item(name, category, unit, total_quantity, price_per_unit)
            .await?;

        // The write landed; a failed snapshot refresh only delays the push.
        if let Err(e) = self.hub.refresh_stock().await {
            tracing::warn!("stock snapshot refresh failed: {}", e);
        }
        Ok(item)
    }

    pub async fn list_items(&self) -> Result<Vec<StockItem>, AppError> {
        self.repo.list_items().await
    }
}
