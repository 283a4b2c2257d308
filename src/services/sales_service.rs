use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SalesRepository,
    live::SnapshotHub,
    models::{
        auth::User,
        sales::{Sale, SalePayload, DEFAULT_SHOP},
    },
};

#[derive(Clone)]
pub struct SalesService {
    repo: SalesRepository,
    hub: SnapshotHub,
}

impl SalesService {
    pub fn new(repo: SalesRepository, hub: SnapshotHub) -> Self {
        Self { repo, hub }
    }

    pub async fn record_sale(&self, user: &User, payload: &SalePayload) -> Result<Sale, AppError> {
        let shop_name = user.shop_name.as_deref().unwrap_or(DEFAULT_SHOP);
        let sale = self
            .repo
            .create_sale(
                payload.material_name.trim(),
                payload.rate,
                payload.quantity,
                payload.unit,
                &payload.customer(),
                payload.total_amount(),
                shop_name,
                user.id,
            )
            .await?;

        self.push_snapshot().await;
        Ok(sale)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Sale>, AppError> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn update_sale(
        &self,
        user: &User,
        sale_id: Uuid,
        payload: &SalePayload,
    ) -> Result<Sale, AppError> {
        self.authorize(user, sale_id).await?;

        let sale = self
            .repo
            .update_sale(
                sale_id,
                payload.material_name.trim(),
                payload.rate,
                payload.quantity,
                payload.unit,
                &payload.customer(),
                payload.total_amount(),
            )
            .await?;

        self.push_snapshot().await;
        Ok(sale)
    }

    pub async fn delete_sale(&self, user: &User, sale_id: Uuid) -> Result<(), AppError> {
        self.authorize(user, sale_id).await?;
        self.repo.delete_sale(sale_id).await?;
        self.push_snapshot().await;
        Ok(())
    }

    /// A shop user may only touch their own transactions. Last write wins on
    /// concurrent edits; there is no conflict detection.
    async fn authorize(&self, user: &User, sale_id: Uuid) -> Result<(), AppError> {
        let sale = self
            .repo
            .find_by_id(sale_id)
            .await?
            .ok_or(AppError::SaleNotFound)?;
        if sale.user_id != user.id {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }

    async fn push_snapshot(&self) {
        // The write landed; a failed snapshot refresh only delays the push.
        if let Err(e) = self.hub.refresh_sales().await {
            tracing::warn!("sales snapshot refresh failed: {}", e);
        }
    }
}
