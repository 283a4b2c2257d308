//! Full-snapshot live data. Each collection has a `watch` channel holding the
//! latest complete result set; writers replace the whole snapshot after every
//! successful mutation and readers either borrow the current value or
//! subscribe for pushes. There is no diffing: a snapshot supersedes all
//! previously held results.

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    common::error::AppError,
    db::{SalesRepository, StockRepository},
    models::{sales::Sale, stock::StockItem},
};

/// Latest state of one collection. `Unavailable` means the snapshot was never
/// primed (backend unreachable) and is deliberately distinct from
/// `Ready` with an empty list.
#[derive(Debug)]
pub enum Snapshot<T> {
    Unavailable,
    Ready(Arc<Vec<T>>),
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        match self {
            Snapshot::Unavailable => Snapshot::Unavailable,
            Snapshot::Ready(data) => Snapshot::Ready(Arc::clone(data)),
        }
    }
}

impl<T> Snapshot<T> {
    /// The data, or the outage error the dashboard reports instead of zeros.
    pub fn ready(&self) -> Result<Arc<Vec<T>>, AppError> {
        match self {
            Snapshot::Unavailable => Err(AppError::SnapshotUnavailable),
            Snapshot::Ready(data) => Ok(Arc::clone(data)),
        }
    }
}

#[derive(Clone)]
pub struct SnapshotHub {
    sales_repo: SalesRepository,
    stock_repo: StockRepository,
    sales_tx: Arc<watch::Sender<Snapshot<Sale>>>,
    stock_tx: Arc<watch::Sender<Snapshot<StockItem>>>,
}

impl SnapshotHub {
    pub fn new(sales_repo: SalesRepository, stock_repo: StockRepository) -> Self {
        let (sales_tx, _) = watch::channel(Snapshot::Unavailable);
        let (stock_tx, _) = watch::channel(Snapshot::Unavailable);
        Self {
            sales_repo,
            stock_repo,
            sales_tx: Arc::new(sales_tx),
            stock_tx: Arc::new(stock_tx),
        }
    }

    /// Initial load at startup. A failure leaves the collection marked
    /// unavailable rather than pretending it is empty.
    pub async fn prime(&self) {
        if let Err(e) = self.refresh_sales().await {
            tracing::warn!("sales snapshot not primed: {}", e);
        }
        if let Err(e) = self.refresh_stock().await {
            tracing::warn!("stock snapshot not primed: {}", e);
        }
    }

    pub async fn refresh_sales(&self) -> Result<(), AppError> {
        let sales = self.sales_repo.list_all().await?;
        self.sales_tx.send_replace(Snapshot::Ready(Arc::new(sales)));
        Ok(())
    }

    pub async fn refresh_stock(&self) -> Result<(), AppError> {
        let items = self.stock_repo.list_items().await?;
        self.stock_tx.send_replace(Snapshot::Ready(Arc::new(items)));
        Ok(())
    }

    pub fn sales_snapshot(&self) -> Snapshot<Sale> {
        self.sales_tx.borrow().clone()
    }

    pub fn stock_snapshot(&self) -> Snapshot<StockItem> {
        self.stock_tx.borrow().clone()
    }

    pub fn subscribe_sales(&self) -> watch::Receiver<Snapshot<Sale>> {
        self.sales_tx.subscribe()
    }

    pub fn subscribe_stock(&self) -> watch::Receiver<Snapshot<StockItem>> {
        self.stock_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn hub() -> SnapshotHub {
        // Lazy pool: never connects, which is exactly what these tests need.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        SnapshotHub::new(SalesRepository::new(pool.clone()), StockRepository::new(pool))
    }

    #[tokio::test]
    async fn snapshots_start_unavailable_not_empty() {
        let hub = hub();
        assert!(matches!(hub.sales_snapshot(), Snapshot::Unavailable));
        assert!(matches!(hub.stock_snapshot(), Snapshot::Unavailable));
        assert!(hub.sales_snapshot().ready().is_err());
    }

    #[tokio::test]
    async fn subscribers_see_replaced_snapshots() {
        let hub = hub();
        let mut rx = hub.subscribe_sales();

        hub.sales_tx.send_replace(Snapshot::Ready(Arc::new(Vec::new())));
        rx.changed().await.unwrap();

        let snapshot = rx.borrow_and_update().clone();
        let data = snapshot.ready().unwrap();
        assert!(data.is_empty());
    }
}
