use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{SalesRepository, StockRepository, UserRepository},
    handlers::documents::DocumentStore,
    live::SnapshotHub,
    services::{auth::AuthService, sales_service::SalesService, stock_service::StockService},
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub stock_service: StockService,
    pub sales_service: SalesService,
    pub hub: SnapshotHub,
    pub documents: DocumentStore,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("database connection established");

        // Dependency wiring: repositories feed services, the hub feeds both
        // write paths and the live endpoints.
        let user_repo = UserRepository::new(db_pool.clone());
        let stock_repo = StockRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());

        let hub = SnapshotHub::new(sales_repo.clone(), stock_repo.clone());
        let auth_service = AuthService::new(user_repo, jwt_secret);
        let stock_service = StockService::new(stock_repo, hub.clone());
        let sales_service = SalesService::new(sales_repo, hub.clone());

        Ok(Self {
            db_pool,
            auth_service,
            stock_service,
            sales_service,
            hub,
            documents: DocumentStore::new(),
        })
    }

    /// Listen address, defaulting to the usual dev port.
    pub fn bind_addr() -> String {
        env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
    }
}
