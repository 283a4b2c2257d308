pub mod analytics;
pub mod auth;
pub mod export;
pub mod sales_service;
pub mod stock_service;
