pub mod analytics;
pub mod auth;
pub mod sales;
pub mod stock;
