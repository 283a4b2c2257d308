pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod live;
pub mod sales;
pub mod stock;
