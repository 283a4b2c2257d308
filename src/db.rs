pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod stock_repo;
pub use stock_repo::StockRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
