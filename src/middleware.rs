pub mod auth;
pub mod routing;
