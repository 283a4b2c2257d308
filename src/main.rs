use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod live;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::routing::{admin_area_guard, shop_area_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // If configuration or the first connection fails, do not start.
    let app_state = AppState::new()
        .await
        .expect("failed to initialize application state");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("failed to run database migrations");
    tracing::info!("database migrations applied");

    // First full snapshots; an outage here leaves them marked unavailable.
    app_state.hub.prime().await;

    // Public: sign-in and registration.
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Any authenticated account.
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let document_routes = Router::new()
        .route(
            "/",
            post(handlers::documents::capture_document)
                .get(handlers::documents::list_documents)
                .delete(handlers::documents::release_documents),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Admin area: stock entry, dashboard, exports, live snapshots.
    let stock_routes = Router::new()
        .route(
            "/items",
            post(handlers::stock::create_stock_item).get(handlers::stock::list_stock_items),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_area_guard,
        ));

    let admin_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/export", get(handlers::dashboard::export_sales))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_area_guard,
        ));

    let live_routes = Router::new()
        .route("/sales", get(handlers::live::sales_stream))
        .route("/stock", get(handlers::live::stock_stream))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_area_guard,
        ));

    // Shop area: per-user transaction recording.
    let sales_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::create_sale).get(handlers::sales::list_my_sales),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        )
        .route("/materials", get(handlers::sales::list_materials))
        .route("/preview", get(handlers::sales::preview_amount))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            shop_area_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/stock", stock_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/live", live_routes)
        .nest("/api/sales", sales_routes)
        .with_state(app_state);

    let addr = AppState::bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .expect("failed to bind TCP listener");
    tracing::info!("server listening on {}", addr);
    axum::serve(listener, app).await.expect("axum server error");
}
