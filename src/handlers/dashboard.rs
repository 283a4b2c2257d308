use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{Local, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::{
        error::AppError,
        format::{format_currency, format_date},
    },
    config::AppState,
    models::{analytics::SalesAnalytics, stock::StockItem},
    services::{analytics, export},
};

/// Everything the admin dashboard needs in one round trip: the derived sales
/// aggregates, the stock inventory cards, and the pre-formatted card strings
/// the original rendered client-side.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub analytics: SalesAnalytics,
    pub stock_items: Vec<StockItem>,
    pub today_revenue_display: String,
    pub total_revenue_display: String,
    pub generated_at: String,
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Aggregates over the latest snapshot", body = DashboardResponse),
        (status = 503, description = "Snapshots not primed, data unavailable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let sales = app_state.hub.sales_snapshot().ready()?;
    let stock = app_state.hub.stock_snapshot().ready()?;

    let today = Local::now().date_naive();
    let analytics = analytics::calculate(&sales, today);
    Ok(Json(DashboardResponse {
        today_revenue_display: format_currency(analytics.today_sales.total),
        total_revenue_display: format_currency(analytics.total_sales.total),
        generated_at: format_date(Utc::now()),
        analytics,
        stock_items: stock.as_ref().clone(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/export",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Sales report as CSV"),
        (status = 503, description = "Snapshots not primed, data unavailable")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_sales(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.hub.sales_snapshot().ready()?;
    let csv = export::sales_csv(&sales);

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export::report_filename()),
        ),
    ];
    Ok((headers, csv))
}
