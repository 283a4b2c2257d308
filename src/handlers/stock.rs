use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::stock::{CreateStockItemPayload, StockItem},
};

#[utoipa::path(
    post,
    path = "/api/stock/items",
    tag = "Stock",
    request_body = CreateStockItemPayload,
    responses(
        (status = 201, description = "Stock item created", body = StockItem),
        (status = 400, description = "Validation failed")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_stock_item(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateStockItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_amounts().map_err(AppError::ValidationError)?;

    let item = app_state
        .stock_service
        .create_item(
            payload.name.trim(),
            payload.category,
            payload.unit,
            payload.total_quantity,
            payload.price_per_unit,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/api/stock/items",
    tag = "Stock",
    responses((status = 200, description = "All stock items, newest first", body = [StockItem])),
    security(("api_jwt" = []))
)]
pub async fn list_stock_items(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<StockItem>>, AppError> {
    let items = app_state.stock_service.list_items().await?;
    Ok(Json(items))
}
