use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, format::amount_preview},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::sales::{Sale, SalePayload, MATERIAL_OPTIONS},
};

#[utoipa::path(
    get,
    path = "/api/sales/materials",
    tag = "Sales",
    responses((status = 200, description = "The fixed material catalogue", body = [String])),
    security(("api_jwt" = []))
)]
pub async fn list_materials() -> Json<Vec<&'static str>> {
    Json(MATERIAL_OPTIONS.to_vec())
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PreviewQuery {
    pub rate: Decimal,
    pub quantity: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    /// rate × quantity, rendered to two decimal places as the form shows it.
    pub amount: String,
}

#[utoipa::path(
    get,
    path = "/api/sales/preview",
    tag = "Sales",
    params(PreviewQuery),
    responses((status = 200, description = "Computed form preview", body = PreviewResponse)),
    security(("api_jwt" = []))
)]
pub async fn preview_amount(Query(query): Query<PreviewQuery>) -> Json<PreviewResponse> {
    Json(PreviewResponse {
        amount: amount_preview(query.rate, query.quantity),
    })
}

#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = SalePayload,
    responses(
        (status = 201, description = "Transaction recorded", body = Sale),
        (status = 400, description = "Validation failed")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_amounts().map_err(AppError::ValidationError)?;

    let sale = app_state.sales_service.record_sale(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    responses((status = 200, description = "The caller's transactions, newest first", body = [Sale])),
    security(("api_jwt" = []))
)]
pub async fn list_my_sales(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Sale>>, AppError> {
    let sales = app_state.sales_service.list_for_user(user.id).await?;
    Ok(Json(sales))
}

#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Sales",
    request_body = SalePayload,
    params(("id" = Uuid, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction updated", body = Sale),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Unknown transaction")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SalePayload>,
) -> Result<Json<Sale>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_amounts().map_err(AppError::ValidationError)?;

    let sale = app_state
        .sales_service
        .update_sale(&user, id, &payload)
        .await?;
    Ok(Json(sale))
}

#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "Transaction id")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Unknown transaction")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.sales_service.delete_sale(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
