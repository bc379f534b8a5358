// src/handlers/admin.rs
//
// Painel de acompanhamento: tudo aqui já passou pelo auth_guard + admin_guard.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::order::OrderStatus};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    pub status: OrderStatus,
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Todos os pedidos da loja", body = [crate::models::order::OrderDetails]))
)]
pub async fn all_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.all_orders().await?;
    Ok((StatusCode::OK, Json(orders)))
}

/// Sobrescreve o status do pedido com qualquer um dos três valores, sem
/// checar a transição — inclusive para fora de um estado terminal.
#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    tag = "admin",
    request_body = UpdateOrderStatusPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Status atualizado"),
        (status = 404, description = "Pedido não encontrado"),
    )
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.set_status(id, payload.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Pedido removido"),
        (status = 404, description = "Pedido não encontrado"),
    )
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
