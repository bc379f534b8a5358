// src/handlers/orders.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::order::OrderSelection,
};

/// Registra uma seleção do cliente como um pedido novo em andamento.
/// Sempre insere — um pedido em andamento do mesmo tipo NÃO é fundido nem
/// recusado aqui; a UI usa as flags do hub para bloquear a duplicata.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = OrderSelection,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Pedido criado", body = crate::models::order::Order),
        (status = 401, description = "Não autenticado"),
    )
)]
pub async fn start_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(selection): Json<OrderSelection>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .start_order(&user.0.user_id, selection)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// O hub de pedidos: em andamento ou das últimas 24h, com flags de bloqueio
/// por tipo e a flag de sobremesas. É este payload que o polling do cliente
/// busca a cada poucos segundos.
#[utoipa::path(
    get,
    path = "/api/orders/current",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Pedidos atuais", body = crate::models::order::CurrentOrders))
)]
pub async fn current_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let current = app_state
        .order_service
        .current_orders(&user.0.user_id)
        .await?;
    Ok((StatusCode::OK, Json(current)))
}

#[utoipa::path(
    get,
    path = "/api/orders/completed",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Histórico de pedidos concluídos", body = [crate::models::order::OrderDetails]))
)]
pub async fn completed_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let completed = app_state
        .order_service
        .completed_orders(&user.0.user_id)
        .await?;
    Ok((StatusCode::OK, Json(completed)))
}

/// Conclui todos os pedidos em andamento do usuário. Sem nenhum pedido
/// ativo, devolve 409 (condição de domínio, não erro de servidor).
#[utoipa::path(
    post,
    path = "/api/orders/complete",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Pedidos concluídos"),
        (status = 409, description = "Nenhum pedido ativo"),
    )
)]
pub async fn complete_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.complete_all(&user.0.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
