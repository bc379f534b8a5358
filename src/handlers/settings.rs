// src/handlers/settings.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    models::settings::{SETTING_DESERTS_ENABLED, StoreSettings},
};

/// Flags da loja. Lida tanto pelo fluxo de pedido (para liberar ou não a
/// etapa de sobremesa) quanto pelo painel administrativo.
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Configurações da loja", body = StoreSettings))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    // Linha ausente = sobremesas habilitadas (padrão de fábrica).
    let deserts_enabled = app_state
        .settings_repo
        .get_bool(SETTING_DESERTS_ENABLED, true)
        .await?;
    Ok((StatusCode::OK, Json(StoreSettings { deserts_enabled })))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings/deserts",
    tag = "admin",
    request_body = StoreSettings,
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Flag de sobremesas gravada", body = StoreSettings))
)]
pub async fn update_deserts(
    State(app_state): State<AppState>,
    Json(payload): Json<StoreSettings>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .settings_repo
        .set_bool(SETTING_DESERTS_ENABLED, payload.deserts_enabled)
        .await?;
    Ok((StatusCode::OK, Json(payload)))
}
