// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{catalog::ItemType, settings::SETTING_DESERTS_ENABLED},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ItemListQuery {
    /// Filtra por tipo (drink | burgerIngredient | dessert).
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,

    /// Com `true`, bebidas sem estoque saem da lista.
    #[serde(default)]
    pub in_stock: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(length(min = 1, message = "A imagem é obrigatória."))]
    pub image_path: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    // Ignorado para ingredientes de hambúrguer (vira 0 no serviço).
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    #[serde(default)]
    pub quantity: i64,

    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar em branco."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "A descrição não pode ficar em branco."))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub quantity: Option<i64>,

    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome da categoria é obrigatório."))]
    pub name: String,
}

// ---
// Handlers: catálogo do cliente
// ---

/// Lista itens para as telas de seleção. Pedir sobremesas com a loja de
/// sobremesas desativada devolve 409, e a UI volta para o hub.
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "catalog",
    params(ItemListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Itens do catálogo", body = [crate::models::catalog::Item]),
        (status = 409, description = "Sobremesas desativadas"),
    )
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ItemListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.item_type == Some(ItemType::Dessert) {
        let enabled = app_state
            .settings_repo
            .get_bool(SETTING_DESERTS_ENABLED, true)
            .await?;
        if !enabled {
            return Err(AppError::Conflict(
                "As sobremesas estão desativadas no momento.".to_string(),
            ));
        }
    }

    let items = app_state
        .catalog_service
        .list_items(query.item_type, query.in_stock.unwrap_or(false))
        .await?;
    Ok((StatusCode::OK, Json(items)))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Categorias de ingredientes", body = [crate::models::catalog::Category]))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.list_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

// ---
// Handlers: gestão do catálogo (admin)
// ---

/// Listagem administrativa: sem filtro de estoque, bebidas zeradas aparecem.
#[utoipa::path(
    get,
    path = "/api/admin/items",
    tag = "admin",
    params(ItemListQuery),
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Itens (sem filtro de estoque)", body = [crate::models::catalog::Item]))
)]
pub async fn admin_list_items(
    State(app_state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state
        .catalog_service
        .list_items(query.item_type, false)
        .await?;
    Ok((StatusCode::OK, Json(items)))
}

#[utoipa::path(
    post,
    path = "/api/admin/items",
    tag = "admin",
    request_body = CreateItemPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Item criado", body = crate::models::catalog::Item),
        (status = 400, description = "Campos ausentes ou inválidos"),
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .catalog_service
        .create_item(
            &payload.name,
            &payload.description,
            &payload.image_path,
            payload.item_type,
            payload.quantity,
            payload.category,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/admin/items/{id}",
    tag = "admin",
    request_body = UpdateItemPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Item atualizado", body = crate::models::catalog::Item),
        (status = 404, description = "Item não encontrado"),
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .catalog_service
        .update_item(
            id,
            payload.name,
            payload.description,
            payload.quantity,
            payload.category,
        )
        .await?;
    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/items/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado"),
    )
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    tag = "admin",
    request_body = CreateCategoryPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Categoria criada", body = crate::models::catalog::Category),
        (status = 409, description = "Nome já existente"),
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .catalog_service
        .create_category(&payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Categoria removida"),
        (status = 404, description = "Categoria não encontrada"),
    )
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
