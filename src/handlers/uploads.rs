// src/handlers/uploads.rs

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;

use crate::{common::error::AppError, config::AppState};

/// Recebe a imagem de um item (multipart, campo "file"), grava em
/// `UPLOAD_DIR/items` com nome único e devolve o caminho público que vai
/// no campo `imagePath` do item.
#[utoipa::path(
    post,
    path = "/api/admin/uploads",
    tag = "admin",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Imagem gravada"),
        (status = 400, description = "Nenhum arquivo enviado"),
    )
)]
pub async fn upload_image(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Upload inválido: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        // Espaços no nome original viram hífen, como no resto do sistema.
        let original_name = field
            .file_name()
            .unwrap_or("imagem")
            .replace(char::is_whitespace, "-");

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Upload inválido: {e}")))?;

        let filename = format!("{}-{}", Utc::now().timestamp_millis(), original_name);
        let dir = app_state.upload_dir.join("items");

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(anyhow::Error::from)?;
        tokio::fs::write(dir.join(&filename), &bytes)
            .await
            .map_err(anyhow::Error::from)?;

        let image_path = format!("/uploads/items/{filename}");
        tracing::info!("imagem gravada em {image_path}");
        return Ok((StatusCode::CREATED, Json(json!({ "imagePath": image_path }))));
    }

    Err(AppError::InvalidInput("Nenhum arquivo enviado.".to_string()))
}
