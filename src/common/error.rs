// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Taxonomia de erros do domínio. Toda falha da camada de store é convertida
// em uma destas variantes na própria fronteira da operação; nenhum erro
// "cru" do sqlx chega ao cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validação manual (campos fora do alcance do derive do validator)
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Não autenticado")]
    Unauthenticated,

    #[error("Acesso restrito a administradores")]
    Unauthorized,

    // Condição de domínio, não uma falha de verdade: o "concluir tudo"
    // não encontrou nenhum pedido em andamento.
    #[error("Nenhum pedido ativo encontrado")]
    NoActiveOrders,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{entity} não encontrado."))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::Unauthorized => (
                StatusCode::FORBIDDEN,
                "Acesso restrito a administradores.".to_string(),
            ),
            AppError::NoActiveOrders => (
                StatusCode::CONFLICT,
                "Nenhum pedido ativo encontrado.".to_string(),
            ),

            // DatabaseError e Internal viram 500 genérico. O detalhe fica
            // apenas no log.
            ref e => {
                tracing::error!("Erro interno do servidor: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
