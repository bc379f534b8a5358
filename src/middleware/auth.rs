// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Claims, CurrentUser},
};

// Valida o Bearer token emitido pelo provedor de identidade e insere o
// usuário corrente nas extensions. De quebra, atualiza o cache de perfil
// (melhor esforço: falha só gera aviso no log).
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    let Some(token) = auth_header.and_then(|h| h.strip_prefix("Bearer ")) else {
        return Err(AppError::Unauthenticated);
    };

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(app_state.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthenticated)?;

    let user = CurrentUser::from(token_data.claims);

    if let Err(e) = app_state.admin_repo.upsert_profile(&user).await {
        tracing::warn!("falha ao atualizar o perfil de {}: {e}", user.user_id);
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Porteiro das rotas administrativas. Pressupõe que o auth_guard já rodou;
// a autorização inteira é a presença da identidade na allow-list.
pub async fn admin_guard(
    State(app_state): State<AppState>,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or(AppError::Unauthenticated)?;

    if !app_state.admin_repo.is_admin(&user.user_id).await? {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::Unauthenticated)
    }
}
