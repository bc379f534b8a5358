// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Claims do token emitido pelo provedor de identidade externo. Nós apenas
// verificamos e lemos; nunca emitimos tokens aqui.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,

    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// Identidade autenticada da requisição corrente, inserida nas extensions
// pelo auth_guard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            first_name: claims.first_name,
            last_name: claims.last_name,
            email: claims.email,
        }
    }
}

// Registro da allow-list de administradores. A simples presença de uma
// linha para a identidade é a autorização inteira; não há papéis.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub user_id: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Cache local do perfil do provedor de identidade, atualizado a cada
// requisição autenticada a partir das claims do token.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// "Nome Sobrenome", senão o e-mail, senão o identificador cru.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => self
                .email
                .clone()
                .unwrap_or_else(|| self.user_id.clone()),
        }
    }
}
