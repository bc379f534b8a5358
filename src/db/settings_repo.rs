// src/db/settings_repo.rs

use sqlx::SqlitePool;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lê uma flag booleana. Linha ausente (nunca gravada) cai no padrão;
    /// valor ilegível idem, com aviso no log.
    pub async fn get_bool(&self, key: &str, default: bool) -> Result<bool, AppError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM settings WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((value,)) => match serde_json::from_str::<bool>(&value) {
                Ok(parsed) => Ok(parsed),
                Err(_) => {
                    tracing::warn!("valor ilegível para a configuração '{key}': {value}");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    /// Upsert: a primeira escrita cria a linha.
    pub async fn set_bool(&self, key: &str, value: bool) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(serde_json::to_string(&value).map_err(anyhow::Error::from)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
