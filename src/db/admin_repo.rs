// src/db/admin_repo.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::auth::{Admin, CurrentUser, UserProfile},
};

#[derive(Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_admin(&self, user_id: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    /// A presença de uma linha na allow-list é a autorização inteira.
    pub async fn is_admin(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self.find_admin(user_id).await?.is_some())
    }

    /// Atualiza o cache de perfil com o que veio nas claims do token.
    pub async fn upsert_profile(&self, user: &CurrentUser) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, first_name, last_name, email, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name  = excluded.last_name,
                email      = excluded.email,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_profiles(
        &self,
        user_ids: &[&str],
    ) -> Result<HashMap<String, UserProfile>, AppError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder =
            QueryBuilder::<Sqlite>::new("SELECT * FROM user_profiles WHERE user_id IN (");
        let mut separated = builder.separated(", ");
        for id in user_ids {
            separated.push_bind(*id);
        }
        builder.push(")");

        let profiles = builder
            .build_query_as::<UserProfile>()
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles
            .into_iter()
            .map(|p| (p.user_id.clone(), p))
            .collect())
    }
}
