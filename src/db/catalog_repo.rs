// src/db/catalog_repo.rs

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Category, Item, ItemType},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Itens
    // ---

    pub async fn list_items(&self, item_type: Option<ItemType>) -> Result<Vec<Item>, AppError> {
        let items = match item_type {
            Some(item_type) => {
                sqlx::query_as::<_, Item>(
                    "SELECT * FROM items WHERE item_type = ? ORDER BY created_at DESC",
                )
                .bind(item_type)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Item>("SELECT * FROM items ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(items)
    }

    pub async fn get_items_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Item>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM items WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        builder.push(")");

        let items = builder
            .build_query_as::<Item>()
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn insert_item(&self, item: &Item) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO items (id, name, description, image_path, item_type, quantity, category, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.image_path)
        .bind(item.item_type)
        .bind(item.quantity)
        .bind(&item.category)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Atualização parcial: só nome/descrição/estoque/categoria. O tipo é
    /// imutável e fica de fora por contrato.
    pub async fn update_item(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        quantity: Option<i64>,
        category: Option<&str>,
    ) -> Result<Item, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET name        = COALESCE(?, name),
                description = COALESCE(?, description),
                quantity    = COALESCE(?, quantity),
                category    = COALESCE(?, category),
                updated_at  = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(quantity)
        .bind(category)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item"));
        }

        let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item"));
        }
        Ok(())
    }

    // ---
    // Categorias
    // ---

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    pub async fn insert_category(&self, category: &Category) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO categories (id, name, kind, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.kind)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "A categoria '{}' já existe.",
                        category.name
                    ));
                }
            }
            e.into()
        })?;
        Ok(())
    }

    /// Apaga só a categoria. Itens que carregam o nome dela ficam com o
    /// rótulo pendurado, de propósito.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Categoria"));
        }
        Ok(())
    }
}
