// src/db/order_repo.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderRow, OrderSelection, OrderStatus, OrderType},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insere SEMPRE uma linha nova, mesmo que já exista um pedido em
    /// andamento do mesmo tipo — a prevenção de duplicata é papel do
    /// chamador, não desta operação.
    pub async fn insert(&self, order: &Order) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, order_type, status, item_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.id)
        .bind(&order.user_id)
        .bind(order.order_type())
        .bind(order.status)
        .bind(order.selection.item_id())
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for ingredient_id in order.selection.ingredient_ids() {
            sqlx::query("INSERT INTO order_ingredients (order_id, item_id) VALUES (?, ?)")
                .bind(order.id)
                .bind(*ingredient_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Pedidos do usuário em andamento OU criados dentro da janela
    /// (últimas 24h no chamador), mais recentes primeiro.
    pub async fn list_for_user_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT * FROM orders
            WHERE user_id = ? AND (status = 'in-progress' OR created_at >= ?)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    pub async fn list_completed_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT * FROM orders
            WHERE user_id = ? AND status = 'completed'
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    pub async fn list_all(&self) -> Result<Vec<Order>, AppError> {
        let rows =
            sqlx::query_as::<_, OrderRow>("SELECT * FROM orders ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        self.hydrate(rows).await
    }

    /// Escreve qualquer status por cima do atual, sem checar a transição
    /// (comportamento do caminho administrativo; ver DESIGN.md).
    pub async fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pedido"));
        }
        Ok(())
    }

    /// Transiciona todos os pedidos em andamento do usuário para concluído.
    /// Devolve quantas linhas mudaram (zero vira NoActiveOrders no serviço).
    pub async fn complete_all_in_progress(&self, user_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE orders SET status = 'completed' WHERE user_id = ? AND status = 'in-progress'",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_ingredients WHERE order_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pedido"));
        }

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Montagem das variantes
    // ---

    // Remonta as linhas cruas na variante etiquetada por orderType. Linha
    // de bebida/sobremesa sem item associado é um documento malformado e
    // falha aqui, na fronteira do store.
    async fn hydrate(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, AppError> {
        let burger_ids: Vec<Uuid> = rows
            .iter()
            .filter(|r| r.order_type == OrderType::Burger)
            .map(|r| r.id)
            .collect();
        let mut ingredients = self.ingredients_by_order(&burger_ids).await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let selection = match row.order_type {
                OrderType::Drink => OrderSelection::Drink {
                    item_id: row.item_id.ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!(
                            "pedido de bebida {} sem item associado",
                            row.id
                        ))
                    })?,
                },
                OrderType::Dessert => OrderSelection::Dessert {
                    item_id: row.item_id.ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!(
                            "pedido de sobremesa {} sem item associado",
                            row.id
                        ))
                    })?,
                },
                OrderType::Burger => OrderSelection::Burger {
                    ingredient_ids: ingredients.remove(&row.id).unwrap_or_default(),
                },
            };

            orders.push(Order {
                id: row.id,
                user_id: row.user_id,
                status: row.status,
                selection,
                created_at: row.created_at,
            });
        }
        Ok(orders)
    }

    async fn ingredients_by_order(
        &self,
        order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, AppError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(FromRow)]
        struct IngredientRow {
            order_id: Uuid,
            item_id: Uuid,
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT order_id, item_id FROM order_ingredients WHERE order_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in order_ids {
            separated.push_bind(*id);
        }
        builder.push(")");

        let rows = builder
            .build_query_as::<IngredientRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut map: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in rows {
            map.entry(row.order_id).or_default().push(row.item_id);
        }
        Ok(map)
    }
}
