// src/services/order_service.rs

use std::collections::HashMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AdminRepository, CatalogRepository, OrderRepository, SettingsRepository},
    models::{
        catalog::Item,
        order::{
            CurrentOrders, IngredientSummary, Order, OrderDetails, OrderSelection, OrderStatus,
            OrderType,
        },
        settings::SETTING_DESERTS_ENABLED,
    },
};

// Janela de "pedidos atuais" e tamanho de página do histórico.
const CURRENT_WINDOW_HOURS: i64 = 24;
const COMPLETED_PAGE_SIZE: i64 = 20;

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    catalog_repo: CatalogRepository,
    admin_repo: AdminRepository,
    settings_repo: SettingsRepository,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        catalog_repo: CatalogRepository,
        admin_repo: AdminRepository,
        settings_repo: SettingsRepository,
    ) -> Self {
        Self {
            order_repo,
            catalog_repo,
            admin_repo,
            settings_repo,
        }
    }

    /// Cria SEMPRE um pedido novo em andamento. Não há fusão com pedidos
    /// existentes do mesmo tipo: quem bloqueia duplicata é a UI, via as
    /// flags de `current_orders`.
    pub async fn start_order(
        &self,
        user_id: &str,
        selection: OrderSelection,
    ) -> Result<Order, AppError> {
        let order = Order {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            status: OrderStatus::InProgress,
            selection,
            created_at: Utc::now(),
        };

        self.order_repo.insert(&order).await?;
        tracing::info!("pedido {} ({:?}) criado para {}", order.id, order.order_type(), user_id);
        Ok(order)
    }

    /// O "hub" de pedidos: em andamento OU criados nas últimas 24 horas,
    /// mais recentes primeiro, com itens resolvidos e as flags de bloqueio
    /// por tipo. Carrega também a flag de sobremesas para a UI decidir se
    /// libera a etapa.
    pub async fn current_orders(&self, user_id: &str) -> Result<CurrentOrders, AppError> {
        let since = Utc::now() - Duration::hours(CURRENT_WINDOW_HOURS);
        let orders = self.order_repo.list_for_user_since(user_id, since).await?;

        let has_in_progress = |order_type: OrderType| {
            orders
                .iter()
                .any(|o| o.status == OrderStatus::InProgress && o.order_type() == order_type)
        };
        let has_in_progress_drink = has_in_progress(OrderType::Drink);
        let has_in_progress_burger = has_in_progress(OrderType::Burger);
        let has_in_progress_dessert = has_in_progress(OrderType::Dessert);

        let data = self.resolve_details(orders, None).await?;
        let deserts_enabled = self
            .settings_repo
            .get_bool(SETTING_DESERTS_ENABLED, true)
            .await?;

        Ok(CurrentOrders {
            data,
            has_in_progress_drink,
            has_in_progress_burger,
            has_in_progress_dessert,
            deserts_enabled,
        })
    }

    pub async fn completed_orders(&self, user_id: &str) -> Result<Vec<OrderDetails>, AppError> {
        let orders = self
            .order_repo
            .list_completed_for_user(user_id, COMPLETED_PAGE_SIZE)
            .await?;
        self.resolve_details(orders, None).await
    }

    /// Conclui todos os pedidos em andamento do usuário de uma vez.
    pub async fn complete_all(&self, user_id: &str) -> Result<(), AppError> {
        let changed = self.order_repo.complete_all_in_progress(user_id).await?;
        if changed == 0 {
            return Err(AppError::NoActiveOrders);
        }
        tracing::info!("{changed} pedido(s) de {user_id} concluído(s)");
        Ok(())
    }

    // ---
    // Operações administrativas (a rota já passou pelo admin_guard)
    // ---

    /// Todos os pedidos da loja, com itens resolvidos e o nome de exibição
    /// do dono resolvido pelo cache de perfis (cai para o id cru).
    pub async fn all_orders(&self) -> Result<Vec<OrderDetails>, AppError> {
        let orders = self.order_repo.list_all().await?;

        let user_ids: Vec<&str> = {
            let mut ids: Vec<&str> = orders.iter().map(|o| o.user_id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let profiles = self.admin_repo.get_profiles(&user_ids).await?;

        let names: HashMap<String, String> = orders
            .iter()
            .map(|o| {
                let name = profiles
                    .get(&o.user_id)
                    .map(|p| p.display_name())
                    .unwrap_or_else(|| o.user_id.clone());
                (o.user_id.clone(), name)
            })
            .collect();

        self.resolve_details(orders, Some(&names)).await
    }

    pub async fn set_status(&self, order_id: Uuid, status: OrderStatus) -> Result<(), AppError> {
        // Sem validação de transição: qualquer status sobrescreve qualquer
        // outro, inclusive saindo de um estado terminal (ver DESIGN.md).
        self.order_repo.set_status(order_id, status).await
    }

    pub async fn delete_order(&self, order_id: Uuid) -> Result<(), AppError> {
        self.order_repo.delete(order_id).await
    }

    // ---
    // Resolução de itens para exibição
    // ---

    async fn resolve_details(
        &self,
        orders: Vec<Order>,
        user_names: Option<&HashMap<String, String>>,
    ) -> Result<Vec<OrderDetails>, AppError> {
        let mut item_ids: Vec<Uuid> = Vec::new();
        for order in &orders {
            if let Some(id) = order.selection.item_id() {
                item_ids.push(id);
            }
            item_ids.extend_from_slice(order.selection.ingredient_ids());
        }
        item_ids.sort_unstable();
        item_ids.dedup();

        let items: HashMap<Uuid, Item> = self
            .catalog_repo
            .get_items_by_ids(&item_ids)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let details = orders
            .into_iter()
            .map(|order| {
                let item = order.selection.item_id().and_then(|id| items.get(&id));

                // Ingredientes apagados do catálogo somem da lista em
                // silêncio; categoria pendurada vira "Other".
                let burger_ingredients = order
                    .selection
                    .ingredient_ids()
                    .iter()
                    .filter_map(|id| items.get(id))
                    .map(|ingredient| IngredientSummary {
                        name: ingredient.name.clone(),
                        category: ingredient
                            .category
                            .clone()
                            .unwrap_or_else(|| "Other".to_string()),
                    })
                    .collect();

                OrderDetails {
                    id: order.id,
                    order_type: order.order_type(),
                    status: order.status,
                    item_name: item.map(|i| i.name.clone()),
                    item_image: item.map(|i| i.image_path.clone()),
                    burger_ingredients,
                    user_name: user_names.map(|names| {
                        names
                            .get(&order.user_id)
                            .cloned()
                            .unwrap_or_else(|| order.user_id.clone())
                    }),
                    created_at: order.created_at,
                }
            })
            .collect();

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::CurrentUser;
    use crate::models::catalog::ItemType;
    use crate::services::catalog_service::CatalogService;
    use chrono::DateTime;
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    struct Ctx {
        orders: OrderService,
        catalog: CatalogService,
        admins: AdminRepository,
        settings: SettingsRepository,
        pool: SqlitePool,
    }

    async fn ctx() -> Ctx {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("pool em memória");
        sqlx::migrate!().run(&pool).await.expect("migrações");

        let catalog_repo = CatalogRepository::new(pool.clone());
        let admins = AdminRepository::new(pool.clone());
        let settings = SettingsRepository::new(pool.clone());
        let orders = OrderService::new(
            OrderRepository::new(pool.clone()),
            catalog_repo.clone(),
            admins.clone(),
            settings.clone(),
        );
        let catalog = CatalogService::new(catalog_repo);

        Ctx {
            orders,
            catalog,
            admins,
            settings,
            pool,
        }
    }

    async fn seed_drink(ctx: &Ctx, name: &str, quantity: i64) -> Uuid {
        ctx.catalog
            .create_item(name, "bebida", "/img/drink.png", ItemType::Drink, quantity, None)
            .await
            .unwrap()
            .id
    }

    async fn backdate(pool: &SqlitePool, order_id: Uuid, hours: i64) {
        let when: DateTime<Utc> = Utc::now() - Duration::hours(hours);
        sqlx::query("UPDATE orders SET created_at = ? WHERE id = ?")
            .bind(when)
            .bind(order_id)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn first_drink_order_scenario() {
        let ctx = ctx().await;
        let drink_id = seed_drink(&ctx, "Guaraná", 5).await;

        let order = ctx
            .orders
            .start_order("user_1", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(order.order_type(), OrderType::Drink);
        assert_eq!(order.selection.item_id(), Some(drink_id));

        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert_eq!(current.data.len(), 1);
        assert_eq!(current.data[0].item_name.as_deref(), Some("Guaraná"));
        assert!(current.has_in_progress_drink);
        assert!(!current.has_in_progress_burger);
        assert!(!current.has_in_progress_dessert);
    }

    #[tokio::test]
    async fn start_order_always_inserts_even_with_duplicate_in_progress() {
        let ctx = ctx().await;
        let drink_id = seed_drink(&ctx, "Cola", 5).await;

        ctx.orders
            .start_order("user_1", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();
        ctx.orders
            .start_order("user_1", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();

        // Nenhuma deduplicação do lado do servidor: duas linhas.
        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert_eq!(current.data.len(), 2);
        assert!(current.has_in_progress_drink);
    }

    #[tokio::test]
    async fn empty_burger_is_permitted() {
        let ctx = ctx().await;

        ctx.orders
            .start_order(
                "user_1",
                OrderSelection::Burger {
                    ingredient_ids: vec![],
                },
            )
            .await
            .unwrap();

        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert_eq!(current.data.len(), 1);
        assert_eq!(current.data[0].order_type, OrderType::Burger);
        assert!(current.data[0].burger_ingredients.is_empty());
        assert!(current.has_in_progress_burger);
    }

    #[tokio::test]
    async fn burger_ingredients_resolve_with_dangling_category_fallback() {
        let ctx = ctx().await;

        let cheese = ctx
            .catalog
            .create_item(
                "Cheddar",
                "Fatia",
                "/img/cheddar.png",
                ItemType::BurgerIngredient,
                0,
                Some("Queijos".to_string()),
            )
            .await
            .unwrap();
        let lettuce = ctx
            .catalog
            .create_item(
                "Alface",
                "Folha",
                "/img/alface.png",
                ItemType::BurgerIngredient,
                0,
                None,
            )
            .await
            .unwrap();

        ctx.orders
            .start_order(
                "user_1",
                OrderSelection::Burger {
                    ingredient_ids: vec![cheese.id, lettuce.id],
                },
            )
            .await
            .unwrap();

        let current = ctx.orders.current_orders("user_1").await.unwrap();
        let ingredients = &current.data[0].burger_ingredients;
        assert_eq!(ingredients.len(), 2);

        let lettuce_summary = ingredients.iter().find(|i| i.name == "Alface").unwrap();
        assert_eq!(lettuce_summary.category, "Other");
        let cheese_summary = ingredients.iter().find(|i| i.name == "Cheddar").unwrap();
        assert_eq!(cheese_summary.category, "Queijos");
    }

    #[tokio::test]
    async fn deleted_item_shows_as_unknown() {
        let ctx = ctx().await;
        let drink_id = seed_drink(&ctx, "Suco", 5).await;

        ctx.orders
            .start_order("user_1", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();
        ctx.catalog.delete_item(drink_id).await.unwrap();

        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert_eq!(current.data.len(), 1);
        assert!(current.data[0].item_name.is_none());
    }

    #[tokio::test]
    async fn window_excludes_old_terminal_orders_but_keeps_old_in_progress() {
        let ctx = ctx().await;
        let drink_id = seed_drink(&ctx, "Chá", 5).await;

        let old_completed = ctx
            .orders
            .start_order("user_1", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();
        ctx.orders
            .set_status(old_completed.id, OrderStatus::Completed)
            .await
            .unwrap();
        backdate(&ctx.pool, old_completed.id, 25).await;

        let old_in_progress = ctx
            .orders
            .start_order(
                "user_1",
                OrderSelection::Burger {
                    ingredient_ids: vec![],
                },
            )
            .await
            .unwrap();
        backdate(&ctx.pool, old_in_progress.id, 30).await;

        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert_eq!(current.data.len(), 1);
        assert_eq!(current.data[0].id, old_in_progress.id);
    }

    #[tokio::test]
    async fn complete_all_transitions_every_in_progress_order() {
        let ctx = ctx().await;
        let drink_id = seed_drink(&ctx, "Mate", 5).await;

        ctx.orders
            .start_order("user_1", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();
        ctx.orders
            .start_order(
                "user_1",
                OrderSelection::Burger {
                    ingredient_ids: vec![],
                },
            )
            .await
            .unwrap();

        ctx.orders.complete_all("user_1").await.unwrap();

        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert!(!current.has_in_progress_drink);
        assert!(!current.has_in_progress_burger);
        assert!(
            current
                .data
                .iter()
                .all(|o| o.status == OrderStatus::Completed)
        );

        let completed = ctx.orders.completed_orders("user_1").await.unwrap();
        assert_eq!(completed.len(), 2);
    }

    #[tokio::test]
    async fn complete_all_with_nothing_in_progress_is_a_domain_no_op() {
        let ctx = ctx().await;

        let err = ctx.orders.complete_all("user_1").await.unwrap_err();
        assert!(matches!(err, AppError::NoActiveOrders));
    }

    #[tokio::test]
    async fn admin_can_overwrite_a_terminal_status() {
        let ctx = ctx().await;
        let drink_id = seed_drink(&ctx, "Café", 5).await;

        let order = ctx
            .orders
            .start_order("user_1", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();

        ctx.orders
            .set_status(order.id, OrderStatus::Canceled)
            .await
            .unwrap();
        // Sem checagem de transição: canceled -> completed passa.
        ctx.orders
            .set_status(order.id, OrderStatus::Completed)
            .await
            .unwrap();

        let completed = ctx.orders.completed_orders("user_1").await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, order.id);
    }

    #[tokio::test]
    async fn set_status_and_delete_fail_for_missing_orders() {
        let ctx = ctx().await;
        let ghost = Uuid::new_v4();

        let err = ctx
            .orders
            .set_status(ghost, OrderStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = ctx.orders.delete_order(ghost).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn admin_listing_resolves_display_names_with_fallback() {
        let ctx = ctx().await;
        let drink_id = seed_drink(&ctx, "Limonada", 5).await;

        ctx.orders
            .start_order("user_known", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();
        ctx.orders
            .start_order("user_ghost", OrderSelection::Drink { item_id: drink_id })
            .await
            .unwrap();

        ctx.admins
            .upsert_profile(&CurrentUser {
                user_id: "user_known".to_string(),
                first_name: Some("Ana".to_string()),
                last_name: Some("Souza".to_string()),
                email: Some("ana@example.com".to_string()),
            })
            .await
            .unwrap();

        let all = ctx.orders.all_orders().await.unwrap();
        assert_eq!(all.len(), 2);

        let known = all
            .iter()
            .find(|o| o.user_name.as_deref() == Some("Ana Souza"));
        assert!(known.is_some());

        let ghost = all
            .iter()
            .find(|o| o.user_name.as_deref() == Some("user_ghost"));
        assert!(ghost.is_some());
    }

    #[tokio::test]
    async fn deserts_flag_defaults_to_true_and_reflects_upserts() {
        let ctx = ctx().await;

        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert!(current.deserts_enabled);

        ctx.settings
            .set_bool(SETTING_DESERTS_ENABLED, false)
            .await
            .unwrap();
        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert!(!current.deserts_enabled);

        ctx.settings
            .set_bool(SETTING_DESERTS_ENABLED, true)
            .await
            .unwrap();
        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert!(current.deserts_enabled);
    }

    #[tokio::test]
    async fn deleting_an_order_removes_it_everywhere() {
        let ctx = ctx().await;

        let cheese = ctx
            .catalog
            .create_item(
                "Cheddar",
                "Fatia",
                "/img/cheddar.png",
                ItemType::BurgerIngredient,
                0,
                None,
            )
            .await
            .unwrap();

        let order = ctx
            .orders
            .start_order(
                "user_1",
                OrderSelection::Burger {
                    ingredient_ids: vec![cheese.id],
                },
            )
            .await
            .unwrap();

        ctx.orders.delete_order(order.id).await.unwrap();

        let current = ctx.orders.current_orders("user_1").await.unwrap();
        assert!(current.data.is_empty());
        let all = ctx.orders.all_orders().await.unwrap();
        assert!(all.is_empty());
    }
}
