// src/services/catalog_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{CATEGORY_KIND_BURGER_INGREDIENT, Category, Item, ItemType},
};

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(catalog_repo: CatalogRepository) -> Self {
        Self { catalog_repo }
    }

    /// Lista o catálogo, opcionalmente por tipo. Com `in_stock_only`, bebidas
    /// zeradas saem da lista (a listagem administrativa passa `false` e
    /// enxerga tudo).
    pub async fn list_items(
        &self,
        item_type: Option<ItemType>,
        in_stock_only: bool,
    ) -> Result<Vec<Item>, AppError> {
        let mut items = self.catalog_repo.list_items(item_type).await?;
        if in_stock_only {
            items.retain(Item::is_orderable);
        }
        Ok(items)
    }

    pub async fn create_item(
        &self,
        name: &str,
        description: &str,
        image_path: &str,
        item_type: ItemType,
        quantity: i64,
        category: Option<String>,
    ) -> Result<Item, AppError> {
        if name.trim().is_empty()
            || description.trim().is_empty()
            || image_path.trim().is_empty()
        {
            return Err(AppError::InvalidInput(
                "Campos obrigatórios ausentes.".to_string(),
            ));
        }
        if quantity < 0 {
            return Err(AppError::InvalidInput(
                "O estoque não pode ser negativo.".to_string(),
            ));
        }

        // Ingredientes de hambúrguer não têm estoque rastreado: a quantidade
        // pedida é descartada e gravamos 0, sempre.
        let quantity = match item_type {
            ItemType::BurgerIngredient => 0,
            _ => quantity,
        };

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            image_path: image_path.to_string(),
            item_type,
            quantity,
            category,
            created_at: now,
            updated_at: now,
        };

        self.catalog_repo.insert_item(&item).await?;
        Ok(item)
    }

    /// Aplica só os campos presentes; o tipo nunca muda.
    pub async fn update_item(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
        quantity: Option<i64>,
        category: Option<String>,
    ) -> Result<Item, AppError> {
        if let Some(q) = quantity {
            if q < 0 {
                return Err(AppError::InvalidInput(
                    "O estoque não pode ser negativo.".to_string(),
                ));
            }
        }

        self.catalog_repo
            .update_item(
                id,
                name.as_deref(),
                description.as_deref(),
                quantity,
                category.as_deref(),
            )
            .await
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        self.catalog_repo.delete_item(id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.catalog_repo.list_categories().await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "O nome da categoria é obrigatório.".to_string(),
            ));
        }

        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind: CATEGORY_KIND_BURGER_INGREDIENT.to_string(),
            created_at: Utc::now(),
        };

        self.catalog_repo.insert_category(&category).await?;
        Ok(category)
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        self.catalog_repo.delete_category(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn service() -> CatalogService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("pool em memória");
        sqlx::migrate!().run(&pool).await.expect("migrações");
        CatalogService::new(CatalogRepository::new(pool))
    }

    #[tokio::test]
    async fn burger_ingredient_is_created_with_zero_stock() {
        let service = service().await;

        let item = service
            .create_item(
                "Cheddar",
                "Fatia de cheddar",
                "/uploads/items/cheddar.png",
                ItemType::BurgerIngredient,
                42,
                Some("Queijos".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(item.quantity, 0);

        let stored = service
            .list_items(Some(ItemType::BurgerIngredient), false)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].quantity, 0);
    }

    #[tokio::test]
    async fn drink_keeps_requested_stock() {
        let service = service().await;

        let item = service
            .create_item(
                "Guaraná",
                "Lata 350ml",
                "/uploads/items/guarana.png",
                ItemType::Drink,
                12,
                None,
            )
            .await
            .unwrap();

        assert_eq!(item.quantity, 12);
    }

    #[tokio::test]
    async fn create_item_rejects_blank_fields() {
        let service = service().await;

        let err = service
            .create_item("  ", "desc", "/img.png", ItemType::Drink, 1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = service
            .create_item("Nome", "desc", "", ItemType::Drink, 1, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn in_stock_filter_hides_empty_drinks_but_admin_sees_them() {
        let service = service().await;

        service
            .create_item("Água", "Garrafa", "/img/agua.png", ItemType::Drink, 0, None)
            .await
            .unwrap();
        service
            .create_item("Suco", "Copo", "/img/suco.png", ItemType::Drink, 3, None)
            .await
            .unwrap();

        let orderable = service
            .list_items(Some(ItemType::Drink), true)
            .await
            .unwrap();
        assert_eq!(orderable.len(), 1);
        assert_eq!(orderable[0].name, "Suco");

        let all = service
            .list_items(Some(ItemType::Drink), false)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn ingredients_stay_orderable_with_zero_stock() {
        let service = service().await;

        service
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

        let orderable = service
            .list_items(Some(ItemType::BurgerIngredient), true)
            .await
            .unwrap();
        assert_eq!(orderable.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_category_name_conflicts_and_keeps_original() {
        let service = service().await;

        let original = service.create_category("Molhos").await.unwrap();

        let err = service.create_category("Molhos").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let categories = service.list_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, original.id);
        assert_eq!(categories[0].name, "Molhos");
    }

    #[tokio::test]
    async fn blank_category_name_is_rejected() {
        let service = service().await;

        let err = service.create_category("   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn deleting_category_leaves_items_untouched() {
        let service = service().await;

        let category = service.create_category("Queijos").await.unwrap();
        let item = service
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

        service.delete_category(category.id).await.unwrap();

        // O item mantém o rótulo pendurado.
        let items = service
            .list_items(Some(ItemType::BurgerIngredient), false)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, item.id);
        assert_eq!(items[0].category.as_deref(), Some("Queijos"));
    }

    #[tokio::test]
    async fn update_applies_only_provided_fields() {
        let service = service().await;

        let item = service
            .create_item("Cola", "Lata", "/img/cola.png", ItemType::Drink, 10, None)
            .await
            .unwrap();

        let updated = service
            .update_item(item.id, None, None, Some(4), None)
            .await
            .unwrap();

        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.name, "Cola");
        assert_eq!(updated.description, "Lata");
        assert_eq!(updated.item_type, ItemType::Drink);
    }

    #[tokio::test]
    async fn update_and_delete_missing_item_fail_with_not_found() {
        let service = service().await;
        let ghost = Uuid::new_v4();

        let err = service
            .update_item(ghost, Some("X".to_string()), None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service.delete_item(ghost).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service.delete_category(ghost).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
