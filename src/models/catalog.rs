// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Tipo do item ---
// Imutável após a criação; a camada de serviço nunca o atualiza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Drink,
    BurgerIngredient,
    Dessert,
}

// --- Item do catálogo ---
// Um item vendável/utilizável: bebida, ingrediente de hambúrguer ou sobremesa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_path: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    // Estoque só tem significado para bebidas; ingredientes de hambúrguer
    // não são rastreados e ficam sempre em 0.
    pub quantity: i64,

    // Nome da categoria (apenas ingredientes). Referência não-proprietária:
    // apagar a categoria deixa o rótulo "pendurado" aqui.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Um item pode entrar numa lista de seleção? Bebidas dependem do
    /// estoque; ingredientes e sobremesas são sempre oferecidos.
    pub fn is_orderable(&self) -> bool {
        match self.item_type {
            ItemType::Drink => self.quantity > 0,
            ItemType::BurgerIngredient | ItemType::Dessert => true,
        }
    }
}

// --- Categoria ---
// Agrupamento nomeado para ingredientes de hambúrguer. O campo `kind` é um
// marcador fixo, reservado para expansão futura.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub created_at: DateTime<Utc>,
}

pub const CATEGORY_KIND_BURGER_INGREDIENT: &str = "burgerIngredient";
