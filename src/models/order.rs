// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    Drink,
    Burger,
    Dessert,
}

// Ciclo de vida: in-progress -> completed | canceled (ambos terminais).
// A rota administrativa NÃO valida transições de propósito (comportamento
// observado no produto; ver DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    InProgress,
    Completed,
    Canceled,
}

// --- Seleção do pedido ---
// Variante etiquetada por `orderType`: exatamente UMA das formas abaixo,
// montada e validada na fronteira do store. Bebida e sobremesa apontam para
// um único item; o hambúrguer carrega um conjunto de ingredientes (pode ser
// vazio — o "hambúrguer vazio" é permitido).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "orderType", rename_all = "camelCase")]
pub enum OrderSelection {
    #[serde(rename_all = "camelCase")]
    Drink { item_id: Uuid },

    #[serde(rename_all = "camelCase")]
    Burger { ingredient_ids: Vec<Uuid> },

    #[serde(rename_all = "camelCase")]
    Dessert { item_id: Uuid },
}

impl OrderSelection {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderSelection::Drink { .. } => OrderType::Drink,
            OrderSelection::Burger { .. } => OrderType::Burger,
            OrderSelection::Dessert { .. } => OrderType::Dessert,
        }
    }

    /// Item único referenciado (bebida/sobremesa).
    pub fn item_id(&self) -> Option<Uuid> {
        match self {
            OrderSelection::Drink { item_id } | OrderSelection::Dessert { item_id } => {
                Some(*item_id)
            }
            OrderSelection::Burger { .. } => None,
        }
    }

    pub fn ingredient_ids(&self) -> &[Uuid] {
        match self {
            OrderSelection::Burger { ingredient_ids } => ingredient_ids,
            _ => &[],
        }
    }
}

// --- Pedido ---
// Um evento de seleção do cliente. Referências a itens são não-proprietárias:
// apagar um item não toca nos pedidos existentes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: String,
    pub status: OrderStatus,

    #[serde(flatten)]
    pub selection: OrderSelection,

    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn order_type(&self) -> OrderType {
        self.selection.order_type()
    }
}

// Linha crua da tabela `orders`, antes da montagem da variante etiquetada.
#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub item_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// --- Modelos de exibição ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSummary {
    pub name: String,
    pub category: String,
}

/// Pedido com os itens referenciados resolvidos para exibição. Um item
/// apagado vira `itemName: null` ("item desconhecido" fica a cargo da UI).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub id: Uuid,
    pub order_type: OrderType,
    pub status: OrderStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_image: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub burger_ingredients: Vec<IngredientSummary>,

    // Nome de exibição do dono, resolvido "melhor esforço" (só na listagem
    // administrativa; cai para o identificador cru quando não há perfil).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Resposta do "hub" de pedidos: pedidos recentes do usuário mais as flags
/// que a UI usa para bloquear um segundo pedido em andamento do mesmo tipo
/// e para liberar (ou não) a etapa de sobremesa.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentOrders {
    pub data: Vec<OrderDetails>,
    pub has_in_progress_drink: bool,
    pub has_in_progress_burger: bool,
    pub has_in_progress_dessert: bool,
    pub deserts_enabled: bool,
}
