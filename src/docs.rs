// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo (cliente) ---
        handlers::catalog::list_items,
        handlers::catalog::list_categories,

        // --- Pedidos ---
        handlers::orders::start_order,
        handlers::orders::current_orders,
        handlers::orders::completed_orders,
        handlers::orders::complete_orders,

        // --- Configurações ---
        handlers::settings::get_settings,

        // --- Admin: catálogo ---
        handlers::catalog::admin_list_items,
        handlers::catalog::create_item,
        handlers::catalog::update_item,
        handlers::catalog::delete_item,
        handlers::catalog::create_category,
        handlers::catalog::delete_category,
        handlers::uploads::upload_image,

        // --- Admin: acompanhamento ---
        handlers::admin::all_orders,
        handlers::admin::update_order_status,
        handlers::admin::delete_order,
        handlers::settings::update_deserts,
    ),
    components(
        schemas(
            models::catalog::Item,
            models::catalog::ItemType,
            models::catalog::Category,
            models::order::Order,
            models::order::OrderSelection,
            models::order::OrderType,
            models::order::OrderStatus,
            models::order::OrderDetails,
            models::order::IngredientSummary,
            models::order::CurrentOrders,
            models::settings::StoreSettings,
            models::auth::CurrentUser,
            models::auth::Admin,
            handlers::catalog::CreateItemPayload,
            handlers::catalog::UpdateItemPayload,
            handlers::catalog::CreateCategoryPayload,
            handlers::admin::UpdateOrderStatusPayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "catalog", description = "Catálogo lido pelas telas de seleção"),
        (name = "orders", description = "Fluxo de pedido do cliente"),
        (name = "settings", description = "Flags da loja"),
        (name = "admin", description = "Gestão e acompanhamento (allow-list)"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
