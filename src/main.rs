// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas do cliente (protegidas pelo auth_guard)
    let customer_routes = Router::new()
        .route("/items", get(handlers::catalog::list_items))
        .route("/categories", get(handlers::catalog::list_categories))
        .route("/orders", post(handlers::orders::start_order))
        .route("/orders/current", get(handlers::orders::current_orders))
        .route("/orders/completed", get(handlers::orders::completed_orders))
        .route("/orders/complete", post(handlers::orders::complete_orders))
        .route("/settings", get(handlers::settings::get_settings))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas administrativas (auth_guard + admin_guard; o guard mais externo
    // roda primeiro)
    let admin_routes = Router::new()
        .route(
            "/items",
            post(handlers::catalog::create_item).get(handlers::catalog::admin_list_items),
        )
        .route(
            "/items/{id}",
            put(handlers::catalog::update_item).delete(handlers::catalog::delete_item),
        )
        .route("/categories", post(handlers::catalog::create_category))
        .route("/categories/{id}", delete(handlers::catalog::delete_category))
        .route("/orders", get(handlers::admin::all_orders))
        .route(
            "/orders/{id}/status",
            put(handlers::admin::update_order_status),
        )
        .route("/orders/{id}", delete(handlers::admin::delete_order))
        .route("/settings", get(handlers::settings::get_settings))
        .route("/settings/deserts", put(handlers::settings::update_deserts))
        .route("/uploads", post(handlers::uploads::upload_image))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", customer_routes)
        .nest("/api/admin", admin_routes)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
