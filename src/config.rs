// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::{
    db::{AdminRepository, CatalogRepository, OrderRepository, SettingsRepository},
    services::{CatalogService, OrderService},
};

// O cliente do store é construído UMA vez aqui e injetado via AppState;
// nada de handle global de processo.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt_secret: String,
    pub upload_dir: PathBuf,
    pub admin_repo: AdminRepository,
    pub settings_repo: SettingsRepository,
    pub catalog_service: CatalogService,
    pub order_service: OrderService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        // Segredo compartilhado com o provedor de identidade; só verificamos
        // tokens, nunca emitimos.
        let jwt_secret =
            env::var("IDENTITY_JWT_SECRET").expect("IDENTITY_JWT_SECRET deve ser definido");
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public/uploads"));

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let admin_repo = AdminRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());

        let catalog_service = CatalogService::new(catalog_repo.clone());
        let order_service = OrderService::new(
            order_repo,
            catalog_repo,
            admin_repo.clone(),
            settings_repo.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            upload_dir,
            admin_repo,
            settings_repo,
            catalog_service,
            order_service,
        })
    }
}
