pub mod admin_repo;
pub use admin_repo::AdminRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
