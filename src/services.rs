pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod order_service;
pub use order_service::OrderService;
