// core/src/services/mod.rs

//! Business operations over the stores. Every call takes the acting user explicitly.

pub mod cart_service;
pub mod catalog_service;
pub mod interaction_service;

pub use cart_service::CartService;
pub use catalog_service::CatalogService;
pub use interaction_service::InteractionService;
