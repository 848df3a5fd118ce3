//! Entity module - Contains the SeaORM entity definitions for the cache.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod product;

// Re-export specific types to avoid conflicts with the wire models
pub use product::{Column as ProductColumn, Entity as ProductEntity, Model as ProductModel};
