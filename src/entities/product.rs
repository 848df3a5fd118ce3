//! Product cache entity - the flattened storage form of a catalog product.
//!
//! The upstream API serves products with a nested rating object; the cache
//! stores the two rating scalars as plain columns (`rating_rate`,
//! `rating_count`). Rows are written once per id and never updated in
//! place, so a cached product always reflects the first successful fetch.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cached product row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Upstream product id; assigned by the API, never generated locally
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Display title
    pub title: String,
    /// Unit price in dollars
    pub price: f64,
    /// Category label (e.g., "electronics", "jewelery")
    pub category: String,
    /// Long-form description text
    pub description: String,
    /// URI of the product image
    pub image: String,
    /// Flattened rating average
    pub rating_rate: f64,
    /// Flattened rating count
    pub rating_count: i64,
}

/// Cached products have no relationships to other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
