//! Wire-format catalog models - the product shape served by the upstream
//! API and returned by every load operation.
//!
//! The cache stores a flattened form of the same data (see `entities`); the
//! mapping between the two lives in the store and never leaks out of it.

use serde::{Deserialize, Serialize};

/// A product as served by the upstream catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Upstream-assigned unique identifier
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
    /// Aggregate customer rating; defaults to zeros when the API omits it
    #[serde(default)]
    pub rating: Rating,
}

/// Aggregate rating nested inside a product on the wire
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average score
    #[serde(default)]
    pub rate: f64,
    /// Number of ratings behind the average
    #[serde(default)]
    pub count: i64,
}
