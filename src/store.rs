//! Local cache store - a write-once-per-id mirror of the upstream catalog.
//!
//! Products fetched from the remote API are flattened into the `products`
//! table (the nested rating splits into `rating_rate` and `rating_count`)
//! and reassembled into the wire shape on read, so no other module ever
//! sees the storage representation. Inserts are conditional on absence:
//! an id that is already cached is left untouched and the first
//! successfully fetched version of a product is the one that sticks.
//! Read failures are reported honestly; folding an unreadable table into
//! "empty" is the reconciliation layer's call, not ours.

use crate::{
    entities::{ProductColumn, ProductEntity, product},
    errors::{Error, Result},
    models::{Product, Rating},
};
use sea_orm::{ConnectionTrait, QueryOrder, Schema, Set, prelude::*, sea_query::OnConflict};
use tracing::{debug, instrument, trace};

/// Creates the `products` table if it does not exist yet.
///
/// Safe to call on every startup: the statement carries `IF NOT EXISTS`
/// and existing rows are never touched. The DDL is generated from the
/// entity definition so the table always matches the Rust struct.
///
/// # Errors
/// Returns an error if executing the DDL statement fails.
#[instrument(skip(db))]
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(ProductEntity);
    product_table.if_not_exists();

    db.execute(builder.build(&product_table)).await?;
    trace!("Product cache schema ensured.");
    Ok(())
}

/// Inserts a product into the cache unless a row with its id already exists.
///
/// The write is a single `INSERT ... ON CONFLICT DO NOTHING`, so it stays
/// atomic per id even with concurrent writers: two racing inserts for the
/// same product can never produce duplicate rows, and the loser of the race
/// becomes a no-op. Existing rows are never refreshed.
///
/// # Returns
/// `Ok(true)` when a new row was written, `Ok(false)` when the id was
/// already cached and the existing row was kept as-is.
///
/// # Errors
/// Returns [`Error::Store`] when the insert fails, so callers can log the
/// lost write even if they choose to carry on.
#[instrument(skip(db, record))]
pub async fn upsert_if_absent(db: &DatabaseConnection, record: &Product) -> Result<bool> {
    let inserted = ProductEntity::insert(flatten(record))
        .on_conflict(OnConflict::column(ProductColumn::Id).do_nothing().to_owned())
        .exec_without_returning(db)
        .await
        .map_err(Error::Store)?;

    if inserted == 0 {
        trace!("Product {} already cached; keeping the first write.", record.id);
    } else {
        debug!("Cached product {}.", record.id);
    }
    Ok(inserted > 0)
}

/// Returns every cached product ordered by id, ratings reassembled.
///
/// An empty table yields an empty list. An unreadable table yields an
/// error; the caller decides whether that downgrades to "no cached data."
///
/// # Errors
/// Returns an error if the query fails.
#[instrument(skip(db))]
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Product>> {
    let rows = ProductEntity::find()
        .order_by_asc(ProductColumn::Id)
        .all(db)
        .await?;
    debug!("Read {} cached products.", rows.len());
    Ok(rows.into_iter().map(reassemble).collect())
}

/// Looks up one cached product by id, `None` when no row matches.
///
/// # Errors
/// Returns an error if the query fails.
#[instrument(skip(db))]
pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Product>> {
    let row = ProductEntity::find_by_id(id).one(db).await?;
    debug!("Cache lookup for product {}: hit = {}.", id, row.is_some());
    Ok(row.map(reassemble))
}

/// Splits the nested rating into the two flat storage columns.
fn flatten(record: &Product) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(record.id),
        title: Set(record.title.clone()),
        price: Set(record.price),
        category: Set(record.category.clone()),
        description: Set(record.description.clone()),
        image: Set(record.image.clone()),
        rating_rate: Set(record.rating.rate),
        rating_count: Set(record.rating.count),
    }
}

/// Rebuilds the wire shape from a stored row, nesting the rating again.
fn reassemble(row: product::Model) -> Product {
    Product {
        id: row.id,
        title: row.title,
        price: row.price,
        category: row.category,
        description: row.description,
        image: row.image,
        rating: Rating {
            rate: row.rating_rate,
            count: row.rating_count,
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_upsert_then_get_round_trips_rating() -> Result<()> {
        let db = setup_test_db().await?;
        let record = rated_product(1, 4.5, 10);

        assert!(upsert_if_absent(&db, &record).await?);

        let cached = get_by_id(&db, 1).await?;
        assert_eq!(cached, Some(record));
        Ok(())
    }

    #[tokio::test]
    async fn test_second_insert_same_id_keeps_first_payload() -> Result<()> {
        let db = setup_test_db().await?;
        let first = rated_product(1, 4.5, 10);
        let mut second = rated_product(1, 1.0, 99);
        second.title = "Renamed later".to_string();

        assert!(upsert_if_absent(&db, &first).await?);
        assert!(!upsert_if_absent(&db, &second).await?);

        // The original row must survive the second write untouched
        let cached = get_by_id(&db, 1).await?.unwrap();
        assert_eq!(cached, first);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_all_on_empty_store_returns_empty() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(list_all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_all_orders_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        for id in [3, 1, 2] {
            upsert_if_absent(&db, &sample_product(id)).await?;
        }

        let ids: Vec<i64> = list_all(&db).await?.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn test_default_rating_round_trips_as_zeros() -> Result<()> {
        let db = setup_test_db().await?;
        let mut record = sample_product(5);
        record.rating = Rating::default();

        upsert_if_absent(&db, &record).await?;

        let cached = get_by_id(&db, 5).await?.unwrap();
        assert_eq!(cached.rating.rate, 0.0);
        assert_eq!(cached.rating.count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_schema_twice_preserves_rows() -> Result<()> {
        let db = setup_test_db().await?;
        upsert_if_absent(&db, &sample_product(1)).await?;

        // Second run must be a no-op, not a rebuild
        ensure_schema(&db).await?;

        assert_eq!(list_all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(get_by_id(&db, 42).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_from_unmigrated_store_are_errors() -> Result<()> {
        let db = setup_unmigrated_db().await?;
        assert!(list_all(&db).await.is_err());
        assert!(get_by_id(&db, 1).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_write_to_unmigrated_store_is_store_error() -> Result<()> {
        let db = setup_unmigrated_db().await?;

        let result = upsert_if_absent(&db, &sample_product(1)).await;
        assert!(matches!(result.unwrap_err(), Error::Store(_)));
        Ok(())
    }
}
