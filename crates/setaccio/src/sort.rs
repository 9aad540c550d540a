//! Sort applier.
//!
//! Reads the reserved `sortBy` / `sortByDesc` parameters and appends
//! ORDER BY clauses for columns the schema confirms. `sortBy` wins when
//! both are filled; unknown columns are skipped, never an error.

use crate::error::Result;
use crate::params::{RequestParams, SORT_BY_DESC_PARAM, SORT_BY_PARAM};
use crate::schema::SchemaCatalog;
use sea_query::{Alias, Order, SelectStatement};

/// Append schema-validated sort clauses to `query`.
pub async fn apply_sort(
    query: &mut SelectStatement,
    catalog: &dyn SchemaCatalog,
    table: &str,
    params: &RequestParams,
) -> Result<()> {
    let (value, order) = if let Some(value) = params.filled(SORT_BY_PARAM) {
        (value, Order::Asc)
    } else if let Some(value) = params.filled(SORT_BY_DESC_PARAM) {
        (value, Order::Desc)
    } else {
        return Ok(());
    };

    for column in value.as_slice() {
        if catalog.has_column(table, column).await? {
            query.order_by(Alias::new(column), order.clone());
        } else {
            tracing::debug!(table = %table, column = %column, "skipping unknown sort column");
        }
    }

    Ok(())
}
