//! Setaccio — sift untyped request parameters into safe query predicates.
//!
//! Given a map of request parameters and a table's column set, this crate
//! builds a sea-query WHERE group and ORDER BY clauses without the caller
//! writing any per-column mapping code:
//!
//! - request keys matching table columns become equality or set-membership
//!   filters; keys designated "like" become substring filters;
//! - the reserved `q` parameter switches to global-search mode, a broad OR
//!   across all non-excluded columns;
//! - the reserved `sortBy` / `sortByDesc` parameters append
//!   schema-validated sort clauses.
//!
//! Unknown keys, empty values, and unknown sort columns are silently
//! skipped. Value binding is sea-query's; substring values additionally
//! get LIKE-wildcard escaping.
//!
//! ```no_run
//! # async fn demo(pool: sqlx::PgPool) -> setaccio::Result<()> {
//! use setaccio::{FilterOptions, PgCatalog, RequestParams, filtered_select};
//! use sea_query::PostgresQueryBuilder;
//!
//! let catalog = PgCatalog::new(pool);
//! let params = RequestParams::from_pairs([("name", "Jo"), ("sortBy", "email")]);
//! let options = FilterOptions::new().with_like(["name"]);
//!
//! let query = filtered_select(&params, &catalog, "users", &options).await?;
//! let sql = query.to_string(PostgresQueryBuilder);
//! # Ok(())
//! # }
//! ```

mod classify;
mod error;
mod params;
mod predicate;
mod schema;
mod sort;

pub use classify::{FilterOptions, KeyClassification, classify};
pub use error::{Error, Result};
pub use params::{
    GLOBAL_SEARCH_PARAM, ParamValue, RequestParams, SORT_BY_DESC_PARAM, SORT_BY_PARAM,
};
pub use predicate::build_condition;
pub use schema::{PgCatalog, SchemaCatalog, StaticCatalog};
pub use sort::apply_sort;

use sea_query::{Alias, Asterisk, Query, SelectStatement};

/// Filter and sort an existing query from request parameters.
///
/// The filter condition is added as one bracketed group via `cond_where`,
/// so conditions the caller already attached stay intact; when no
/// parameter contributes a condition the query is left untouched. Fails
/// only when the table is unknown to the catalog or the catalog itself
/// errors.
pub async fn filter_and_sort(
    params: &RequestParams,
    query: &mut SelectStatement,
    catalog: &dyn SchemaCatalog,
    table: &str,
    options: &FilterOptions,
) -> Result<()> {
    let columns = catalog.list_columns(table).await?;
    let classification = classify(params, &columns, options);
    if let Some(cond) = build_condition(params, &classification) {
        query.cond_where(cond);
    }
    sort::apply_sort(query, catalog, table, params).await
}

/// Build a `SELECT * FROM table` query filtered and sorted from request
/// parameters.
pub async fn filtered_select(
    params: &RequestParams,
    catalog: &dyn SchemaCatalog,
    table: &str,
    options: &FilterOptions,
) -> Result<SelectStatement> {
    let mut query = Query::select();
    query.column(Asterisk).from(Alias::new(table));
    filter_and_sort(params, &mut query, catalog, table, options).await?;
    Ok(query)
}
