//! Predicate builder.
//!
//! Turns a [`KeyClassification`] plus the raw request values into one
//! sea-query [`Condition`]. The result is a single bracketed group, so
//! callers can `cond_where` it onto a query without clobbering conditions
//! they attached earlier. When no key contributes a condition, `None` is
//! returned — an empty `Cond::all()` renders as `WHERE TRUE` and an empty
//! `Cond::any()` as `WHERE FALSE`, neither of which is a no-op.

use crate::classify::KeyClassification;
use crate::params::{GLOBAL_SEARCH_PARAM, ParamValue, RequestParams};
use sea_query::{Alias, Cond, Condition, Expr, ExprTrait, SimpleExpr};

/// Build the filter condition for one request.
///
/// When the reserved `q` parameter is filled, global-search mode takes
/// over and every other request value is ignored. Otherwise each
/// classified key with a filled value contributes one AND'd condition.
/// Returns `None` when nothing contributes, so callers leave the query
/// untouched.
pub fn build_condition(
    params: &RequestParams,
    classification: &KeyClassification,
) -> Option<Condition> {
    if let Some(q) = params.filled(GLOBAL_SEARCH_PARAM) {
        return global_search_condition(q, classification);
    }

    let mut cond = Cond::all();
    let mut filled = false;

    for key in &classification.like_keys {
        if let Some(value) = params.filled(key) {
            cond = cond.add(like_condition(key, value));
            filled = true;
        }
    }

    for key in &classification.equality_keys {
        if let Some(value) = params.filled(key) {
            cond = cond.add(equality_expr(key, value));
            filled = true;
        }
    }

    filled.then_some(cond)
}

/// Broad OR across all non-excluded columns: substring matches on the
/// like-diff and like-designated columns, plus equality/set-membership
/// on the like-diff columns. `None` when exclusions left no column to
/// search.
fn global_search_condition(
    q: &ParamValue,
    classification: &KeyClassification,
) -> Option<Condition> {
    if classification.like_diff_columns.is_empty() && classification.like_columns.is_empty() {
        return None;
    }

    let mut cond = Cond::any();

    for column in &classification.like_diff_columns {
        cond = cond.add(like_condition(column, q));
    }
    for column in &classification.like_columns {
        cond = cond.add(like_condition(column, q));
    }
    for column in &classification.like_diff_columns {
        cond = cond.add(equality_expr(column, q));
    }

    Some(cond)
}

/// Substring condition for one column: a list value ORs one LIKE per
/// element, a scalar yields a single LIKE.
fn like_condition(column: &str, value: &ParamValue) -> Condition {
    let mut cond = Cond::any();
    for item in value.as_slice() {
        cond = cond.add(like_expr(column, item));
    }
    cond
}

fn like_expr(column: &str, value: &str) -> SimpleExpr {
    Expr::col(Alias::new(column)).like(format!("%{}%", escape_like_wildcards(value)))
}

/// Equality condition for one column: set membership for lists, exact
/// equality for scalars.
fn equality_expr(column: &str, value: &ParamValue) -> SimpleExpr {
    match value {
        ParamValue::Scalar(s) => Expr::col(Alias::new(column)).eq(s.as_str()),
        ParamValue::List(items) => Expr::col(Alias::new(column)).is_in(items.clone()),
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
