//! Keyset page fetching: turns a cursor into an executor query and the
//! fetched rows back into a page with next/previous tokens.

use std::cmp::Ordering;
use std::fmt;

use async_trait::async_trait;
use medialib_model::{EntityKind, SortField};
use tracing::{debug, warn};

use super::context::RequestContext;
use super::page::Page;
use super::state::{Boundary, PaginationState};
use super::token::TokenCodec;
use super::value::{ColumnValue, ValueType};
use crate::adapters::EntityAdapter;
use crate::error::{PaginationError, Result};

/// Executor-facing description of one keyset fetch.
///
/// Rows must be returned ordered by `(sort_column, id_column)` in the
/// direction given by `descending`, restricted to rows strictly past
/// `boundary` in that direction, and at most `limit` of them.
pub struct KeysetQuery<'a, R> {
    pub entity: EntityKind,
    pub table: &'static str,
    pub sort_column: &'static str,
    pub value_type: ValueType,
    pub id_column: &'static str,
    /// Physical scan direction, already flipped for previous-page cursors.
    pub descending: bool,
    pub boundary: Option<&'a Boundary>,
    pub limit: u32,
    pub context: &'a RequestContext,
    pub extract: fn(&R) -> ColumnValue,
    pub row_id: fn(&R) -> i32,
}

impl<R> fmt::Debug for KeysetQuery<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeysetQuery")
            .field("entity", &self.entity)
            .field("table", &self.table)
            .field("sort_column", &self.sort_column)
            .field("descending", &self.descending)
            .field("boundary", &self.boundary)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<'a, R> KeysetQuery<'a, R> {
    pub fn new<S: SortField>(
        adapter: &EntityAdapter<S, R>,
        state: &'a PaginationState<S>,
        limit: u32,
        context: &'a RequestContext,
    ) -> Self {
        let column = adapter.column(state.sort);
        Self {
            entity: adapter.kind,
            table: adapter.table,
            sort_column: column.column,
            value_type: column.value_type,
            id_column: adapter.id_column,
            descending: state.scan_descending(),
            boundary: state.boundary.as_ref(),
            limit,
            context,
            extract: column.extract,
            row_id: adapter.row_id,
        }
    }

    /// Row-value comparison operator for the boundary predicate.
    pub fn comparison(&self) -> &'static str {
        if self.descending { "<" } else { ">" }
    }

    pub fn direction(&self) -> &'static str {
        if self.descending { "DESC" } else { "ASC" }
    }

    /// Compare two rows in scan order.
    pub fn cmp_rows(&self, a: &R, b: &R) -> Ordering {
        let ordering = (self.extract)(a)
            .cmp(&(self.extract)(b))
            .then_with(|| (self.row_id)(a).cmp(&(self.row_id)(b)));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Whether `row` lies strictly past the boundary in scan order.
    pub fn is_past_boundary(&self, row: &R) -> bool {
        let Some(boundary) = self.boundary else {
            return true;
        };
        let ordering = (self.extract)(row)
            .cmp(&boundary.value)
            .then_with(|| (self.row_id)(row).cmp(&boundary.id));
        if self.descending {
            ordering == Ordering::Less
        } else {
            ordering == Ordering::Greater
        }
    }
}

/// Runs keyset queries against a concrete store.
#[async_trait]
pub trait KeysetExecutor<R>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch(&self, query: &KeysetQuery<'_, R>) -> std::result::Result<Vec<R>, Self::Error>;
}

/// Fetch the page `state` points at.
///
/// `limit` must already be validated. An empty result carries no tokens.
pub async fn fetch_page<S, R, E>(
    codec: &TokenCodec,
    adapter: &EntityAdapter<S, R>,
    executor: &E,
    context: &RequestContext,
    state: &PaginationState<S>,
    limit: u32,
) -> Result<Page<R>>
where
    S: SortField,
    R: Send + Sync,
    E: KeysetExecutor<R> + ?Sized,
{
    let query = KeysetQuery::new(adapter, state, limit, context);
    let mut rows = executor
        .fetch(&query)
        .await
        .map_err(PaginationError::query)?;

    let limit = limit as usize;
    if rows.len() > limit {
        warn!(
            entity = %adapter.kind,
            returned = rows.len(),
            limit,
            "keyset executor returned more rows than requested, truncating"
        );
        rows.truncate(limit);
    }

    if state.previous {
        rows.reverse();
    }

    let (prev_token, next_token) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => {
            let prev = codec.encode(adapter, &state.before(adapter.boundary_of(state.sort, first)))?;
            let next = if rows.len() == limit {
                Some(codec.encode(adapter, &state.after(adapter.boundary_of(state.sort, last)))?)
            } else {
                None
            };
            (Some(prev), next)
        }
        _ => (None, None),
    };

    debug!(
        entity = %adapter.kind,
        sort = state.sort.name(),
        descending = state.descending,
        previous = state.previous,
        limit,
        rows = rows.len(),
        has_next = next_token.is_some(),
        "fetched keyset page"
    );

    Ok(Page {
        items: rows,
        next_token,
        prev_token,
    })
}
