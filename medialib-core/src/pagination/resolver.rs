use medialib_model::SortField;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::PaginationState;
use super::token::TokenCodec;
use crate::adapters::EntityAdapter;
use crate::error::{PaginationError, Result};

/// Listing request parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    /// Sort field ordinal; ignored when `page` is present.
    pub order: Option<i32>,
    pub order_desc: Option<bool>,
    /// Opaque token from a previous page.
    pub page: Option<String>,
    pub limit: Option<u32>,
}

impl ListingParams {
    pub fn with_page(mut self, token: impl Into<String>) -> Self {
        self.page = Some(token.into());
        self
    }
}

/// Turn listing parameters into a cursor position.
///
/// A present `page` token wins over `order`/`orderDesc`, and its decode
/// errors are returned unchanged. A blank token is a decode error, not a
/// request for the first page.
pub fn resolve_state<S: SortField, R>(
    codec: &TokenCodec,
    adapter: &EntityAdapter<S, R>,
    params: &ListingParams,
) -> Result<PaginationState<S>> {
    if let Some(token) = params.page.as_deref() {
        let state = codec.decode(adapter, token)?;
        debug!(
            entity = %adapter.kind,
            sort = state.sort.name(),
            descending = state.descending,
            previous = state.previous,
            "resolved pagination token"
        );
        return Ok(state);
    }

    let sort = match params.order {
        Some(ordinal) => {
            adapter
                .sort_for_ordinal(ordinal)
                .ok_or(PaginationError::InvalidSortField {
                    entity: adapter.kind,
                    ordinal,
                })?
        }
        None => adapter.default_sort,
    };

    Ok(PaginationState::first_page(
        sort,
        params.order_desc.unwrap_or(false),
    ))
}
