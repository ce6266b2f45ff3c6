//! Static tables binding the pagination engine to concrete entities.
//!
//! An adapter names the table, the internal id column used as the keyset
//! tie-breaker, and for every sort field the physical column, its value type,
//! and how to read that value back out of a fetched row. Adapters are plain
//! data: no state, no I/O.

use std::fmt;

use medialib_model::{EntityKind, SortField};

use crate::pagination::state::Boundary;
use crate::pagination::value::{ColumnValue, ValueType};

mod api_keys;
mod files;
mod lists;
mod presets;
mod sources;
mod tags;

pub use api_keys::API_KEYS;
pub use files::FILES;
pub use lists::LISTS;
pub use presets::PRESETS;
pub use sources::SOURCES;
pub use tags::TAGS;

/// Physical binding of one sort field.
pub struct SortColumn<R> {
    pub column: &'static str,
    pub value_type: ValueType,
    pub extract: fn(&R) -> ColumnValue,
}

impl<R> fmt::Debug for SortColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortColumn")
            .field("column", &self.column)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

pub struct EntityAdapter<S, R> {
    pub kind: EntityKind,
    pub table: &'static str,
    /// Internal sequential id column; never the public identifier.
    pub id_column: &'static str,
    /// Sort used by fresh listings that do not name one.
    pub default_sort: S,
    pub row_id: fn(&R) -> i32,
    pub columns: fn(S) -> SortColumn<R>,
}

impl<S: SortField, R> EntityAdapter<S, R> {
    pub fn column(&self, sort: S) -> SortColumn<R> {
        (self.columns)(sort)
    }

    pub fn sort_for_ordinal(&self, ordinal: i32) -> Option<S> {
        S::from_ordinal(ordinal)
    }

    /// Keyset boundary positioned on `row` under `sort`.
    pub fn boundary_of(&self, sort: S, row: &R) -> Boundary {
        Boundary::new((self.row_id)(row), (self.column(sort).extract)(row))
    }
}

impl<S: fmt::Debug, R> fmt::Debug for EntityAdapter<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityAdapter")
            .field("kind", &self.kind)
            .field("table", &self.table)
            .field("id_column", &self.id_column)
            .field("default_sort", &self.default_sort)
            .finish_non_exhaustive()
    }
}
