use medialib_model::{EntityKind, SourceRow, SourceSort};

use super::{EntityAdapter, SortColumn};
use crate::pagination::value::{ColumnValue, ValueType};

pub static SOURCES: EntityAdapter<SourceSort, SourceRow> = EntityAdapter {
    kind: EntityKind::Sources,
    table: "storage_sources",
    id_column: "id",
    default_sort: SourceSort::Name,
    row_id,
    columns,
};

fn row_id(row: &SourceRow) -> i32 {
    row.id
}

fn columns(sort: SourceSort) -> SortColumn<SourceRow> {
    match sort {
        SourceSort::CreatedAt => SortColumn {
            column: "created_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.created_at),
        },
        SourceSort::Name => SortColumn {
            column: "name",
            value_type: ValueType::Text,
            extract: |row| ColumnValue::text(row.name.as_str()),
        },
        SourceSort::UsedBytes => SortColumn {
            column: "used_bytes",
            value_type: ValueType::Int64,
            extract: |row| ColumnValue::Int64(row.used_bytes),
        },
    }
}
