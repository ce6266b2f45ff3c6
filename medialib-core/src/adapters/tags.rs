use medialib_model::{EntityKind, TagRow, TagSort};

use super::{EntityAdapter, SortColumn};
use crate::pagination::value::{ColumnValue, ValueType};

pub static TAGS: EntityAdapter<TagSort, TagRow> = EntityAdapter {
    kind: EntityKind::Tags,
    table: "tags",
    id_column: "id",
    default_sort: TagSort::Name,
    row_id,
    columns,
};

fn row_id(row: &TagRow) -> i32 {
    row.id
}

fn columns(sort: TagSort) -> SortColumn<TagRow> {
    match sort {
        TagSort::CreatedAt => SortColumn {
            column: "created_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.created_at),
        },
        TagSort::Name => SortColumn {
            column: "name",
            value_type: ValueType::Text,
            extract: |row| ColumnValue::text(row.name.as_str()),
        },
        TagSort::FileCount => SortColumn {
            column: "file_count",
            value_type: ValueType::Int32,
            extract: |row| ColumnValue::Int32(row.file_count),
        },
    }
}
