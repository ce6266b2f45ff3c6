use medialib_model::{EntityKind, FileRow, FileSort};

use super::{EntityAdapter, SortColumn};
use crate::pagination::value::{ColumnValue, ValueType};

pub static FILES: EntityAdapter<FileSort, FileRow> = EntityAdapter {
    kind: EntityKind::Files,
    table: "files",
    id_column: "id",
    default_sort: FileSort::CreatedAt,
    row_id,
    columns,
};

fn row_id(row: &FileRow) -> i32 {
    row.id
}

fn columns(sort: FileSort) -> SortColumn<FileRow> {
    match sort {
        FileSort::CreatedAt => SortColumn {
            column: "created_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.created_at),
        },
        FileSort::UpdatedAt => SortColumn {
            column: "updated_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.updated_at),
        },
        FileSort::Name => SortColumn {
            column: "name",
            value_type: ValueType::Text,
            extract: |row| ColumnValue::text(row.name.as_str()),
        },
        FileSort::Size => SortColumn {
            column: "size_bytes",
            value_type: ValueType::Int64,
            extract: |row| ColumnValue::Int64(row.size_bytes),
        },
        FileSort::Duration => SortColumn {
            column: "duration_ms",
            value_type: ValueType::Int32,
            extract: |row| ColumnValue::Int32(row.duration_ms),
        },
    }
}
