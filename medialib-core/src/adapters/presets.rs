use medialib_model::{EntityKind, PresetRow, PresetSort};

use super::{EntityAdapter, SortColumn};
use crate::pagination::value::{ColumnValue, ValueType};

pub static PRESETS: EntityAdapter<PresetSort, PresetRow> = EntityAdapter {
    kind: EntityKind::Presets,
    table: "processing_presets",
    id_column: "id",
    default_sort: PresetSort::Priority,
    row_id,
    columns,
};

fn row_id(row: &PresetRow) -> i32 {
    row.id
}

fn columns(sort: PresetSort) -> SortColumn<PresetRow> {
    match sort {
        PresetSort::CreatedAt => SortColumn {
            column: "created_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.created_at),
        },
        PresetSort::Name => SortColumn {
            column: "name",
            value_type: ValueType::Text,
            extract: |row| ColumnValue::text(row.name.as_str()),
        },
        PresetSort::Priority => SortColumn {
            column: "priority",
            value_type: ValueType::Int32,
            extract: |row| ColumnValue::Int32(row.priority),
        },
    }
}
