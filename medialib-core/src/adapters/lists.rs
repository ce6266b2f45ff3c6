use medialib_model::{EntityKind, ListRow, ListSort};

use super::{EntityAdapter, SortColumn};
use crate::pagination::value::{ColumnValue, ValueType};

pub static LISTS: EntityAdapter<ListSort, ListRow> = EntityAdapter {
    kind: EntityKind::Lists,
    table: "lists",
    id_column: "id",
    default_sort: ListSort::UpdatedAt,
    row_id,
    columns,
};

fn row_id(row: &ListRow) -> i32 {
    row.id
}

fn columns(sort: ListSort) -> SortColumn<ListRow> {
    match sort {
        ListSort::CreatedAt => SortColumn {
            column: "created_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.created_at),
        },
        ListSort::UpdatedAt => SortColumn {
            column: "updated_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.updated_at),
        },
        ListSort::Name => SortColumn {
            column: "name",
            value_type: ValueType::Text,
            extract: |row| ColumnValue::text(row.name.as_str()),
        },
        ListSort::ItemCount => SortColumn {
            column: "item_count",
            value_type: ValueType::Int32,
            extract: |row| ColumnValue::Int32(row.item_count),
        },
    }
}
