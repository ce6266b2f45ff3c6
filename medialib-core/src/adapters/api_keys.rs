use medialib_model::{ApiKeyRow, ApiKeySort, EntityKind};

use super::{EntityAdapter, SortColumn};
use crate::pagination::value::{ColumnValue, ValueType};

pub static API_KEYS: EntityAdapter<ApiKeySort, ApiKeyRow> = EntityAdapter {
    kind: EntityKind::ApiKeys,
    table: "api_keys",
    id_column: "id",
    default_sort: ApiKeySort::CreatedAt,
    row_id,
    columns,
};

fn row_id(row: &ApiKeyRow) -> i32 {
    row.id
}

fn columns(sort: ApiKeySort) -> SortColumn<ApiKeyRow> {
    match sort {
        ApiKeySort::CreatedAt => SortColumn {
            column: "created_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.created_at),
        },
        ApiKeySort::Name => SortColumn {
            column: "name",
            value_type: ValueType::Text,
            extract: |row| ColumnValue::text(row.name.as_str()),
        },
        ApiKeySort::ExpiresAt => SortColumn {
            column: "expires_at",
            value_type: ValueType::Timestamp,
            extract: |row| ColumnValue::timestamp(row.expires_at),
        },
    }
}
