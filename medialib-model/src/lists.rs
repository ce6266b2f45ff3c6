use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user-curated list of files.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ListRow {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: i32,
    pub public_id: Uuid,
    pub account_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub item_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

sort_fields! {
    pub enum ListSort {
        CreatedAt = 0 => "created_at",
        UpdatedAt = 1 => "updated_at",
        Name = 2 => "name",
        ItemCount = 3 => "item_count",
    }
}
