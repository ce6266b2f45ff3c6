use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TagRow {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: i32,
    pub public_id: Uuid,
    pub name: String,
    pub color: Option<String>,
    /// Denormalized count of files carrying this tag.
    pub file_count: i32,
    pub created_at: DateTime<Utc>,
}

sort_fields! {
    pub enum TagSort {
        CreatedAt = 0 => "created_at",
        Name = 1 => "name",
        FileCount = 2 => "file_count",
    }
}
