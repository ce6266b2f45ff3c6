use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A configured storage backend holding media bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SourceRow {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: i32,
    pub public_id: Uuid,
    pub name: String,
    /// Backend discriminator, e.g. `local` or `s3`.
    pub kind: String,
    pub used_bytes: i64,
    pub created_at: DateTime<Utc>,
}

sort_fields! {
    pub enum SourceSort {
        CreatedAt = 0 => "created_at",
        Name = 1 => "name",
        UsedBytes = 2 => "used_bytes",
    }
}
