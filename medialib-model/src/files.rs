use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A media file registered in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FileRow {
    /// Internal sequential id; never exposed to clients.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: i32,
    pub public_id: Uuid,
    pub source_id: i32,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    /// Zero for media without a playback duration (images, documents).
    pub duration_ms: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

sort_fields! {
    /// Sortable file columns.
    pub enum FileSort {
        CreatedAt = 0 => "created_at",
        UpdatedAt = 1 => "updated_at",
        Name = 2 => "name",
        Size = 3 => "size",
        Duration = 4 => "duration",
    }
}
