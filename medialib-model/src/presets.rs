use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A transcoding preset consumed by the processing queue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PresetRow {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: i32,
    pub public_id: Uuid,
    pub name: String,
    pub container: String,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

sort_fields! {
    pub enum PresetSort {
        CreatedAt = 0 => "created_at",
        Name = 1 => "name",
        Priority = 2 => "priority",
    }
}
