use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An API key issued to an account. Only the key prefix is stored in clear.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ApiKeyRow {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: i32,
    pub public_id: Uuid,
    pub account_id: i32,
    pub name: String,
    pub prefix: String,
    pub expires_at: DateTime<Utc>,
    /// Nullable, so deliberately not sortable.
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

sort_fields! {
    pub enum ApiKeySort {
        CreatedAt = 0 => "created_at",
        Name = 1 => "name",
        ExpiresAt = 2 => "expires_at",
    }
}
