#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use medialib_core::pagination::{AesGcmTokenCipher, PageLimits, Paginator};
use medialib_model::{FileRow, TagRow};
use uuid::Uuid;

pub const SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

pub fn paginator() -> Paginator {
    paginator_with(PageLimits::default())
}

pub fn paginator_with(limits: PageLimits) -> Paginator {
    let cipher = AesGcmTokenCipher::from_secret(SECRET).expect("valid secret");
    Paginator::new(Arc::new(cipher), limits)
}

/// Whole-second timestamp `seconds` after 2024-01-01T00:00:00Z.
pub fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_067_200 + seconds, 0).expect("in range")
}

pub fn file(id: i32, created_at: DateTime<Utc>) -> FileRow {
    FileRow {
        id,
        public_id: Uuid::new_v4(),
        source_id: 1,
        name: format!("file-{id:03}.mkv"),
        mime_type: "video/x-matroska".into(),
        size_bytes: i64::from(id) * 1_024,
        duration_ms: 60_000,
        created_at,
        updated_at: created_at,
    }
}

pub fn tag(id: i32, file_count: i32) -> TagRow {
    TagRow {
        id,
        public_id: Uuid::new_v4(),
        name: format!("tag-{id:03}"),
        color: None,
        file_count,
        created_at: at(i64::from(id)),
    }
}

pub fn ids<R>(rows: &[R], id: impl Fn(&R) -> i32) -> Vec<i32> {
    rows.iter().map(id).collect()
}
