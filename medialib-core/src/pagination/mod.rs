//! Keyset pagination over the entity adapters.
//!
//! A listing request resolves to a [`PaginationState`] (from an opaque token
//! or from explicit sort parameters), the state drives a [`KeysetQuery`]
//! against some [`KeysetExecutor`], and the fetched rows come back as a
//! [`Page`] carrying tokens for the neighbouring pages.

pub mod cipher;
pub mod context;
pub mod keyset;
pub mod limits;
pub mod memory;
pub mod page;
pub mod resolver;
pub mod state;
pub mod token;
pub mod value;

use std::sync::Arc;

use medialib_model::SortField;

pub use cipher::{AesGcmTokenCipher, CipherError, TokenCipher};
pub use context::RequestContext;
pub use keyset::{KeysetExecutor, KeysetQuery, fetch_page};
pub use limits::PageLimits;
pub use memory::MemoryExecutor;
pub use page::Page;
pub use resolver::{ListingParams, resolve_state};
pub use state::{Boundary, PaginationState};
pub use token::TokenCodec;
pub use value::{ColumnValue, ValueType};

use crate::adapters::EntityAdapter;
use crate::config::PaginationConfig;
use crate::error::Result;

/// Entry point tying token handling, limit policy and page fetching
/// together. Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Paginator {
    codec: TokenCodec,
    limits: PageLimits,
}

impl Paginator {
    pub fn new(cipher: Arc<dyn TokenCipher>, limits: PageLimits) -> Self {
        Self {
            codec: TokenCodec::new(cipher),
            limits,
        }
    }

    /// Build from loaded configuration, deriving the AES-GCM token key.
    pub fn from_config(config: &PaginationConfig) -> std::result::Result<Self, CipherError> {
        let cipher = AesGcmTokenCipher::from_secret(config.token_key.as_bytes())?;
        Ok(Self::new(Arc::new(cipher), config.limits))
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Validate `params` into a cursor position and a page size.
    ///
    /// The limit is checked first so an invalid size never reaches token
    /// decoding or query construction.
    pub fn resolve<S: SortField, R>(
        &self,
        adapter: &EntityAdapter<S, R>,
        params: &ListingParams,
    ) -> Result<(PaginationState<S>, u32)> {
        let limit = self.limits.resolve(params.limit)?;
        let state = resolve_state(&self.codec, adapter, params)?;
        Ok((state, limit))
    }

    /// Fetch the page at `state`, validating `limit` against the configured
    /// bounds.
    pub async fn fetch<S, R, E>(
        &self,
        adapter: &EntityAdapter<S, R>,
        executor: &E,
        context: &RequestContext,
        state: &PaginationState<S>,
        limit: u32,
    ) -> Result<Page<R>>
    where
        S: SortField,
        R: Send + Sync,
        E: KeysetExecutor<R> + ?Sized,
    {
        let limit = self.limits.resolve(Some(limit))?;
        fetch_page(&self.codec, adapter, executor, context, state, limit).await
    }

    /// Resolve `params` and fetch the resulting page.
    pub async fn list<S, R, E>(
        &self,
        adapter: &EntityAdapter<S, R>,
        executor: &E,
        context: &RequestContext,
        params: &ListingParams,
    ) -> Result<Page<R>>
    where
        S: SortField,
        R: Send + Sync,
        E: KeysetExecutor<R> + ?Sized,
    {
        let (state, limit) = self.resolve(adapter, params)?;
        fetch_page(&self.codec, adapter, executor, context, &state, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FILES, SOURCES};
    use crate::error::PaginationError;
    use chrono::DateTime;
    use medialib_model::{FileRow, FileSort, SourceRow, SourceSort};
    use uuid::Uuid;

    fn paginator() -> Paginator {
        let config = PaginationConfig {
            token_key: "paginator-unit-tests-secret-0123456789".into(),
            limits: PageLimits {
                default_limit: 2,
                max_limit: 10,
            },
        };
        Paginator::from_config(&config).unwrap()
    }

    fn source(id: i32, name: &str) -> SourceRow {
        SourceRow {
            id,
            public_id: Uuid::nil(),
            name: name.to_string(),
            kind: "local".into(),
            used_bytes: i64::from(id) * 1_000,
            created_at: DateTime::from_timestamp(1_650_000_000, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn invalid_limit_fails_before_token_decoding() {
        let executor = MemoryExecutor::new(vec![source(1, "a")]);
        let params = ListingParams {
            limit: Some(0),
            page: Some("garbage".into()),
            ..Default::default()
        };
        let err = paginator()
            .list(&SOURCES, &executor, &RequestContext::anonymous(), &params)
            .await
            .unwrap_err();
        assert!(matches!(err, PaginationError::InvalidLimit { requested: 0, max: 10 }));
    }

    #[tokio::test]
    async fn empty_collection_yields_no_tokens() {
        let executor: MemoryExecutor<SourceRow> = MemoryExecutor::new(Vec::new());
        let page = paginator()
            .list(&SOURCES, &executor, &RequestContext::anonymous(), &ListingParams::default())
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.next_token, None);
        assert_eq!(page.prev_token, None);
    }

    #[tokio::test]
    async fn default_limit_and_sort_apply() {
        let executor = MemoryExecutor::new(vec![source(1, "c"), source(2, "a"), source(3, "b")]);
        let page = paginator()
            .list(&SOURCES, &executor, &RequestContext::anonymous(), &ListingParams::default())
            .await
            .unwrap();
        let names: Vec<&str> = page.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(page.next_token.is_some());
        assert!(page.prev_token.is_some());
    }

    #[tokio::test]
    async fn fetch_rechecks_limits() {
        let executor = MemoryExecutor::new(vec![source(1, "a")]);
        let state = PaginationState::first_page(SourceSort::Name, false);
        let err = paginator()
            .fetch(&SOURCES, &executor, &RequestContext::anonymous(), &state, 11)
            .await
            .unwrap_err();
        assert!(matches!(err, PaginationError::InvalidLimit { requested: 11, .. }));
    }

    #[tokio::test]
    async fn sentinel_values_surface_as_encode_errors() {
        let row = FileRow {
            id: 1,
            public_id: Uuid::nil(),
            source_id: 1,
            name: "clip.mp4".into(),
            mime_type: "video/mp4".into(),
            size_bytes: i64::MIN,
            duration_ms: 0,
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let executor = MemoryExecutor::new(vec![row]);
        let params = ListingParams {
            order: Some(FileSort::Size.ordinal()),
            ..Default::default()
        };
        let err = paginator()
            .list(&FILES, &executor, &RequestContext::anonymous(), &params)
            .await
            .unwrap_err();
        assert!(matches!(err, PaginationError::TokenEncode(_)));
        assert!(!err.is_client_error());
    }
}
