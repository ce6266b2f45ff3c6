//! # medialib core
//!
//! Keyset (cursor) pagination for the medialib backend.
//!
//! Every listing endpoint of the library (files, tags, API keys, processing
//! presets, lists and storage sources) pages through its collection with the
//! same engine:
//!
//! - [`pagination::value`]: binary codec for sort-column values, with
//!   reserved "no value" sentinels
//! - [`pagination::token`]: the cursor byte layout, sealed into an opaque
//!   string by a [`pagination::TokenCipher`]
//! - [`pagination::keyset`]: boundary/ordering construction and page
//!   assembly over a [`pagination::KeysetExecutor`]
//! - [`adapters`]: one static table per entity binding sort fields to
//!   columns and row extractors
//! - [`pagination::resolver`]: listing parameters to a ready
//!   [`pagination::PaginationState`]
//!
//! ## Feature Flags
//!
//! - `database`: PostgreSQL executor built on SQLx, plus the schema migrator
//! - `cli`: the `medialib-token` operator binary
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use medialib_core::adapters::FILES;
//! use medialib_core::pagination::{
//!     AesGcmTokenCipher, ListingParams, MemoryExecutor, PageLimits, Paginator,
//!     RequestContext,
//! };
//! use medialib_model::FileRow;
//!
//! async fn first_page(
//!     rows: Vec<FileRow>,
//! ) -> Result<(), Box<dyn std::error::Error>> {
//!     let cipher = AesGcmTokenCipher::from_secret(b"an-example-secret-of-32-bytes-or-more")?;
//!     let paginator = Paginator::new(Arc::new(cipher), PageLimits::default());
//!     let executor = MemoryExecutor::new(rows);
//!
//!     let params = ListingParams {
//!         limit: Some(20),
//!         ..ListingParams::default()
//!     };
//!     let page = paginator
//!         .list(&FILES, &executor, &RequestContext::for_account(7), &params)
//!         .await?;
//!     println!("{} files, more: {}", page.items.len(), page.next_token.is_some());
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Entity adapters binding the pagination engine to concrete tables
pub mod adapters;

/// File and environment configuration
pub mod config;

/// Error types for token handling and page fetches
pub mod error;

/// The keyset pagination engine
pub mod pagination;

/// PostgreSQL query executor
#[cfg(feature = "database")]
#[cfg_attr(docsrs, doc(cfg(feature = "database")))]
pub mod database;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{PaginationError, Result, TokenDecodeError, TokenEncodeError};
