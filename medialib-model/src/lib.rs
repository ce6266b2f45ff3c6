//! Entity rows and sort-field definitions shared across medialib crates.
//!
//! Every listable collection exposes a row type (what the relational store
//! hands back) and a sort enum naming the columns a client may order by. The
//! sort enums carry stable ordinals: those numbers travel inside pagination
//! tokens and the `order` listing parameter, so a variant's ordinal is never
//! reused or renumbered.
#![allow(missing_docs)]

#[macro_use]
mod sort;

pub mod api_keys;
pub mod entity;
pub mod files;
pub mod lists;
pub mod presets;
pub mod sources;
pub mod tags;

pub use api_keys::{ApiKeyRow, ApiKeySort};
pub use entity::{EntityKind, UnknownEntityKind};
pub use files::{FileRow, FileSort};
pub use lists::{ListRow, ListSort};
pub use presets::{PresetRow, PresetSort};
pub use sort::SortField;
pub use sources::{SourceRow, SourceSort};
pub use tags::{TagRow, TagSort};
