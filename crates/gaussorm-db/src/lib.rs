//! # gaussorm-db
//!
//! The dialect layer of gaussorm. A [`Dialect`](dialect::Dialect) turns the
//! schema-reflection layer's [`FieldDescriptor`](fields::FieldDescriptor)s into
//! concrete column types, renders small SQL fragments, and answers catalog
//! questions through a [`Catalog`](catalog::Catalog) handle.
//!
//! ## Module Overview
//!
//! - [`fields`] - Field kinds, descriptors, and tag settings
//! - [`dialect`] - The [`Dialect`](dialect::Dialect) contract and its shared defaults
//! - [`catalog`] - The async seam used for catalog introspection
//! - [`dialect::registry`] - Name-based dialect lookup

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::format_push_string)]

pub mod catalog;
pub mod dialect;
pub mod fields;

// Re-export the most commonly used types at the crate root.
pub use catalog::Catalog;
pub use dialect::registry::DialectRegistry;
pub use dialect::{ColumnType, Dialect, ParsedField};
pub use fields::{FieldAmendment, FieldDescriptor, FieldKind, TagSettings};
