//! Field descriptors handed to dialects by the schema-reflection layer.
//!
//! A [`FieldDescriptor`] pairs a closed [`FieldKind`] with the field's
//! [`TagSettings`]. Dialects never mutate descriptors; they return
//! [`FieldAmendment`]s that the caller applies.

pub mod tags;
pub mod types;

pub use tags::TagSettings;
pub use types::{FieldAmendment, FieldDescriptor, FieldKind};
