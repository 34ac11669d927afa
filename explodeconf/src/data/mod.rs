//! Document model and path-addressed access.
//!
//! - [`node`] - the [`Node`] tree and its typed [`Scalar`] leaves
//! - [`path`] - dot-separated [`NodePath`] addresses
//! - [`scalar`] - conversion of user-entered text into scalars
//! - [`document`] - loading, lookup, mutation and saving of a [`Document`]

/// Tree representation of a parsed document.
pub mod node;

/// Dot-separated paths into a document.
pub mod path;

/// User text to scalar conversion.
pub mod scalar;

/// Path-addressable document store.
pub mod document;

pub use document::{Document, DocumentFormat, SaveOptions, SavePolicy};
pub use node::{Mapping, Node, Scalar};
pub use path::NodePath;
pub use scalar::coerce_scalar;
