//! # explodeconf
//!
//! Document engine behind the ExplodeAny configuration editor.
//!
//! The plugin configuration is a YAML (or JSON) tree. This crate loads it
//! into an ordered [`Node`](data::Node) tree, addresses it by dot-separated
//! paths, manages the named item groups under `Groups`, and derives which
//! entity groups are paired with which block groups from the nesting under
//! `VanillaEntity`.
//!
//! ## Features
//!
//! - Order-preserving tree with typed scalars (string, integer, float, boolean, null)
//! - Path lookup that never fails and path assignment that is all-or-nothing
//! - Group lists with the empty-mapping "cleared" form
//! - Entity/block relationship index with a paired display order
//! - UI-free form flattening and batched text edits
//! - Atomic saves with an explicit policy for the `Groups` section
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use explodeconf::{ConfigManager, Node, SaveOptions, SavePolicy};
//!
//! let manager = ConfigManager::new();
//! manager.load_from("config.yml").unwrap();
//!
//! for name in manager.ordered_group_names() {
//!     println!("{name}: {:?}", manager.classify(&name));
//! }
//!
//! manager.append_items("Group1", ["STONE", "DIRT"]).unwrap();
//! manager.set_text("VanillaEntity.Group1.Properties.ExplosionRadius", "4.0").unwrap();
//! let radius = manager.get_value(
//!     "VanillaEntity.Group1.Properties.ExplosionRadius",
//!     Node::from(0.0),
//! );
//! println!("{radius:?}");
//! manager.save(SaveOptions::new(SavePolicy::OverwriteAll)).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Node tree, paths, scalar coercion and the path-addressable document
//! - [`groups`] - Group lists and entity/block group pairs
//! - [`relations`] - Entity/block relationship index
//! - [`form`] - Form flattening and edit batches
//! - [`manager`] - The open-document facade
//! - [`template`] - Default values for new documents and group pairs

#[macro_use]
extern crate log;

/// Document model and path-addressed access.
pub mod data;

/// Error taxonomy.
pub mod error;

/// UI-free form description of a section.
pub mod form;

/// Group registry.
pub mod groups;

/// Facade owning the open document.
pub mod manager;

/// Entity/block relationship index.
pub mod relations;

/// Default property templates.
pub mod template;

pub use data::{
    Document, DocumentFormat, Mapping, Node, NodePath, SaveOptions, SavePolicy, Scalar,
    coerce_scalar,
};
pub use error::{ConfigError, Result};
pub use form::FormEntry;
pub use groups::{GroupPair, PropertyTarget, parse_item_list};
pub use manager::ConfigManager;
pub use relations::{GroupKind, RelationshipIndex};
pub use template::TemplateOptions;
