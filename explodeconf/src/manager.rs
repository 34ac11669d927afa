//! The single open document and its derived index.
//!
//! [`ConfigManager`] is created once by the owning process and handed to every
//! collaborator that needs it. All mutations are serialized behind one lock;
//! loads parse outside the lock and swap the document and index in together,
//! so readers never see a half-built index.

use std::{
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
    data::{Document, Mapping, Node, NodePath, SaveOptions, SavePolicy, Scalar, coerce_scalar},
    error::{ConfigError, Result},
    form::FormEntry,
    groups::{GroupPair, PropertyTarget},
    relations::{GroupKind, RelationshipIndex},
    template,
};

struct Session {
    path: PathBuf,
    document: Document,
    index: RelationshipIndex,
}

impl Session {
    fn open(path: PathBuf, document: Document) -> Self {
        let index = RelationshipIndex::rebuild(&document);
        Session {
            path,
            document,
            index,
        }
    }
}

/// Owner of the open configuration document.
#[derive(Default)]
pub struct ConfigManager {
    state: RwLock<Option<Session>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.read().as_ref().map(f)
    }

    /// Run a mutation and rebuild the index from the result.
    fn mutate<R>(&self, f: impl FnOnce(&mut Document) -> Result<R>) -> Result<R> {
        let mut guard = self.write();
        let session = guard.as_mut().ok_or(ConfigError::NotLoaded)?;
        let out = f(&mut session.document)?;
        session.index = RelationshipIndex::rebuild(&session.document);
        Ok(out)
    }

    /// Open `path`, replacing the current document.
    ///
    /// A missing file opens as an empty document. On a parse or read error
    /// the previously open document stays in place.
    pub fn load_from(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let document = Document::load(&path)?;
        let session = Session::open(path, document);
        info!(
            "loaded {} ({} group(s), {} pair(s))",
            session.path.display(),
            session.document.list_groups().len(),
            session.index.entity_to_block().len()
        );
        *self.write() = Some(session);
        Ok(())
    }

    /// Write the default plugin configuration to `path` and open it.
    pub fn create_new(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut document = Document::from_mapping(template::default_document());
        document.save(path, SaveOptions::new(SavePolicy::OverwriteAll))?;
        self.load_from(path)
    }

    /// Load the last opened path again.
    pub fn reload(&self) -> Result<()> {
        let path = self
            .with_session(|s| s.path.clone())
            .ok_or(ConfigError::NotLoaded)?;
        self.load_from(path)
    }

    /// Save to the path the document was loaded from.
    pub fn save(&self, options: SaveOptions) -> Result<()> {
        let mut guard = self.write();
        let session = guard.as_mut().ok_or(ConfigError::NotLoaded)?;
        session.document.save(&session.path, options)
    }

    /// Save to `path` and make it the current path.
    pub fn save_as(&self, path: impl AsRef<Path>, options: SaveOptions) -> Result<()> {
        let mut guard = self.write();
        let session = guard.as_mut().ok_or(ConfigError::NotLoaded)?;
        session.document.save(path.as_ref(), options)?;
        session.path = path.as_ref().to_path_buf();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.read().is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.with_session(|s| s.document.is_dirty()).unwrap_or(false)
    }

    /// Path of the open document.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.with_session(|s| s.path.clone())
    }

    /// Read access to the open document.
    pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> Option<R> {
        self.with_session(|s| f(&s.document))
    }

    /// Value at `path`, or `default` when missing or nothing is loaded.
    pub fn get_value(&self, path: impl Into<NodePath>, default: Node) -> Node {
        let path = path.into();
        self.with_session(|s| s.document.get(&path).cloned())
            .flatten()
            .unwrap_or(default)
    }

    pub fn set_value(&self, path: impl Into<NodePath>, value: impl Into<Node>) -> Result<()> {
        let path = path.into();
        let value = value.into();
        self.mutate(|doc| doc.set(path, value))
    }

    /// Convert user text with [`coerce_scalar`] and store it.
    pub fn set_text(&self, path: impl Into<NodePath>, text: &str) -> Result<Scalar> {
        let scalar = coerce_scalar(text);
        self.set_value(path, scalar.clone())?;
        Ok(scalar)
    }

    /// Apply a batch of `(path, text)` edits atomically.
    pub fn apply_edits<I, P, T>(&self, edits: I) -> Result<usize>
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<NodePath>,
        T: AsRef<str>,
    {
        self.mutate(|doc| doc.apply_edits(edits))
    }

    pub fn add_entries(&self, path: impl Into<NodePath>, entries: Mapping) -> Result<()> {
        let path = path.into();
        self.mutate(|doc| doc.add_entries(path, entries))
    }

    /// Every group with its value, in `Groups` order.
    pub fn list_groups(&self) -> Vec<(String, Node)> {
        self.with_document(|doc| {
            doc.list_groups()
                .into_iter()
                .map(|(name, node)| (name.to_string(), node.clone()))
                .collect()
        })
        .unwrap_or_default()
    }

    pub fn group_items(&self, name: &str) -> Result<Vec<String>> {
        self.with_document(|doc| doc.group_items(name))
            .ok_or(ConfigError::NotLoaded)?
    }

    pub fn append_items<I, S>(&self, name: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mutate(|doc| doc.append_items(name, items))
    }

    pub fn remove_item(&self, name: &str, item: &str) -> Result<bool> {
        self.mutate(|doc| doc.remove_item(name, item))
    }

    /// Create a group pair after checking the names.
    ///
    /// Names must be non-empty, distinct from each other and not already
    /// present in `Groups`.
    pub fn create_group_pair(&self, pair: &GroupPair) -> Result<()> {
        self.mutate(|doc| {
            for name in [&pair.entity_group, &pair.block_group] {
                if name.trim().is_empty() {
                    return Err(ConfigError::InvalidName(
                        "group names must not be empty".to_string(),
                    ));
                }
                if doc.has_group(name) {
                    return Err(ConfigError::DuplicateName(name.clone()));
                }
            }
            if pair.entity_group == pair.block_group {
                return Err(ConfigError::InvalidName(format!(
                    "entity and block group are both `{}`",
                    pair.entity_group
                )));
            }
            doc.create_group_pair(pair)
        })
    }

    pub fn set_property(
        &self,
        target: &PropertyTarget,
        property: &str,
        value: impl Into<Node>,
    ) -> Result<()> {
        let value = value.into();
        self.mutate(|doc| doc.set_property(target, property, value))
    }

    /// Snapshot of the relationship index.
    pub fn index(&self) -> RelationshipIndex {
        self.with_session(|s| s.index.clone()).unwrap_or_default()
    }

    /// Group names with paired entity and block groups adjacent.
    pub fn ordered_group_names(&self) -> Vec<String> {
        self.with_session(|s| s.index.ordered_group_names(&s.document))
            .unwrap_or_default()
    }

    pub fn classify(&self, name: &str) -> GroupKind {
        self.with_session(|s| s.index.classify(name))
            .unwrap_or(GroupKind::Unclassified)
    }

    /// Section edited when `name` is selected.
    pub fn section_for(&self, name: &str) -> Option<NodePath> {
        self.with_session(|s| s.index.section_for(name)).flatten()
    }

    /// Form for the section of a group, with the section path.
    pub fn group_form(&self, name: &str) -> Option<(NodePath, Vec<FormEntry>)> {
        self.with_session(|s| {
            let section = s.index.section_for(name)?;
            let entries = s.document.form(&section)?;
            Some((section, entries))
        })
        .flatten()
    }
}
