use std::{
    borrow::Cow,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::Deserialize;
use tempfile::NamedTempFile;

use super::{
    node::{Mapping, Node},
    path::{NodePath, sequence_index},
};
use crate::{
    error::{ConfigError, Result},
    groups::GROUPS,
};

/// Serialized form of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from the file extension. `.json` is JSON, anything
    /// else is treated as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    fn parse(self, text: &str) -> std::result::Result<Option<Node>, String> {
        match self {
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }

    /// Serialize a node tree in this format.
    pub fn render(self, node: &Node) -> Result<String> {
        match self {
            DocumentFormat::Yaml => {
                serde_yaml::to_string(node).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            DocumentFormat::Json => serde_json::to_string_pretty(node)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

/// How the `Groups` section is treated when a document is written.
///
/// There is no default: every save names the policy it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SavePolicy {
    /// Write the whole in-memory document.
    OverwriteAll,
    /// Keep the `Groups` section currently on disk and write everything else
    /// from memory.
    #[serde(alias = "preserve-groups")]
    PreserveGroupsFromDisk,
}

/// Options for [`Document::save`].
#[derive(Debug, Clone, Copy)]
pub struct SaveOptions {
    pub policy: SavePolicy,
    /// Copy an existing destination to a timestamped backup first.
    pub backup: bool,
}

impl SaveOptions {
    pub fn new(policy: SavePolicy) -> Self {
        Self {
            policy,
            backup: false,
        }
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }
}

/// A configuration document addressed by dot-separated paths.
///
/// The root is always a mapping. Every successful mutation marks the document
/// dirty; [`Document::save`] clears the flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
    dirty: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::from_mapping(Mapping::new())
    }

    pub fn from_mapping(root: Mapping) -> Self {
        Document {
            root: Node::Mapping(root),
            dirty: false,
        }
    }

    /// Read a document from disk. A missing file yields an empty document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("{} not found, starting from an empty document", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(ConfigError::io(path, e)),
        };
        Self::parse(&text, DocumentFormat::from_path(path), path)
    }

    /// Parse document text. `origin` is only used in error reports.
    pub fn parse(text: &str, format: DocumentFormat, origin: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let parse_error = |message: String| ConfigError::Parse {
            path: origin.to_path_buf(),
            message,
        };

        match format.parse(text).map_err(parse_error)? {
            None => Ok(Self::new()),
            Some(root @ Node::Mapping(_)) => Ok(Document { root, dirty: false }),
            Some(other) => Err(parse_error(format!(
                "document root must be a mapping, found {}",
                other.kind()
            ))),
        }
    }

    /// Parse YAML text held in memory.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Self::parse(text, DocumentFormat::Yaml, Path::new("<inline>"))
    }

    /// The root mapping node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Look up the node at `path`. Missing paths are not an error.
    pub fn get(&self, path: impl Into<NodePath>) -> Option<&Node> {
        let path = path.into();
        let mut current = &self.root;
        for segment in path.segments() {
            current = match current {
                Node::Mapping(map) => map.get(segment.as_str())?,
                Node::Sequence(items) => items.get(sequence_index(segment)?)?,
                Node::Scalar(_) => return None,
            };
        }
        Some(current)
    }

    /// Look up the node at `path`, cloning it, or return `default`.
    pub fn get_or(&self, path: impl Into<NodePath>, default: Node) -> Node {
        self.get(path).cloned().unwrap_or(default)
    }

    pub(crate) fn get_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let mut current = &mut self.root;
        for segment in path.segments() {
            current = match current {
                Node::Mapping(map) => map.get_mut(segment.as_str())?,
                Node::Sequence(items) => items.get_mut(sequence_index(segment)?)?,
                Node::Scalar(_) => return None,
            };
        }
        Some(current)
    }

    /// Store `value` at `path`.
    ///
    /// Missing intermediate keys are created as empty mappings. The final
    /// segment is inserted as a mapping key, or replaces an existing sequence
    /// element when the parent is a sequence. Either the whole path is applied
    /// or the document is left untouched.
    ///
    /// An intermediate sequence is traversed when the segment is an in-range
    /// index; any other segment into a sequence is a
    /// [`ConfigError::PathConflict`].
    pub fn set(&mut self, path: impl Into<NodePath>, value: impl Into<Node>) -> Result<()> {
        let path = path.into();
        let Some((last, parents)) = path.segments().split_last() else {
            return Err(ConfigError::InvalidPath(path.to_string()));
        };

        // Errors can only come from nodes that already existed; once a key has
        // been created every later step lands in a fresh mapping.
        let mut current = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            current = match current {
                Node::Mapping(map) => map
                    .entry(segment.clone())
                    .or_insert_with(Node::empty_mapping),
                Node::Sequence(items) => {
                    let len = items.len();
                    match sequence_index(segment).and_then(|i| items.get_mut(i)) {
                        Some(item) => item,
                        None => {
                            return Err(ConfigError::PathConflict {
                                path: path.prefix(depth + 1),
                                reason: format!(
                                    "`{segment}` is not an index into a sequence of length {len}"
                                ),
                            });
                        }
                    }
                }
                Node::Scalar(scalar) => {
                    return Err(ConfigError::PathConflict {
                        path: path.prefix(depth),
                        reason: format!("{} value cannot hold `{segment}`", scalar.kind()),
                    });
                }
            };
        }

        match current {
            Node::Mapping(map) => {
                map.insert(last.clone(), value.into());
            }
            Node::Sequence(items) => {
                let len = items.len();
                let Some(slot) = sequence_index(last).and_then(|i| items.get_mut(i)) else {
                    return Err(ConfigError::PathConflict {
                        path: path.to_string(),
                        reason: format!("`{last}` is not an index into a sequence of length {len}"),
                    });
                };
                *slot = value.into();
            }
            Node::Scalar(scalar) => {
                return Err(ConfigError::PathConflict {
                    path: path.prefix(parents.len()),
                    reason: format!("{} value cannot hold `{last}`", scalar.kind()),
                });
            }
        }

        debug!("set `{path}`");
        self.dirty = true;
        Ok(())
    }

    /// Merge `entries` into the existing mapping at `path`.
    ///
    /// Existing keys are overwritten in place and new keys are appended.
    pub fn add_entries(&mut self, path: impl Into<NodePath>, entries: Mapping) -> Result<()> {
        let path = path.into();
        let target = self
            .get_mut(&path)
            .ok_or_else(|| ConfigError::PathNotFound(path.to_string()))?;
        let actual = target.kind();
        let Node::Mapping(map) = target else {
            return Err(ConfigError::type_mismatch(path.to_string(), "mapping", actual));
        };

        let count = entries.len();
        map.extend(entries);
        debug!("merged {count} entries into `{path}`");
        self.dirty = true;
        Ok(())
    }

    /// Serialize the document in `format`.
    pub fn to_text(&self, format: DocumentFormat) -> Result<String> {
        format.render(&self.root)
    }

    /// Write the document to `dest`.
    ///
    /// The text is written to a temporary file next to `dest` and renamed over
    /// it, so a failed write never leaves a partial file behind.
    pub fn save(&mut self, dest: &Path, options: SaveOptions) -> Result<()> {
        let format = DocumentFormat::from_path(dest);
        let root = match options.policy {
            SavePolicy::OverwriteAll => Cow::Borrowed(&self.root),
            SavePolicy::PreserveGroupsFromDisk => Cow::Owned(self.with_groups_from(dest)?),
        };
        let text = format.render(&root)?;

        if options.backup
            && let Some(backup) = backup_existing(dest)?
        {
            info!("backed up {} to {}", dest.display(), backup.display());
        }
        write_atomic(dest, &text)?;

        self.dirty = false;
        info!("saved {} ({:?})", dest.display(), options.policy);
        Ok(())
    }

    /// The in-memory tree with `Groups` replaced by the one stored at `dest`.
    fn with_groups_from(&self, dest: &Path) -> Result<Node> {
        let on_disk = Document::load(dest)?;
        let groups = on_disk.get(GROUPS).cloned().unwrap_or_else(Node::empty_mapping);

        let mut root = self.root.clone();
        if let Node::Mapping(map) = &mut root {
            map.shift_remove(GROUPS);
            map.insert(GROUPS.to_string(), groups);
        }
        Ok(root)
    }
}

fn write_atomic(dest: &Path, text: &str) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConfigError::io(dir, e))?;
    tmp.write_all(text.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| ConfigError::io(dest, e))?;
    // The temp file is created owner-only; keep the mode of the file it replaces.
    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| ConfigError::io(dest, e))?;
    }
    tmp.persist(dest).map_err(|e| ConfigError::io(dest, e.error))?;
    Ok(())
}

fn backup_existing(dest: &Path) -> Result<Option<PathBuf>> {
    if !dest.exists() {
        return Ok(None);
    }
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let bk = match dest.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("bk-{secs}.{ext}"),
        None => format!("bk-{secs}"),
    };

    let backup_path = dest.with_extension(bk);
    fs::copy(dest, &backup_path).map_err(|e| ConfigError::io(&backup_path, e))?;
    Ok(Some(backup_path))
}
