//! Flat, UI-free description of an editable section.
//!
//! [`flatten`] turns a subtree into a list of fields and nested sections that
//! a renderer can lay out directly. Edits come back as `(path, text)` pairs
//! and are applied with [`Document::apply_edits`].

use crate::{
    data::{Document, Node, NodePath, Scalar, coerce_scalar},
    error::Result,
    template,
};

/// Sub-section rendered right after the scalar fields.
pub const PARTICLES: &str = "Particles";
/// Sub-section rendered after `Particles`.
pub const SOUND: &str = "Sound";

/// One element of a flattened form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEntry {
    /// Opens a nested section.
    SectionStart { title: String, path: NodePath },
    /// An editable scalar.
    Field { path: NodePath, value: Scalar },
    /// Closes the innermost open section.
    SectionEnd,
}

impl FormEntry {
    /// Label of a field: the last path segment.
    pub fn label(&self) -> Option<&str> {
        match self {
            FormEntry::Field { path, .. } => path.last(),
            _ => None,
        }
    }

    /// Help text for a field or a `Particles`/`Sound` section, if known.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            FormEntry::Field { path, .. } => template::field_help(path),
            FormEntry::SectionStart { title, .. } => template::property_help(title),
            FormEntry::SectionEnd => None,
        }
    }
}

/// Flatten `node`, located at `base`, into form entries.
///
/// Inside a mapping the scalar fields come first in document order, then the
/// `Particles` section, then the `Sound` section, then every other nested
/// mapping or sequence as its own section.
pub fn flatten(node: &Node, base: &NodePath) -> Vec<FormEntry> {
    let mut out = Vec::new();
    walk(node, base, &mut out);
    out
}

fn walk(node: &Node, path: &NodePath, out: &mut Vec<FormEntry>) {
    match node {
        Node::Scalar(value) => out.push(FormEntry::Field {
            path: path.clone(),
            value: value.clone(),
        }),
        Node::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                let child = path.join(i.to_string());
                match item {
                    Node::Scalar(_) => walk(item, &child, out),
                    _ => section(&i.to_string(), item, child, out),
                }
            }
        }
        Node::Mapping(map) => {
            let mut particles = None;
            let mut sound = None;
            let mut nested = Vec::new();

            for (key, value) in map {
                let child = path.join(key.as_str());
                match value {
                    Node::Scalar(_) => walk(value, &child, out),
                    _ if key == PARTICLES => particles = Some((key, value, child)),
                    _ if key == SOUND => sound = Some((key, value, child)),
                    _ => nested.push((key, value, child)),
                }
            }

            for (key, value, child) in particles.into_iter().chain(sound).chain(nested) {
                section(key, value, child, out);
            }
        }
    }
}

fn section(title: &str, node: &Node, path: NodePath, out: &mut Vec<FormEntry>) {
    out.push(FormEntry::SectionStart {
        title: title.to_string(),
        path: path.clone(),
    });
    walk(node, &path, out);
    out.push(FormEntry::SectionEnd);
}

impl Document {
    /// Form entries for the subtree at `path`, if it exists.
    pub fn form(&self, path: impl Into<NodePath>) -> Option<Vec<FormEntry>> {
        let path = path.into();
        self.get(&path).map(|node| flatten(node, &path))
    }

    /// Apply a batch of text edits.
    ///
    /// Each text is converted with [`coerce_scalar`] and stored with
    /// [`Document::set`]. If any edit fails, none are applied.
    pub fn apply_edits<I, P, T>(&mut self, edits: I) -> Result<usize>
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<NodePath>,
        T: AsRef<str>,
    {
        let mut staged = self.clone();
        let mut count = 0;
        for (path, text) in edits {
            staged.set(path, coerce_scalar(text.as_ref()))?;
            count += 1;
        }
        if count > 0 {
            *self = staged;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn titles_and_labels(entries: &[FormEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                FormEntry::SectionStart { title, .. } => format!("[{title}"),
                FormEntry::Field { path, .. } => path.last().unwrap_or_default().to_string(),
                FormEntry::SectionEnd => "]".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_flatten_order() {
        let doc = Document::from_yaml(
            "Props:\n  Sound:\n    Volume: 1.0\n  Radius: 2.0\n  Particles:\n    Amount: 5\n  Other:\n    X: 1\n  Force: true\n",
        )
        .unwrap();
        let entries = doc.form("Props").unwrap();
        assert_eq!(
            titles_and_labels(&entries),
            [
                "Radius", "Force", "[Particles", "Amount", "]", "[Sound", "Volume", "]", "[Other",
                "X", "]"
            ]
        );
        assert_eq!(
            entries[0],
            FormEntry::Field {
                path: NodePath::parse("Props.Radius"),
                value: Scalar::Float(2.0),
            }
        );
    }

    #[test]
    fn test_entries_carry_help() {
        let doc = Document::from_yaml(
            "Props:\n  Damage: 50.0\n  Custom: 1\n  Sound:\n    Pitch: 1.0\n",
        )
        .unwrap();
        let entries = doc.form("Props").unwrap();
        let help: Vec<bool> = entries.iter().map(|e| e.help().is_some()).collect();
        assert_eq!(help, [true, false, true, true, false]);
        assert!(entries[3].help().unwrap().starts_with("Playback speed"));
    }

    #[test]
    fn test_flatten_sequences() {
        let doc = Document::from_yaml("List:\n  - a\n  - b\n").unwrap();
        let entries = doc.form("").unwrap();
        assert_eq!(titles_and_labels(&entries), ["[List", "0", "1", "]"]);
        assert_eq!(entries[2].label(), Some("1"));
    }

    #[test]
    fn test_form_of_missing_section() {
        assert_eq!(Document::new().form("VanillaEntity.E.Properties"), None);
    }

    #[test]
    fn test_apply_edits() {
        let mut doc = Document::from_yaml("P:\n  Radius: 2.0\n  Name: x\n").unwrap();
        let applied = doc
            .apply_edits([("P.Radius", "4.5"), ("P.Name", "CREEPER"), ("P.Flag", "True")])
            .unwrap();
        assert_eq!(applied, 3);
        assert_eq!(doc.get("P.Radius"), Some(&Node::from(4.5)));
        assert_eq!(doc.get("P.Name"), Some(&Node::from("CREEPER")));
        assert_eq!(doc.get("P.Flag"), Some(&Node::from(true)));
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_apply_edits_is_atomic() {
        let mut doc = Document::from_yaml("P:\n  Radius: 2.0\n").unwrap();
        let before = doc.clone();
        let err = doc
            .apply_edits([("P.Radius", "9"), ("P.Radius.Sub", "1")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::PathConflict { .. }));
        assert_eq!(doc, before);
    }
}
