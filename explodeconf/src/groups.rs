//! Named item groups and entity/block group pairs.
//!
//! A group lives at `Groups.<name>` and holds either a non-empty sequence of
//! item names or an empty mapping marking a cleared group. Appending to a
//! cleared group turns it back into a sequence; removing the last item turns
//! it back into an empty mapping.

use crate::{
    data::{Document, Mapping, Node, NodePath, Scalar},
    error::{ConfigError, Result},
    template::{self, TemplateOptions},
};

/// Top-level section holding every group.
pub const GROUPS: &str = "Groups";
/// Top-level section holding entity group settings.
pub const VANILLA_ENTITY: &str = "VanillaEntity";
/// Entity group explosion properties.
pub const PROPERTIES: &str = "Properties";
/// Block groups paired with an entity group.
pub const MATERIALS: &str = "Materials";

/// A new entity group and the block group it affects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPair {
    pub entity_group: String,
    pub block_group: String,
    /// Optional sections of the entity `Properties` template.
    pub entity: TemplateOptions,
    /// Optional sections of the block `Materials` template.
    pub block: TemplateOptions,
}

impl GroupPair {
    pub fn new(entity_group: impl Into<String>, block_group: impl Into<String>) -> Self {
        Self {
            entity_group: entity_group.into(),
            block_group: block_group.into(),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, options: TemplateOptions) -> Self {
        self.entity = options;
        self
    }

    pub fn with_block(mut self, options: TemplateOptions) -> Self {
        self.block = options;
        self
    }
}

/// Section of `VanillaEntity` a property edit is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyTarget {
    /// `VanillaEntity.<entity>.Properties`
    Entity(String),
    /// `VanillaEntity.<entity>.Materials.<block>`
    Block { entity: String, block: String },
}

impl PropertyTarget {
    pub fn section(&self) -> NodePath {
        match self {
            PropertyTarget::Entity(entity) => {
                NodePath::from_segments([VANILLA_ENTITY, entity.as_str(), PROPERTIES])
            }
            PropertyTarget::Block { entity, block } => {
                NodePath::from_segments([VANILLA_ENTITY, entity.as_str(), MATERIALS, block.as_str()])
            }
        }
    }
}

/// Split comma-separated user input into item names.
pub fn parse_item_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn group_path(name: &str) -> String {
    format!("{GROUPS}.{name}")
}

impl Document {
    /// Every group in `Groups` order.
    pub fn list_groups(&self) -> Vec<(&str, &Node)> {
        self.get(GROUPS)
            .and_then(Node::as_mapping)
            .map(|groups| groups.iter().map(|(k, v)| (k.as_str(), v)).collect())
            .unwrap_or_default()
    }

    /// Whether `Groups` has an entry called `name`.
    pub fn has_group(&self, name: &str) -> bool {
        self.get(GROUPS)
            .and_then(Node::as_mapping)
            .is_some_and(|groups| groups.contains_key(name))
    }

    /// Items of a group. A cleared group has none.
    pub fn group_items(&self, name: &str) -> Result<Vec<String>> {
        let group = self
            .get(NodePath::from_segments([GROUPS, name]))
            .ok_or_else(|| ConfigError::GroupNotFound(name.to_string()))?;

        match group {
            Node::Sequence(items) => Ok(items
                .iter()
                .map(|item| match item {
                    Node::Scalar(Scalar::String(s)) => s.clone(),
                    Node::Scalar(other) => other.to_string(),
                    other => other.kind().to_string(),
                })
                .collect()),
            Node::Mapping(map) if map.is_empty() => Ok(Vec::new()),
            other => Err(ConfigError::type_mismatch(
                group_path(name),
                "sequence or empty mapping",
                other.kind(),
            )),
        }
    }

    fn group_mut(&mut self, name: &str) -> Result<&mut Node> {
        let groups = match self.get_mut(&NodePath::parse(GROUPS)) {
            Some(Node::Mapping(groups)) => groups,
            Some(other) => {
                return Err(ConfigError::type_mismatch(GROUPS, "mapping", other.kind()));
            }
            None => return Err(ConfigError::GroupNotFound(name.to_string())),
        };
        groups
            .get_mut(name)
            .ok_or_else(|| ConfigError::GroupNotFound(name.to_string()))
    }

    /// Append items to a group. Duplicates are kept.
    pub fn append_items<I, S>(&mut self, name: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<Node> = items.into_iter().map(|s| Node::from(s.into())).collect();
        let group = self.group_mut(name)?;
        if !group.is_empty_mapping() && group.as_sequence().is_none() {
            return Err(ConfigError::type_mismatch(
                group_path(name),
                "sequence or empty mapping",
                group.kind(),
            ));
        }
        if items.is_empty() {
            return Ok(());
        }

        if group.is_empty_mapping() {
            *group = Node::Sequence(Vec::new());
        }
        let count = items.len();
        if let Node::Sequence(existing) = group {
            existing.extend(items);
        }

        debug!("appended {count} item(s) to group `{name}`");
        self.mark_dirty();
        Ok(())
    }

    /// Remove the first occurrence of `item` from a group.
    ///
    /// Returns `false` when the group holds no such item. A group left empty
    /// becomes an empty mapping.
    pub fn remove_item(&mut self, name: &str, item: &str) -> Result<bool> {
        let group = self.group_mut(name)?;
        let Node::Sequence(items) = &mut *group else {
            return Ok(false);
        };
        let Some(pos) = items.iter().position(|n| n.as_str() == Some(item)) else {
            return Ok(false);
        };

        items.remove(pos);
        if items.is_empty() {
            *group = Node::empty_mapping();
            debug!("group `{name}` cleared");
        }

        debug!("removed `{item}` from group `{name}`");
        self.mark_dirty();
        Ok(true)
    }

    /// Add an entity group and a block group with seeded settings.
    ///
    /// Both names are added to `Groups` as cleared groups, and
    /// `VanillaEntity.<entity>` is created with a `Materials.<block>` entry
    /// and a `Properties` entry from the default templates. Existing entries
    /// with the same names are overwritten; callers that care check first.
    pub fn create_group_pair(&mut self, pair: &GroupPair) -> Result<()> {
        for section in [GROUPS, VANILLA_ENTITY] {
            if let Some(node) = self.get(section)
                && node.as_mapping().is_none()
            {
                return Err(ConfigError::type_mismatch(section, "mapping", node.kind()));
            }
        }

        let mut groups = Mapping::new();
        groups.insert(pair.entity_group.clone(), Node::empty_mapping());
        groups.insert(pair.block_group.clone(), Node::empty_mapping());

        let mut materials = Mapping::new();
        materials.insert(
            pair.block_group.clone(),
            template::block_materials(pair.block).into(),
        );
        let mut entity = Mapping::new();
        entity.insert(MATERIALS.to_string(), materials.into());
        entity.insert(
            PROPERTIES.to_string(),
            template::entity_properties(pair.entity).into(),
        );
        let mut vanilla = Mapping::new();
        vanilla.insert(pair.entity_group.clone(), entity.into());

        for section in [GROUPS, VANILLA_ENTITY] {
            if self.get(section).is_none() {
                self.set(section, Node::empty_mapping())?;
            }
        }
        self.add_entries(GROUPS, groups)?;
        self.add_entries(VANILLA_ENTITY, vanilla)?;

        info!(
            "created group pair `{}` -> `{}`",
            pair.entity_group, pair.block_group
        );
        Ok(())
    }

    /// Set one property of an existing entity or block section.
    ///
    /// `property` may be dotted to reach into `Particles` or `Sound`.
    pub fn set_property(
        &mut self,
        target: &PropertyTarget,
        property: &str,
        value: impl Into<Node>,
    ) -> Result<()> {
        let section = target.section();
        match self.get(&section) {
            Some(Node::Mapping(_)) => {}
            Some(other) => {
                return Err(ConfigError::type_mismatch(
                    section.to_string(),
                    "mapping",
                    other.kind(),
                ));
            }
            None => return Err(ConfigError::PathNotFound(section.to_string())),
        }
        self.set(NodePath::parse(&format!("{section}.{property}")), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::from_yaml("Groups:\n  G:\n  - stone\n  Cleared: {}\n  Bad: 3\n").unwrap()
    }

    #[test]
    fn test_list_groups_in_order() {
        let doc = doc();
        let names: Vec<_> = doc.list_groups().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["G", "Cleared", "Bad"]);
        assert!(Document::new().list_groups().is_empty());
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let mut doc = doc();
        doc.append_items("Cleared", ["a"]).unwrap();
        doc.append_items("Cleared", ["a"]).unwrap();
        assert_eq!(doc.group_items("Cleared").unwrap(), ["a", "a"]);
    }

    #[test]
    fn test_append_to_unknown_group() {
        let mut doc = doc();
        let err = doc.append_items("Nope", ["a"]).unwrap_err();
        assert!(matches!(err, ConfigError::GroupNotFound(ref n) if n == "Nope"));

        let mut empty = Document::new();
        assert!(matches!(
            empty.append_items("G", ["a"]),
            Err(ConfigError::GroupNotFound(_))
        ));
    }

    #[test]
    fn test_append_to_scalar_group_fails() {
        let mut doc = doc();
        let before = doc.clone();
        let err = doc.append_items("Bad", ["a"]).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
        let err = doc.append_items("Bad", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_append_nothing_keeps_sentinel() {
        let mut doc = doc();
        doc.append_items("Cleared", Vec::<String>::new()).unwrap();
        assert!(doc.get("Groups.Cleared").unwrap().is_empty_mapping());
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_remove_until_empty_collapses() {
        let mut doc = doc();
        doc.append_items("G", ["dirt", "stone"]).unwrap();
        assert!(doc.remove_item("G", "stone").unwrap());
        assert_eq!(doc.group_items("G").unwrap(), ["dirt", "stone"]);
        assert!(doc.remove_item("G", "dirt").unwrap());
        assert!(doc.remove_item("G", "stone").unwrap());
        assert!(doc.get("Groups.G").unwrap().is_empty_mapping());

        doc.append_items("G", ["x"]).unwrap();
        assert_eq!(doc.get("Groups.G"), Some(&Node::Sequence(vec!["x".into()])));
    }

    #[test]
    fn test_remove_missing_item() {
        let mut doc = doc();
        assert!(!doc.remove_item("G", "gravel").unwrap());
        assert!(!doc.remove_item("Cleared", "stone").unwrap());
        assert!(matches!(
            doc.remove_item("Nope", "stone"),
            Err(ConfigError::GroupNotFound(_))
        ));
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_create_group_pair() {
        let mut doc = Document::new();
        let full = TemplateOptions::new(true, true);
        doc.create_group_pair(&GroupPair::new("E9", "B9").with_entity(full).with_block(full))
            .unwrap();

        assert!(doc.get("Groups.E9").unwrap().is_empty_mapping());
        assert!(doc.get("Groups.B9").unwrap().is_empty_mapping());

        let block = doc
            .get("VanillaEntity.E9.Materials.B9")
            .and_then(Node::as_mapping)
            .unwrap();
        for key in template::block_materials(TemplateOptions::default()).keys() {
            assert!(block.contains_key(key), "missing {key}");
        }
        assert!(block.contains_key("Particles"));
        assert!(block.contains_key("Sound"));

        let props = doc.get("VanillaEntity.E9.Properties").unwrap();
        assert_eq!(
            props.as_mapping().unwrap()["ExplosionFactor"],
            Node::from(1.0)
        );
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_create_group_pair_rejects_bad_sections() {
        let mut doc = Document::from_yaml("Groups: []\n").unwrap();
        let before = doc.clone();
        let err = doc.create_group_pair(&GroupPair::new("E", "B")).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_set_property() {
        let mut doc = Document::new();
        doc.create_group_pair(&GroupPair::new("E", "B")).unwrap();

        doc.set_property(&PropertyTarget::Entity("E".into()), "ExplosionRadius", 100.0)
            .unwrap();
        assert_eq!(
            doc.get("VanillaEntity.E.Properties.ExplosionRadius"),
            Some(&Node::from(100.0))
        );

        let block = PropertyTarget::Block {
            entity: "E".into(),
            block: "B".into(),
        };
        doc.set_property(&block, "Damage", 75.0).unwrap();
        assert_eq!(
            doc.get("VanillaEntity.E.Materials.B.Damage"),
            Some(&Node::from(75.0))
        );

        let missing = PropertyTarget::Entity("Nope".into());
        assert!(matches!(
            doc.set_property(&missing, "Damage", 1.0),
            Err(ConfigError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_parse_item_list() {
        assert_eq!(parse_item_list(" stone, dirt ,,grass "), ["stone", "dirt", "grass"]);
        assert!(parse_item_list(" , ").is_empty());
    }
}
