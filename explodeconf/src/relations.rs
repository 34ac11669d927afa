//! Entity/block pairing derived from `VanillaEntity`.
//!
//! An entity group is any key of `VanillaEntity`; each key under its
//! `Materials` names the block group it is paired with. The index is never
//! stored in the document and is rebuilt from scratch whenever the document
//! changes.

use indexmap::{IndexMap, IndexSet};

use crate::{
    data::{Document, Node, NodePath},
    groups::{MATERIALS, PROPERTIES, VANILLA_ENTITY},
};

/// How a group name is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Key of `VanillaEntity` with at least one material.
    Entity,
    /// Key under some entity's `Materials`.
    Block,
    /// Not connected to anything.
    Unclassified,
}

/// Bidirectional entity/block name index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipIndex {
    entity_to_block: IndexMap<String, String>,
    block_to_entity: IndexMap<String, String>,
}

impl RelationshipIndex {
    /// Scan `VanillaEntity` in document order.
    ///
    /// When an entity lists several materials, the last one is kept for that
    /// entity. When a block is listed under several entities, the last entity
    /// is kept for that block.
    pub fn rebuild(doc: &Document) -> Self {
        let mut index = RelationshipIndex::default();

        let Some(entities) = doc.get(VANILLA_ENTITY).and_then(Node::as_mapping) else {
            return index;
        };

        for (entity, data) in entities {
            let Some(materials) = data
                .as_mapping()
                .and_then(|d| d.get(MATERIALS))
                .and_then(Node::as_mapping)
            else {
                debug!("entity group `{entity}` has no materials");
                continue;
            };
            if materials.len() > 1 {
                warn!(
                    "entity group `{entity}` lists {} block groups, keeping the last",
                    materials.len()
                );
            }
            for block in materials.keys() {
                index.entity_to_block.insert(entity.clone(), block.clone());
                index.block_to_entity.insert(block.clone(), entity.clone());
            }
        }

        debug!(
            "relationship index rebuilt: {} entity group(s), {} block group(s)",
            index.entity_to_block.len(),
            index.block_to_entity.len()
        );
        index
    }

    pub fn entity_to_block(&self) -> &IndexMap<String, String> {
        &self.entity_to_block
    }

    pub fn block_to_entity(&self) -> &IndexMap<String, String> {
        &self.block_to_entity
    }

    /// Block group paired with an entity group.
    pub fn block_for(&self, entity: &str) -> Option<&str> {
        self.entity_to_block.get(entity).map(String::as_str)
    }

    /// Entity group a block group belongs to.
    pub fn entity_for(&self, block: &str) -> Option<&str> {
        self.block_to_entity.get(block).map(String::as_str)
    }

    pub fn classify(&self, name: &str) -> GroupKind {
        if self.entity_to_block.contains_key(name) {
            GroupKind::Entity
        } else if self.block_to_entity.contains_key(name) {
            GroupKind::Block
        } else {
            GroupKind::Unclassified
        }
    }

    /// Group names for display, paired groups adjacent.
    ///
    /// Each entity is followed by its block, in index order, then the
    /// remaining groups follow in `Groups` order. Names missing from
    /// `Groups` are skipped and every name appears once.
    pub fn ordered_group_names(&self, doc: &Document) -> Vec<String> {
        let groups = doc.list_groups();
        let present: IndexSet<&str> = groups.iter().map(|(name, _)| *name).collect();
        let mut ordered: IndexSet<&str> = IndexSet::with_capacity(present.len());

        for (entity, block) in &self.entity_to_block {
            for name in [entity.as_str(), block.as_str()] {
                if present.contains(name) {
                    ordered.insert(name);
                }
            }
        }
        ordered.extend(present.iter().copied());

        ordered.into_iter().map(str::to_string).collect()
    }

    /// Section a group's settings are edited through.
    ///
    /// Entity groups edit their `Properties`; block groups edit the
    /// `Materials` of the entity they belong to.
    pub fn section_for(&self, name: &str) -> Option<NodePath> {
        match self.classify(name) {
            GroupKind::Entity => Some(NodePath::from_segments([VANILLA_ENTITY, name, PROPERTIES])),
            GroupKind::Block => {
                let entity = self.entity_for(name)?;
                Some(NodePath::from_segments([VANILLA_ENTITY, entity, MATERIALS]))
            }
            GroupKind::Unclassified => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_derivation() {
        let doc = Document::from_yaml(
            "VanillaEntity:\n  E1:\n    Materials:\n      B1:\n        Damage: 1.0\n    Properties: {}\n",
        )
        .unwrap();
        let index = RelationshipIndex::rebuild(&doc);
        assert_eq!(index.block_for("E1"), Some("B1"));
        assert_eq!(index.entity_for("B1"), Some("E1"));
        assert_eq!(index.classify("E1"), GroupKind::Entity);
        assert_eq!(index.classify("B1"), GroupKind::Block);
        assert_eq!(index.classify("G3"), GroupKind::Unclassified);
    }

    #[test]
    fn test_last_material_wins() {
        let doc = Document::from_yaml(
            "VanillaEntity:\n  E1:\n    Materials:\n      B1: {}\n      B2: {}\n",
        )
        .unwrap();
        let index = RelationshipIndex::rebuild(&doc);
        assert_eq!(index.block_for("E1"), Some("B2"));
        assert_eq!(index.entity_for("B1"), Some("E1"));
        assert_eq!(index.entity_for("B2"), Some("E1"));
    }

    #[test]
    fn test_missing_sections_give_empty_index() {
        assert_eq!(
            RelationshipIndex::rebuild(&Document::new()),
            RelationshipIndex::default()
        );
        let doc = Document::from_yaml("VanillaEntity:\n  E1:\n    Properties: {}\n  E2: 4\n")
            .unwrap();
        assert!(RelationshipIndex::rebuild(&doc).entity_to_block().is_empty());
    }

    #[test]
    fn test_paired_groups_are_adjacent() {
        let doc = Document::from_yaml(
            "Groups:\n  B1: {}\n  E1: {}\n  G3: {}\nVanillaEntity:\n  E1:\n    Materials:\n      B1: {}\n",
        )
        .unwrap();
        let index = RelationshipIndex::rebuild(&doc);
        assert_eq!(index.ordered_group_names(&doc), ["E1", "B1", "G3"]);
    }

    #[test]
    fn test_ordering_skips_names_outside_groups() {
        let doc = Document::from_yaml(
            "Groups:\n  G0: {}\n  B2: {}\n  E1: {}\nVanillaEntity:\n  E1:\n    Materials:\n      Bx: {}\n  E2:\n    Materials:\n      B2: {}\n",
        )
        .unwrap();
        let index = RelationshipIndex::rebuild(&doc);
        assert_eq!(index.ordered_group_names(&doc), ["E1", "B2", "G0"]);
    }

    #[test]
    fn test_section_for() {
        let doc = Document::from_yaml(
            "VanillaEntity:\n  E1:\n    Materials:\n      B1: {}\n",
        )
        .unwrap();
        let index = RelationshipIndex::rebuild(&doc);
        assert_eq!(
            index.section_for("E1").map(|p| p.to_string()),
            Some("VanillaEntity.E1.Properties".to_string())
        );
        assert_eq!(
            index.section_for("B1").map(|p| p.to_string()),
            Some("VanillaEntity.E1.Materials".to_string())
        );
        assert_eq!(index.section_for("G3"), None);
    }
}
