use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};

/// Ordered key to node map. Keys are unique and keep insertion order.
pub type Mapping = IndexMap<String, Node>;

/// One point in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Ordered key/value entries.
    Mapping(Mapping),
    /// Ordered list of nodes.
    Sequence(Vec<Node>),
    /// Leaf value.
    Scalar(Scalar),
}

/// Typed leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl Node {
    /// An empty mapping, also used as the cleared-group sentinel.
    pub fn empty_mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    /// Short name of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Scalar(scalar) => scalar.kind(),
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// The string content when this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty_mapping(&self) -> bool {
        matches!(self, Node::Mapping(map) if map.is_empty())
    }
}

impl Scalar {
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Boolean(_) => "boolean",
            Scalar::Null => "null",
        }
    }
}

/// Renders a scalar as the text a user would edit.
///
/// The output reads back to the same kind through
/// [`coerce_scalar`](crate::data::coerce_scalar), except for strings that
/// happen to spell another literal.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(v) if v.is_nan() => f.write_str(".nan"),
            Scalar::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { ".inf" } else { "-.inf" })
            }
            // `{:?}` keeps the fractional part so `50.0` does not read back as an integer.
            Scalar::Float(v) => write!(f, "{v:?}"),
            Scalar::Boolean(b) => write!(f, "{b}"),
            Scalar::Null => f.write_str("null"),
        }
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Scalar(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(Scalar::String(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Scalar(Scalar::Integer(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Scalar(Scalar::Boolean(value))
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Sequence(value)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Node::Sequence(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(item)?;
                }
                out.end()
            }
            Node::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Float(v) => serializer.serialize_f64(*v),
            Scalar::Boolean(b) => serializer.serialize_bool(*b),
            Scalar::Null => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping, sequence or scalar")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Boolean(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Integer(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Scalar(match i64::try_from(v) {
            Ok(i) => Scalar::Integer(i),
            Err(_) => Scalar::Float(v as f64),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar(Scalar::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Node, A::Error> {
        let mut map = Mapping::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(MapKey(key)) = access.next_key::<MapKey>()? {
            if map.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate mapping key `{key}`")));
            }
            let value = access.next_value::<Node>()?;
            map.insert(key, value);
        }
        Ok(Node::Mapping(map))
    }

    /// Tagged values (`!tag value`) keep their value and drop the tag.
    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Node, A::Error> {
        let (tag, value) = data.variant::<String>()?;
        debug!("ignoring tag `!{tag}`");
        value.newtype_variant::<Node>()
    }
}

/// Mapping key read from the source. Non-string scalar keys are stringified.
struct MapKey(String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}

struct MapKeyVisitor;

impl MapKeyVisitor {
    fn stringified<E>(key: String) -> Result<MapKey, E> {
        warn!("non-string mapping key `{key}` converted to string");
        Ok(MapKey(key))
    }
}

impl<'de> Visitor<'de> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MapKey, E> {
        Ok(MapKey(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MapKey, E> {
        Self::stringified(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MapKey, E> {
        Self::stringified(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MapKey, E> {
        Self::stringified(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MapKey, E> {
        Self::stringified(Scalar::Float(v).to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<MapKey, E> {
        Self::stringified("null".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_scalars_are_typed() {
        let node: Node = serde_yaml::from_str(
            "a: text\nb: 3\nc: 2.5\nd: true\ne: ~\nf: [x, y]\n",
        )
        .unwrap();
        let map = node.as_mapping().unwrap();
        assert_eq!(map["a"], Node::from("text"));
        assert_eq!(map["b"], Node::from(3_i64));
        assert_eq!(map["c"], Node::from(2.5));
        assert_eq!(map["d"], Node::from(true));
        assert_eq!(map["e"], Node::Scalar(Scalar::Null));
        assert_eq!(map["f"], Node::Sequence(vec!["x".into(), "y".into()]));
    }

    #[test]
    fn test_mapping_order_is_preserved() {
        let node: Node = serde_yaml::from_str("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<_> = node.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        let text = serde_yaml::to_string(&node).unwrap();
        assert_eq!(text, "zeta: 1\nalpha: 2\nmid: 3\n");
    }

    #[test]
    fn test_numeric_keys_become_strings() {
        let node: Node = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        let map = node.as_mapping().unwrap();
        assert!(map.contains_key("1"));
        assert!(map.contains_key("true"));
    }

    #[test]
    fn test_stringified_key_collision_is_rejected() {
        let err = serde_yaml::from_str::<Node>("Groups:\n  1: [a]\n  '1': [b]\n").unwrap_err();
        assert!(err.to_string().contains("duplicate mapping key `1`"));
    }

    #[test]
    fn test_tagged_value_keeps_inner_value() {
        let node: Node = serde_yaml::from_str("A: !custom value\nB: plain\n").unwrap();
        let map = node.as_mapping().unwrap();
        assert_eq!(map["A"], Node::from("value"));
        assert_eq!(map["B"], Node::from("plain"));
    }

    #[test]
    fn test_float_display_keeps_fraction() {
        assert_eq!(Scalar::Float(50.0).to_string(), "50.0");
        assert_eq!(Scalar::Float(f64::INFINITY).to_string(), ".inf");
        assert_eq!(Scalar::Integer(-4).to_string(), "-4");
        assert_eq!(Scalar::Null.to_string(), "null");
    }

    #[test]
    fn test_json_round_trip() {
        let node: Node = serde_json::from_str(r#"{"b":[1,2.5,"s",null],"a":{}}"#).unwrap();
        let back = serde_json::to_string(&node).unwrap();
        assert_eq!(back, r#"{"b":[1,2.5,"s",null],"a":{}}"#);
    }
}
