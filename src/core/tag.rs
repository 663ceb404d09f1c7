//=========================================================================
// Tag Tree
//=========================================================================
//
// Generic key/typed-value tree exchanged between displays and whoever
// persists them.
//
// Architecture:
//   Display::on_save() → CompoundTag → (embedder storage) → Display::on_load()
//
// The engine never looks inside a display's tag. Each display owns its
// own schema; the manager only guarantees delivery without modification.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

//=== Tag =================================================================

/// A single typed value inside a tag tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    List(Vec<Tag>),
    Compound(CompoundTag),
}

impl Tag {
    /// Human-readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Tag::Byte(_) => "byte",
            Tag::Short(_) => "short",
            Tag::Int(_) => "int",
            Tag::Long(_) => "long",
            Tag::Float(_) => "float",
            Tag::Double(_) => "double",
            Tag::String(_) => "string",
            Tag::ByteArray(_) => "byte array",
            Tag::List(_) => "list",
            Tag::Compound(_) => "compound",
        }
    }

    /// Reads any numeric variant as `f32`.
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Tag::Byte(v) => Some(v as f32),
            Tag::Short(v) => Some(v as f32),
            Tag::Int(v) => Some(v as f32),
            Tag::Long(v) => Some(v as f32),
            Tag::Float(v) => Some(v),
            Tag::Double(v) => Some(v as f32),
            _ => None,
        }
    }

    /// Reads any integer variant as `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Tag::Byte(v) => Some(v as i64),
            Tag::Short(v) => Some(v as i64),
            Tag::Int(v) => Some(v as i64),
            Tag::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Tag::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundTag> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Reads a three-element numeric list as a vector.
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self.as_list()? {
            [x, y, z] => Some(Vec3::new(x.as_f32()?, y.as_f32()?, z.as_f32()?)),
            _ => None,
        }
    }
}

//--- Conversions ---------------------------------------------------------

impl From<i8> for Tag {
    fn from(v: i8) -> Self {
        Tag::Byte(v)
    }
}

impl From<bool> for Tag {
    fn from(v: bool) -> Self {
        Tag::Byte(v as i8)
    }
}

impl From<i16> for Tag {
    fn from(v: i16) -> Self {
        Tag::Short(v)
    }
}

impl From<i32> for Tag {
    fn from(v: i32) -> Self {
        Tag::Int(v)
    }
}

impl From<i64> for Tag {
    fn from(v: i64) -> Self {
        Tag::Long(v)
    }
}

impl From<u64> for Tag {
    fn from(v: u64) -> Self {
        Tag::Long(v as i64)
    }
}

impl From<f32> for Tag {
    fn from(v: f32) -> Self {
        Tag::Float(v)
    }
}

impl From<f64> for Tag {
    fn from(v: f64) -> Self {
        Tag::Double(v)
    }
}

impl From<String> for Tag {
    fn from(v: String) -> Self {
        Tag::String(v)
    }
}

impl From<&str> for Tag {
    fn from(v: &str) -> Self {
        Tag::String(v.to_owned())
    }
}

impl From<Vec<Tag>> for Tag {
    fn from(v: Vec<Tag>) -> Self {
        Tag::List(v)
    }
}

impl From<CompoundTag> for Tag {
    fn from(v: CompoundTag) -> Self {
        Tag::Compound(v)
    }
}

impl From<Vec3> for Tag {
    fn from(v: Vec3) -> Self {
        Tag::List(vec![Tag::Float(v.x), Tag::Float(v.y), Tag::Float(v.z)])
    }
}

//=== TagError ============================================================

/// Failure to read an expected value out of a compound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The key is absent.
    MissingKey(String),

    /// The key exists but holds a different type.
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "Missing tag key '{}'", key),
            Self::TypeMismatch { key, expected, found } => {
                write!(f, "Tag '{}' is a {}, expected {}", key, found, expected)
            }
        }
    }
}

impl std::error::Error for TagError {}

//=== CompoundTag =========================================================

/// String-keyed map of tags; the root of every saved display state.
///
/// Keys are kept ordered so two saves of the same state compare equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundTag {
    entries: BTreeMap<String, Tag>,
}

impl CompoundTag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous one under that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Tag>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    //--- Typed Getters ----------------------------------------------------

    pub fn get_f32(&self, key: &str) -> Result<f32, TagError> {
        self.typed(key, "number", Tag::as_f32)
    }

    pub fn get_i64(&self, key: &str) -> Result<i64, TagError> {
        self.typed(key, "integer", Tag::as_i64)
    }

    pub fn get_str(&self, key: &str) -> Result<&str, TagError> {
        self.typed(key, "string", Tag::as_str)
    }

    pub fn get_list(&self, key: &str) -> Result<&[Tag], TagError> {
        self.typed(key, "list", Tag::as_list)
    }

    pub fn get_compound(&self, key: &str) -> Result<&CompoundTag, TagError> {
        self.typed(key, "compound", Tag::as_compound)
    }

    pub fn get_vec3(&self, key: &str) -> Result<Vec3, TagError> {
        self.typed(key, "vec3 list", Tag::as_vec3)
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        read: impl FnOnce(&'a Tag) -> Option<T>,
    ) -> Result<T, TagError> {
        let tag = self
            .entries
            .get(key)
            .ok_or_else(|| TagError::MissingKey(key.to_owned()))?;

        read(tag).ok_or_else(|| TagError::TypeMismatch {
            key: key.to_owned(),
            expected,
            found: tag.type_name(),
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_read_back_inserted_values() {
        let tag = CompoundTag::new()
            .with("name", "Menu")
            .with("lives", 3i32)
            .with("speed", 2.5f32)
            .with("pos", Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(tag.get_str("name"), Ok("Menu"));
        assert_eq!(tag.get_i64("lives"), Ok(3));
        assert_eq!(tag.get_f32("speed"), Ok(2.5));
        assert_eq!(tag.get_vec3("pos"), Ok(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn numeric_getter_widens_integers() {
        let tag = CompoundTag::new().with("n", 7i16);
        assert_eq!(tag.get_f32("n"), Ok(7.0));
    }

    #[test]
    fn missing_key_is_reported() {
        let tag = CompoundTag::new();
        assert_eq!(tag.get_str("nope"), Err(TagError::MissingKey("nope".into())));
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let tag = CompoundTag::new().with("name", 1i32);
        let err = tag.get_str("name").unwrap_err();
        assert_eq!(
            err,
            TagError::TypeMismatch { key: "name".into(), expected: "string", found: "int" }
        );
        assert!(err.to_string().contains("expected string"));
    }

    #[test]
    fn vec3_requires_exactly_three_numbers() {
        let short = Tag::List(vec![Tag::Float(1.0), Tag::Float(2.0)]);
        assert_eq!(short.as_vec3(), None);

        let mixed = Tag::List(vec![Tag::Float(1.0), Tag::from("x"), Tag::Float(2.0)]);
        assert_eq!(mixed.as_vec3(), None);
    }

    #[test]
    fn nested_compound_survives_json() {
        let inner = CompoundTag::new().with("hp", 10i32);
        let root = CompoundTag::new()
            .with("player", inner)
            .with("flags", Tag::ByteArray(vec![1, 0, 1]));

        let json = serde_json::to_string(&root).unwrap();
        let back: CompoundTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
        assert_eq!(back.get_compound("player").unwrap().get_i64("hp"), Ok(10));
    }
}
