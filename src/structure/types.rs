//! Type graph types

use indexmap::IndexMap;
use rustc_hash::FxHasher;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// References
// ============================================================================

/// Identifier of a pool entry, derived from a hash of its canonical shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u64);

impl TypeId {
    /// Create an id from a raw value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Next slot, used when two distinct shapes share a fingerprint
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl Serialize for TypeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Leaf types, never stored in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
    Date,
}

impl Primitive {
    /// Literal tag used in declarations
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
            Primitive::Date => "Date",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a type: either a primitive tag or a pool entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(Primitive),
    Id(TypeId),
}

impl TypeRef {
    /// The `null` tag
    pub const NULL: TypeRef = TypeRef::Primitive(Primitive::Null);

    /// Pool id, if this references a pool entry
    pub fn id(self) -> Option<TypeId> {
        match self {
            TypeRef::Id(id) => Some(id),
            TypeRef::Primitive(_) => None,
        }
    }

    /// Check if this is the `null` tag
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

impl From<Primitive> for TypeRef {
    fn from(primitive: Primitive) -> Self {
        TypeRef::Primitive(primitive)
    }
}

impl From<TypeId> for TypeRef {
    fn from(id: TypeId) -> Self {
        TypeRef::Id(id)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => p.fmt(f),
            TypeRef::Id(id) => id.fmt(f),
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Descriptions
// ============================================================================

/// A single object field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field type
    #[serde(rename = "type")]
    pub ty: TypeRef,

    /// Absent in at least one merged occurrence
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl Field {
    /// Create a mandatory field
    pub fn required(ty: TypeRef) -> Self {
        Self {
            ty,
            optional: false,
        }
    }

    /// Create an optional field
    pub fn optional(ty: TypeRef) -> Self {
        Self { ty, optional: true }
    }
}

/// Object shape: field key to field, in first-seen key order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectShape {
    pub fields: IndexMap<String, Field>,
}

impl ObjectShape {
    /// Create an empty object shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, keeping the position of an existing key
    pub fn insert(&mut self, key: impl Into<String>, field: Field) {
        self.fields.insert(key.into(), field);
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the shape has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for ObjectShape {
    // Key order is irrelevant; IndexMap equality compares as maps
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for ObjectShape {}

impl FromIterator<(String, Field)> for ObjectShape {
    fn from_iter<I: IntoIterator<Item = (String, Field)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Array or union shape
///
/// An array of `T` has exactly one member and `is_union == false`.
/// A union has deduplicated members and `is_union == true`.
#[derive(Debug, Clone, Serialize)]
pub struct ArrayShape {
    pub members: Vec<TypeRef>,
    pub is_union: bool,
}

impl ArrayShape {
    /// Array whose elements are all of `inner`
    pub fn array_of(inner: TypeRef) -> Self {
        Self {
            members: vec![inner],
            is_union: false,
        }
    }

    /// Union of alternatives, deduplicated in first-seen order
    pub fn union(members: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            members: dedup(members),
            is_union: true,
        }
    }

    /// Inner element type of a plain array
    pub fn element(&self) -> Option<TypeRef> {
        match (self.is_union, self.members.as_slice()) {
            (false, [inner]) => Some(*inner),
            _ => None,
        }
    }

    /// Check if this is a union with more than one alternative
    pub fn is_multi_union(&self) -> bool {
        self.is_union && self.members.len() > 1
    }
}

impl PartialEq for ArrayShape {
    // Members compare as sets
    fn eq(&self, other: &Self) -> bool {
        self.is_union == other.is_union
            && self.members.len() == other.members.len()
            && self.members.iter().all(|m| other.members.contains(m))
    }
}

impl Eq for ArrayShape {}

/// A pool entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDescription {
    Object(ObjectShape),
    Array(ArrayShape),
}

impl TypeDescription {
    /// Object shape, if this is an object
    pub fn as_object(&self) -> Option<&ObjectShape> {
        match self {
            TypeDescription::Object(shape) => Some(shape),
            TypeDescription::Array(_) => None,
        }
    }

    /// Array/union shape, if this is one
    pub fn as_array(&self) -> Option<&ArrayShape> {
        match self {
            TypeDescription::Array(shape) => Some(shape),
            TypeDescription::Object(_) => None,
        }
    }

    /// Check if this is a union
    pub fn is_union(&self) -> bool {
        matches!(self, TypeDescription::Array(shape) if shape.is_union)
    }

    /// References held by this description
    pub fn children(&self) -> Vec<TypeRef> {
        match self {
            TypeDescription::Object(shape) => shape.fields.values().map(|f| f.ty).collect(),
            TypeDescription::Array(shape) => shape.members.clone(),
        }
    }

    /// Order-independent canonical serialization of the defining fields
    pub fn canonical(&self) -> String {
        let encoded = match self {
            TypeDescription::Object(shape) => {
                let mut entries: Vec<(&str, String, bool)> = shape
                    .fields
                    .iter()
                    .map(|(key, field)| (key.as_str(), field.ty.to_string(), field.optional))
                    .collect();
                entries.sort();
                serde_json::to_string(&("object", entries))
            }
            TypeDescription::Array(shape) => {
                let mut members: Vec<String> =
                    shape.members.iter().map(ToString::to_string).collect();
                members.sort();
                let kind = if shape.is_union { "union" } else { "array" };
                serde_json::to_string(&(kind, members))
            }
        };
        // String keys and scalar leaves only, so encoding cannot fail
        encoded.unwrap_or_default()
    }

    /// Stable content hash of the canonical serialization
    pub fn fingerprint(&self) -> TypeId {
        let mut hasher = FxHasher::default();
        self.canonical().hash(&mut hasher);
        TypeId(hasher.finish())
    }
}

// ============================================================================
// Pool
// ============================================================================

/// Deduplicated pool of type descriptions
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TypePool {
    entries: IndexMap<TypeId, TypeDescription>,
}

impl TypePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry
    pub fn get(&self, id: TypeId) -> Option<&TypeDescription> {
        self.entries.get(&id)
    }

    /// Look up the description behind a reference
    pub fn resolve(&self, ty: TypeRef) -> Option<&TypeDescription> {
        ty.id().and_then(|id| self.get(id))
    }

    /// Check if an id is present
    pub fn contains(&self, id: TypeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Find the id of a structurally equal entry
    pub fn find(&self, desc: &TypeDescription) -> Option<TypeId> {
        let mut id = desc.fingerprint();
        while let Some(existing) = self.entries.get(&id) {
            if existing == desc {
                return Some(id);
            }
            id = id.next();
        }
        None
    }

    /// Return the id of a structurally equal entry, inserting `desc` if none exists
    pub fn intern(&mut self, desc: TypeDescription) -> TypeId {
        let mut id = desc.fingerprint();
        while let Some(existing) = self.entries.get(&id) {
            if *existing == desc {
                return id;
            }
            id = id.next();
        }
        self.entries.insert(id, desc);
        id
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDescription)> {
        self.entries.iter().map(|(id, desc)| (*id, desc))
    }

    /// Keep only entries for which `keep` returns true
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(TypeId) -> bool) {
        self.entries.retain(|id, _| keep(*id));
    }
}

/// Root reference plus the pool it points into
#[derive(Debug, Clone, Serialize)]
pub struct TypeStructure {
    pub root: TypeRef,
    pub pool: TypePool,
}

impl TypeStructure {
    /// Look up the description behind a reference
    pub fn resolve(&self, ty: TypeRef) -> Option<&TypeDescription> {
        self.pool.resolve(ty)
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Deduplicate references, keeping first-seen order
pub(crate) fn dedup(refs: impl IntoIterator<Item = TypeRef>) -> Vec<TypeRef> {
    let mut out: Vec<TypeRef> = Vec::new();
    for r in refs {
        if !out.contains(&r) {
            out.push(r);
        }
    }
    out
}
