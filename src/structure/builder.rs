//! Type graph construction from JSON values

use super::types::{
    dedup, ArrayShape, Field, ObjectShape, Primitive, TypeDescription, TypeId, TypePool, TypeRef,
    TypeStructure,
};
use crate::config::InferOptions;
use crate::error::{Error, Result};
use crate::naming::camel_case;
use crate::types::{JsonObject, JsonValue};
use tracing::{debug, trace};

/// Builds a deduplicated type graph from JSON values
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    pool: TypePool,
    /// Convert keys to camel case
    normalize_key_casing: bool,
    /// Type RFC 3339 strings as `Date`
    detect_dates: bool,
    /// Maximum nesting depth
    max_depth: usize,
}

impl Default for TypeBuilder {
    fn default() -> Self {
        Self::new(&InferOptions::default())
    }
}

impl TypeBuilder {
    /// Create a builder with an empty pool
    pub fn new(options: &InferOptions) -> Self {
        Self::with_pool(TypePool::new(), options)
    }

    /// Create a builder that extends an existing pool
    pub fn with_pool(pool: TypePool, options: &InferOptions) -> Self {
        Self {
            pool,
            normalize_key_casing: options.normalize_key_casing,
            detect_dates: options.detect_dates,
            max_depth: options.max_depth,
        }
    }

    /// Infer the type of `value` and return the finished structure
    pub fn build(mut self, value: &JsonValue) -> Result<TypeStructure> {
        let root = self.infer(value)?;
        debug!(root = %root, types = self.pool.len(), "built type graph");
        Ok(TypeStructure {
            root,
            pool: self.pool,
        })
    }

    /// Infer the type reference of `value`, registering composite types in the pool
    pub fn infer(&mut self, value: &JsonValue) -> Result<TypeRef> {
        self.infer_value(value, 0)
    }

    fn infer_value(&mut self, value: &JsonValue, depth: usize) -> Result<TypeRef> {
        if depth > self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        match value {
            JsonValue::Null => Ok(Primitive::Null.into()),
            JsonValue::Bool(_) => Ok(Primitive::Boolean.into()),
            JsonValue::Number(_) => Ok(Primitive::Number.into()),
            JsonValue::String(s) => Ok(self.infer_string(s).into()),
            JsonValue::Array(items) => self.infer_array(items, depth),
            JsonValue::Object(map) => self.infer_object(map, depth),
        }
    }

    fn infer_string(&self, s: &str) -> Primitive {
        if self.detect_dates && is_datetime(s) {
            Primitive::Date
        } else {
            Primitive::String
        }
    }

    fn infer_object(&mut self, map: &JsonObject, depth: usize) -> Result<TypeRef> {
        let mut shape = ObjectShape::new();

        for (key, val) in map {
            let ty = self.infer_value(val, depth + 1)?;
            let key = if self.normalize_key_casing {
                camel_case(key)
            } else {
                key.clone()
            };
            shape.insert(key, Field::required(ty));
        }

        Ok(self.pool.intern(TypeDescription::Object(shape)).into())
    }

    fn infer_array(&mut self, items: &[JsonValue], depth: usize) -> Result<TypeRef> {
        let mut refs = Vec::with_capacity(items.len());
        for item in items {
            refs.push(self.infer_value(item, depth + 1)?);
        }

        let inner = self.merge(dedup(refs));
        Ok(self.intern_array(ArrayShape::array_of(inner)))
    }

    // ========================================================================
    // Merging
    // ========================================================================

    /// Resolve the single type representing all of `refs`
    ///
    /// `refs` must already be deduplicated.
    pub fn merge(&mut self, refs: Vec<TypeRef>) -> TypeRef {
        match refs.len() {
            0 => self.intern_array(ArrayShape::union([])),
            1 => refs[0],
            _ => {
                let kinds = MergeKinds::classify(&refs, &self.pool);
                trace!(count = refs.len(), ?kinds, "merging types");

                let total = refs.len();
                if kinds.objects.len() == total {
                    self.merge_objects(&kinds.objects)
                } else if kinds.arrays.len() == total {
                    self.merge_arrays(&kinds.arrays)
                } else if kinds.has_null && kinds.arrays.len() + 1 == total {
                    let merged = self.merge_arrays(&kinds.arrays);
                    self.merge_union(&[merged, TypeRef::NULL])
                } else if kinds.has_null && kinds.objects.len() + 1 == total {
                    let merged = self.merge_objects(&kinds.objects);
                    self.merge_union(&[merged, TypeRef::NULL])
                } else {
                    self.merge_union(&refs)
                }
            }
        }
    }

    /// Merge object shapes into one, marking keys missing anywhere as optional
    fn merge_objects(&mut self, ids: &[TypeId]) -> TypeRef {
        let shapes: Vec<ObjectShape> = ids
            .iter()
            .filter_map(|id| self.pool.get(*id).and_then(TypeDescription::as_object))
            .cloned()
            .collect();

        let mut keys: Vec<&str> = Vec::new();
        for shape in &shapes {
            for key in shape.fields.keys() {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }

        let mut merged = ObjectShape::new();
        for key in keys {
            let present: Vec<&Field> = shapes.iter().filter_map(|s| s.get(key)).collect();
            let optional = present.len() < shapes.len() || present.iter().any(|f| f.optional);
            let types = dedup(present.iter().map(|f| f.ty));
            let ty = if types.len() == 1 {
                types[0]
            } else {
                self.merge(types)
            };
            merged.insert(key, Field { ty, optional });
        }

        self.pool.intern(TypeDescription::Object(merged)).into()
    }

    /// Merge array shapes into an array of the merged element types
    fn merge_arrays(&mut self, ids: &[TypeId]) -> TypeRef {
        let elements = dedup(
            ids.iter()
                .filter_map(|id| self.pool.get(*id).and_then(TypeDescription::as_array))
                .flat_map(|shape| shape.members.clone())
                .collect::<Vec<_>>(),
        );

        let inner = self.merge(elements);
        self.intern_array(ArrayShape::array_of(inner))
    }

    /// Union of `refs`, flattening members that are unions themselves
    fn merge_union(&mut self, refs: &[TypeRef]) -> TypeRef {
        let mut nested = Vec::new();
        let mut plain = Vec::new();

        for r in refs {
            match self.pool.resolve(*r) {
                Some(TypeDescription::Array(shape)) if shape.is_union => {
                    nested.extend(shape.members.iter().copied());
                }
                _ => plain.push(*r),
            }
        }

        nested.extend(plain);
        self.intern_array(ArrayShape::union(nested))
    }

    fn intern_array(&mut self, shape: ArrayShape) -> TypeRef {
        self.pool.intern(TypeDescription::Array(shape)).into()
    }
}

/// Classification of a reference set for merging
#[derive(Debug, Default)]
struct MergeKinds {
    objects: Vec<TypeId>,
    /// Plain arrays only; unions are merged as unions
    arrays: Vec<TypeId>,
    has_null: bool,
}

impl MergeKinds {
    fn classify(refs: &[TypeRef], pool: &TypePool) -> Self {
        let mut kinds = Self::default();
        for r in refs {
            match r {
                TypeRef::Primitive(Primitive::Null) => kinds.has_null = true,
                TypeRef::Primitive(_) => {}
                TypeRef::Id(id) => match pool.get(*id) {
                    Some(TypeDescription::Object(_)) => kinds.objects.push(*id),
                    Some(TypeDescription::Array(shape)) if !shape.is_union => {
                        kinds.arrays.push(*id);
                    }
                    _ => {}
                },
            }
        }
        kinds
    }
}

/// Infer a type structure for `value`, extending `pool`
pub fn infer_structure(
    value: &JsonValue,
    pool: TypePool,
    options: &InferOptions,
) -> Result<TypeStructure> {
    TypeBuilder::with_pool(pool, options).build(value)
}

fn is_datetime(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
}
