//! Name assignment over the type graph

use super::inflect::{normalize_type_name, pascal_case, singularize, unique_by_increment};
use crate::error::{Error, Result};
use crate::structure::{
    ArrayShape, Primitive, TypeDescription, TypeId, TypePool, TypeRef, TypeStructure,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Name assigned to a composite type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub id: TypeId,
    pub name: String,
}

/// Ordered id → name table for one inference run
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    entries: Vec<NameEntry>,
    index: HashMap<TypeId, usize>,
}

impl NameTable {
    fn from_entries(entries: Vec<NameEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.id, i))
            .collect();
        Self { entries, index }
    }

    /// Name assigned to `id`
    pub fn get(&self, id: TypeId) -> Option<&str> {
        self.index
            .get(&id)
            .map(|&i| self.entries[i].name.as_str())
    }

    /// Display form of a reference: the primitive tag or the assigned name
    pub fn display(&self, ty: TypeRef) -> Result<String> {
        match ty {
            TypeRef::Primitive(p) => Ok(p.as_str().to_string()),
            TypeRef::Id(id) => self
                .get(id)
                .map(ToString::to_string)
                .ok_or_else(|| Error::unresolved(id)),
        }
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &NameEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assign a name to every composite type reachable from the root
///
/// Children are named before their parents; the returned table lists
/// entries in the reverse of that discovery order, so the root comes first.
pub fn assign_names(structure: &TypeStructure, root_name: &str) -> Result<NameTable> {
    let mut namer = Namer::new(&structure.pool);
    namer.visit(structure.root, root_name, false)?;

    let mut entries = namer.discovered;
    entries.reverse();
    debug!(names = entries.len(), "assigned type names");
    Ok(NameTable::from_entries(entries))
}

struct Namer<'a> {
    pool: &'a TypePool,
    discovered: Vec<NameEntry>,
    names: HashMap<TypeId, String>,
    /// Names given to object types, plus tags an interface must not shadow
    taken: HashSet<String>,
}

impl<'a> Namer<'a> {
    fn new(pool: &'a TypePool) -> Self {
        let mut taken = HashSet::new();
        let date = TypeRef::from(Primitive::Date);
        if pool.iter().any(|(_, desc)| desc.children().contains(&date)) {
            taken.insert(Primitive::Date.as_str().to_string());
        }

        Self {
            pool,
            discovered: Vec::new(),
            names: HashMap::new(),
            taken,
        }
    }

    fn visit(&mut self, ty: TypeRef, hint: &str, inside_array: bool) -> Result<()> {
        let TypeRef::Id(id) = ty else {
            return Ok(());
        };
        if self.names.contains_key(&id) {
            return Ok(());
        }

        let pool = self.pool;
        match pool.get(id).ok_or_else(|| Error::unresolved(id))? {
            TypeDescription::Array(shape) => {
                for (i, member) in shape.members.iter().enumerate() {
                    // Union branches get distinct hints
                    let member_hint = if i == 0 {
                        hint.to_string()
                    } else {
                        format!("{hint}{}", i + 1)
                    };
                    self.visit(*member, &member_hint, true)?;
                }
                let name = self.array_name(shape)?;
                self.record(id, name);
            }
            TypeDescription::Object(shape) => {
                for (key, field) in &shape.fields {
                    self.visit(field.ty, key, false)?;
                }
                let name = self.object_name(hint, inside_array)?;
                self.taken.insert(name.clone());
                self.record(id, name);
            }
        }

        Ok(())
    }

    fn record(&mut self, id: TypeId, name: String) {
        trace!(%id, %name, "named type");
        self.names.insert(id, name.clone());
        self.discovered.push(NameEntry { id, name });
    }

    fn object_name(&self, hint: &str, inside_array: bool) -> Result<String> {
        let base = if inside_array {
            singularize(hint)
        } else {
            hint.to_string()
        };
        let base = pascal_case(&normalize_type_name(&pascal_case(&base)));

        unique_by_increment(&base, |candidate| self.taken.contains(candidate))
            .ok_or(Error::NameExhausted { name: base })
    }

    /// Readable form of an array or union, built from its members' names
    fn array_name(&self, shape: &ArrayShape) -> Result<String> {
        let inner = self.members_name(&shape.members)?;
        if shape.is_union {
            return Ok(inner);
        }

        let parenthesize = shape
            .element()
            .and_then(|element| self.pool.resolve(element))
            .and_then(TypeDescription::as_array)
            .is_some_and(ArrayShape::is_multi_union);

        Ok(if parenthesize {
            format!("({inner})[]")
        } else {
            format!("{inner}[]")
        })
    }

    fn members_name(&self, members: &[TypeRef]) -> Result<String> {
        if members.is_empty() {
            return Ok("any".to_string());
        }

        let parts = members
            .iter()
            .map(|member| self.readable(*member))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(" | "))
    }

    fn readable(&self, ty: TypeRef) -> Result<String> {
        match ty {
            TypeRef::Primitive(p) => Ok(p.as_str().to_string()),
            TypeRef::Id(id) => self
                .names
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::unresolved(id)),
        }
    }
}
