//! Interface descriptions and their textual form

use crate::error::{Error, Result};
use crate::naming::{is_valid_key, NameTable};
use crate::structure::{Field, TypeDescription, TypeRef, TypeStructure};
use std::fmt;

/// A resolved interface: name plus display key → display type pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescription {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

impl InterfaceDescription {
    /// Render as an interface declaration
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InterfaceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "interface {} {{", self.name)?;
        for (key, ty) in &self.fields {
            writeln!(f, "  {key}: {ty};")?;
        }
        write!(f, "}}")
    }
}

/// Build an interface description for every named object type, in table order
pub fn describe_interfaces(
    structure: &TypeStructure,
    names: &NameTable,
) -> Result<Vec<InterfaceDescription>> {
    let mut interfaces = Vec::new();

    for entry in names.iter() {
        let desc = structure
            .pool
            .get(entry.id)
            .ok_or_else(|| Error::unresolved(entry.id))?;

        let TypeDescription::Object(shape) = desc else {
            continue;
        };

        let fields = shape
            .fields
            .iter()
            .map(|(key, field)| resolve_field(structure, names, key, field))
            .collect::<Result<Vec<_>>>()?;

        interfaces.push(InterfaceDescription {
            name: entry.name.clone(),
            fields,
        });
    }

    Ok(interfaces)
}

/// Resolve one field into its display key and display type
fn resolve_field(
    structure: &TypeStructure,
    names: &NameTable,
    key: &str,
    field: &Field,
) -> Result<(String, String)> {
    let (ty, demoted) = display_type(structure, names, field.ty)?;

    let mut display_key = if is_valid_key(key) {
        key.to_string()
    } else {
        quote_key(key)
    };
    if field.optional || demoted {
        display_key.push('?');
    }

    Ok((display_key, ty))
}

/// Display string for a field type, and whether `null` was folded into optionality
fn display_type(
    structure: &TypeStructure,
    names: &NameTable,
    ty: TypeRef,
) -> Result<(String, bool)> {
    if ty.is_null() {
        return Ok(("any".to_string(), true));
    }

    if let Some(TypeDescription::Array(shape)) = structure.resolve(ty) {
        if shape.is_multi_union() && shape.members.contains(&TypeRef::NULL) {
            let rest = shape
                .members
                .iter()
                .filter(|member| !member.is_null())
                .map(|member| names.display(*member))
                .collect::<Result<Vec<_>>>()?;
            return Ok((rest.join(" | "), true));
        }
    }

    let display = names.display(ty)?;
    if display == "null" {
        return Ok(("any".to_string(), true));
    }
    Ok((display, false))
}

fn quote_key(key: &str) -> String {
    let escaped = key.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Render every named object type as an interface declaration
pub fn render(structure: &TypeStructure, names: &NameTable) -> Result<Vec<String>> {
    Ok(describe_interfaces(structure, names)?
        .iter()
        .map(InterfaceDescription::render)
        .collect())
}
