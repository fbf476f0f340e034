//! Naming module
//!
//! Assigns unique, identifier-safe names to the composite types of a type graph.
//!
//! Objects are named after the key they were found under (singularized when
//! found inside an array) and disambiguated with a numeric suffix. Arrays and
//! unions are "named" by their readable type string, e.g. `Pet[]` or
//! `string | number`.

mod inflect;
mod namer;

pub use inflect::{
    camel_case, capitalize, deburr, is_valid_key, normalize_type_name, pascal_case, singularize,
    split_words, unique_by_increment, MAX_NAME_ATTEMPTS,
};
pub use namer::{assign_names, NameEntry, NameTable};
