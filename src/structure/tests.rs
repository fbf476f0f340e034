//! Type graph tests

use super::*;
use crate::config::InferOptions;
use crate::error::Error;
use serde_json::{json, Value};

fn build(value: &Value) -> TypeStructure {
    infer_structure(value, TypePool::new(), &InferOptions::default()).unwrap()
}

fn object(structure: &TypeStructure, ty: TypeRef) -> &ObjectShape {
    structure
        .resolve(ty)
        .and_then(TypeDescription::as_object)
        .expect("object type")
}

fn array(structure: &TypeStructure, ty: TypeRef) -> &ArrayShape {
    structure
        .resolve(ty)
        .and_then(TypeDescription::as_array)
        .expect("array type")
}

fn field(structure: &TypeStructure, ty: TypeRef, key: &str) -> Field {
    *object(structure, ty).get(key).expect("field present")
}

const STRING: TypeRef = TypeRef::Primitive(Primitive::String);
const NUMBER: TypeRef = TypeRef::Primitive(Primitive::Number);
const BOOLEAN: TypeRef = TypeRef::Primitive(Primitive::Boolean);

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_primitives_are_not_pooled() {
    let structure = build(&json!(42));
    assert_eq!(structure.root, NUMBER);
    assert!(structure.pool.is_empty());

    assert_eq!(build(&json!("x")).root, STRING);
    assert_eq!(build(&json!(true)).root, BOOLEAN);
    assert_eq!(build(&json!(null)).root, TypeRef::NULL);
}

#[test]
fn test_simple_object() {
    let structure = build(&json!({"name": "John", "age": 30, "active": true}));

    let shape = object(&structure, structure.root);
    assert_eq!(shape.len(), 3);
    assert_eq!(field(&structure, structure.root, "name"), Field::required(STRING));
    assert_eq!(field(&structure, structure.root, "age"), Field::required(NUMBER));
    assert_eq!(
        field(&structure, structure.root, "active"),
        Field::required(BOOLEAN)
    );

    let keys: Vec<&str> = shape.fields.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "age", "active"]);
}

#[test]
fn test_empty_object() {
    let structure = build(&json!({}));
    assert!(object(&structure, structure.root).is_empty());
    assert_eq!(structure.pool.len(), 1);
}

#[test]
fn test_date_detection() {
    let value = json!({"created": "2024-01-15T10:30:00Z", "day": "2024-01-15"});

    let plain = build(&value);
    assert_eq!(field(&plain, plain.root, "created").ty, STRING);

    let options = InferOptions::new().with_date_detection(true);
    let dated = infer_structure(&value, TypePool::new(), &options).unwrap();
    assert_eq!(
        field(&dated, dated.root, "created").ty,
        TypeRef::Primitive(Primitive::Date)
    );
    assert_eq!(field(&dated, dated.root, "day").ty, STRING);
}

#[test]
fn test_key_casing() {
    let value = json!({"first_name": "a", "Last-Name": "b", "userID": 1});
    let options = InferOptions::new().with_key_casing(true);
    let structure = infer_structure(&value, TypePool::new(), &options).unwrap();

    let keys: Vec<&str> = object(&structure, structure.root)
        .fields
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["firstName", "lastName", "userId"]);
}

#[test]
fn test_key_casing_collision_keeps_later_type() {
    let value = json!({"user_id": 1, "userId": "x"});
    let options = InferOptions::new().with_key_casing(true);
    let structure = infer_structure(&value, TypePool::new(), &options).unwrap();

    let shape = object(&structure, structure.root);
    assert_eq!(shape.len(), 1);
    assert_eq!(shape.get("userId").unwrap().ty, STRING);
}

// ============================================================================
// Deduplication
// ============================================================================

#[test]
fn test_identical_shapes_share_id() {
    let structure = build(&json!({
        "home": {"street": "a", "zip": 1},
        "work": {"zip": 2, "street": "b"}
    }));

    let home = field(&structure, structure.root, "home").ty;
    let work = field(&structure, structure.root, "work").ty;
    assert_eq!(home, work);
    // root + one address shape
    assert_eq!(structure.pool.len(), 2);
}

#[test]
fn test_intern_is_structural() {
    let mut pool = TypePool::new();
    let a: ObjectShape = [
        ("x".to_string(), Field::required(NUMBER)),
        ("y".to_string(), Field::optional(STRING)),
    ]
    .into_iter()
    .collect();
    let b: ObjectShape = [
        ("y".to_string(), Field::optional(STRING)),
        ("x".to_string(), Field::required(NUMBER)),
    ]
    .into_iter()
    .collect();
    let c: ObjectShape = [
        ("y".to_string(), Field::required(STRING)),
        ("x".to_string(), Field::required(NUMBER)),
    ]
    .into_iter()
    .collect();

    let id_a = pool.intern(TypeDescription::Object(a));
    let id_b = pool.intern(TypeDescription::Object(b));
    let id_c = pool.intern(TypeDescription::Object(c.clone()));

    assert_eq!(id_a, id_b);
    assert_eq!(pool.find(&TypeDescription::Object(c)), Some(id_c));
    assert_eq!(pool.find(&TypeDescription::Object(ObjectShape::new())), None);
    assert_ne!(id_a, id_c);
    assert_eq!(pool.len(), 2);
}

#[test]
fn test_union_member_order_irrelevant() {
    let mut pool = TypePool::new();
    let first = pool.intern(TypeDescription::Array(ArrayShape::union([NUMBER, STRING])));
    let second = pool.intern(TypeDescription::Array(ArrayShape::union([STRING, NUMBER])));
    let array = pool.intern(TypeDescription::Array(ArrayShape::array_of(NUMBER)));
    let union = pool.intern(TypeDescription::Array(ArrayShape::union([NUMBER])));

    assert_eq!(first, second);
    assert_ne!(array, union);
    assert_eq!(pool.len(), 3);
}

#[test]
fn test_fingerprint_is_stable() {
    let shape: ObjectShape = [("a".to_string(), Field::required(NUMBER))]
        .into_iter()
        .collect();
    let desc = TypeDescription::Object(shape);
    assert_eq!(desc.fingerprint(), desc.clone().fingerprint());
    assert_eq!(desc.canonical(), r#"["object",[["a","number",false]]]"#);
}

#[test]
fn test_existing_pool_is_reused() {
    let options = InferOptions::default();
    let first = infer_structure(&json!({"a": 1}), TypePool::new(), &options).unwrap();
    let second = infer_structure(&json!({"a": 2}), first.pool.clone(), &options).unwrap();

    assert_eq!(first.root, second.root);
    assert_eq!(second.pool.len(), first.pool.len());
}

// ============================================================================
// Arrays and merging
// ============================================================================

#[test]
fn test_empty_array_is_empty_union() {
    let structure = build(&json!([]));
    let outer = array(&structure, structure.root);
    assert!(!outer.is_union);

    let inner = array(&structure, outer.element().unwrap());
    assert!(inner.is_union);
    assert!(inner.members.is_empty());
}

#[test]
fn test_homogeneous_array() {
    let structure = build(&json!([1, 2, 3]));
    assert_eq!(array(&structure, structure.root).element(), Some(NUMBER));
}

#[test]
fn test_merge_objects_with_conflicting_types() {
    let structure = build(&json!([{"a": 1}, {"a": "x"}]));
    let element = array(&structure, structure.root).element().unwrap();

    let a = field(&structure, element, "a");
    assert!(!a.optional);
    let union = array(&structure, a.ty);
    assert!(union.is_union);
    assert_eq!(union.members, vec![NUMBER, STRING]);
}

#[test]
fn test_merge_objects_disjoint_keys() {
    let structure = build(&json!([{"a": 1}, {"b": 2}]));
    let element = array(&structure, structure.root).element().unwrap();

    assert_eq!(field(&structure, element, "a"), Field::optional(NUMBER));
    assert_eq!(field(&structure, element, "b"), Field::optional(NUMBER));
}

#[test]
fn test_merge_objects_partial_keys() {
    let structure = build(&json!([{"a": 1, "b": 2}, {"a": 1}]));
    let element = array(&structure, structure.root).element().unwrap();

    assert_eq!(field(&structure, element, "a"), Field::required(NUMBER));
    assert_eq!(field(&structure, element, "b"), Field::optional(NUMBER));
}

#[test]
fn test_merge_objects_keeps_first_seen_key_order() {
    let structure = build(&json!([{"b": 1, "a": 1}, {"c": 1, "a": 2}]));
    let element = array(&structure, structure.root).element().unwrap();

    let keys: Vec<&str> = object(&structure, element)
        .fields
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_merge_objects_with_null_field() {
    let structure = build(&json!([{"a": 1}, {"a": null}]));
    let element = array(&structure, structure.root).element().unwrap();

    let a = field(&structure, element, "a");
    let union = array(&structure, a.ty);
    assert!(union.is_union);
    assert_eq!(union.members, vec![NUMBER, TypeRef::NULL]);
}

#[test]
fn test_nested_optional_merging() {
    let structure = build(&json!([
        {"owner": {"name": "a", "age": 3}},
        {"owner": {"name": "b"}}
    ]));
    let element = array(&structure, structure.root).element().unwrap();
    let owner = field(&structure, element, "owner");
    assert!(!owner.optional);

    assert_eq!(field(&structure, owner.ty, "name"), Field::required(STRING));
    assert_eq!(field(&structure, owner.ty, "age"), Field::optional(NUMBER));
}

#[test]
fn test_merge_arrays() {
    let structure = build(&json!([[1, 2], ["a"]]));
    let element = array(&structure, structure.root).element().unwrap();
    let inner = array(&structure, element);
    assert!(!inner.is_union);

    let union = array(&structure, inner.element().unwrap());
    assert!(union.is_union);
    assert_eq!(union.members, vec![NUMBER, STRING]);
}

#[test]
fn test_merge_arrays_of_objects() {
    let structure = build(&json!([[{"a": 1}], [{"b": "x"}]]));
    let element = array(&structure, structure.root).element().unwrap();
    let item = array(&structure, element).element().unwrap();

    assert_eq!(field(&structure, item, "a"), Field::optional(NUMBER));
    assert_eq!(field(&structure, item, "b"), Field::optional(STRING));
}

#[test]
fn test_merge_arrays_with_null() {
    let structure = build(&json!([[1], null, ["a"]]));
    let element = array(&structure, structure.root).element().unwrap();

    let union = array(&structure, element);
    assert!(union.is_union);
    assert_eq!(union.members.len(), 2);
    assert!(union.members.contains(&TypeRef::NULL));

    let merged = union.members.iter().find(|m| !m.is_null()).copied().unwrap();
    let merged = array(&structure, merged);
    assert!(!merged.is_union);
    assert_eq!(
        array(&structure, merged.element().unwrap()).members,
        vec![NUMBER, STRING]
    );
}

#[test]
fn test_merge_objects_with_null() {
    let structure = build(&json!([{"a": 1}, null, {"a": 2, "b": true}]));
    let element = array(&structure, structure.root).element().unwrap();

    let union = array(&structure, element);
    assert!(union.is_union);
    assert_eq!(union.members.len(), 2);
    assert_eq!(union.members[1], TypeRef::NULL);

    let merged = union.members[0];
    assert_eq!(field(&structure, merged, "a"), Field::required(NUMBER));
    assert_eq!(field(&structure, merged, "b"), Field::optional(BOOLEAN));
}

#[test]
fn test_mixed_union() {
    let structure = build(&json!([1, "a", {"x": 1}, null, 2]));
    let element = array(&structure, structure.root).element().unwrap();

    let union = array(&structure, element);
    assert!(union.is_union);
    assert_eq!(union.members.len(), 4);
    assert_eq!(union.members[..2], [NUMBER, STRING]);
    assert_eq!(union.members[3], TypeRef::NULL);
}

#[test]
fn test_union_flattening() {
    let structure = build(&json!([
        [{"a": 1}, {"a": "x"}],
        [{"a": true}]
    ]));
    let element = array(&structure, structure.root).element().unwrap();
    let item = array(&structure, element).element().unwrap();

    let a = field(&structure, item, "a");
    let union = array(&structure, a.ty);
    assert!(union.is_union);
    assert_eq!(union.members, vec![NUMBER, STRING, BOOLEAN]);
}

#[test]
fn test_depth_limit() {
    let value = json!({"a": {"b": {"c": 1}}});

    let options = InferOptions::new().with_max_depth(2);
    let err = infer_structure(&value, TypePool::new(), &options).unwrap_err();
    assert!(matches!(err, Error::DepthLimitExceeded { limit: 2 }));

    let options = InferOptions::new().with_max_depth(3);
    assert!(infer_structure(&value, TypePool::new(), &options).is_ok());
}

// ============================================================================
// Optimization
// ============================================================================

#[test]
fn test_optimize_removes_orphans() {
    let mut structure = build(&json!([{"a": 1}, {"b": 2}]));
    // {a}, {b}, merged, array
    assert_eq!(structure.pool.len(), 4);

    let removed = optimize(&mut structure);
    assert_eq!(removed, 2);
    assert_eq!(structure.pool.len(), 2);

    let element = array(&structure, structure.root).element().unwrap();
    assert!(object(&structure, element).get("a").unwrap().optional);
}

#[test]
fn test_optimize_is_idempotent() {
    let mut structure = build(&json!({
        "items": [{"a": 1}, {"a": "x", "b": [1, "y"]}, null],
        "meta": {"count": 2}
    }));

    optimize(&mut structure);
    let after_first: Vec<TypeId> = structure.pool.iter().map(|(id, _)| id).collect();

    assert_eq!(optimize(&mut structure), 0);
    let after_second: Vec<TypeId> = structure.pool.iter().map(|(id, _)| id).collect();
    assert_eq!(after_first, after_second);
}

#[test]
fn test_reachable_ids_covers_whole_graph() {
    let mut structure = build(&json!({"a": {"b": [{"c": 1}]}}));
    optimize(&mut structure);

    let reachable = reachable_ids(structure.root, &structure.pool);
    assert_eq!(reachable.len(), structure.pool.len());
    for (id, _) in structure.pool.iter() {
        assert!(reachable.contains(&id));
    }
}

#[test]
fn test_structure_serializes() {
    let mut structure = build(&json!({"tags": ["a"]}));
    optimize(&mut structure);

    let json: Value = serde_json::from_str(&structure.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["root"], Value::String(structure.root.to_string()));
    assert_eq!(json["pool"].as_object().unwrap().len(), 2);
}
