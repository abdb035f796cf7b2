//! `Variant` and `PropertyMap`: lossless copy and traversal semantics.

use rastersail::{PropertyMap, Variant};

#[test]
fn variant_copy_is_independent_of_the_source() {
    // P12: copying a variant (Clone) and comparing equal; mutating a copy
    // of the source doesn't affect the original since `String`/`Vec<u8>`
    // variants own their bytes outright.
    let original = Variant::from("x264-profile");
    let mut copy = original.clone();
    assert_eq!(original, copy);
    copy = Variant::from("changed");
    assert_ne!(original, copy);
}

#[test]
fn variant_numeric_coercions_widen_without_loss() {
    assert_eq!(Variant::from(42u8).as_i64(), Some(42));
    assert_eq!(Variant::from(-7i16).as_i64(), Some(-7));
    assert_eq!(Variant::from(9000u32).as_i64(), Some(9000));
    assert_eq!(Variant::from(42u8).as_u64(), Some(42));
    assert_eq!(Variant::from(1.5f32).as_f64(), Some(1.5));
    assert_eq!(Variant::from(true).as_bool(), Some(true));
}

#[test]
fn variant_getter_mismatch_returns_none_not_a_panic() {
    let v = Variant::from("not a number");
    assert_eq!(v.as_i64(), None);
    assert_eq!(v.as_bool(), None);
    assert_eq!(v.as_f64(), None);
}

#[test]
fn variant_string_and_data_round_trip() {
    let s = Variant::from("hello");
    assert_eq!(s.as_str(), Some("hello"));

    let data = Variant::from(alloc_vec(&[1, 2, 3]));
    assert_eq!(data.as_bytes(), Some(&[1u8, 2, 3][..]));
}

fn alloc_vec(bytes: &[u8]) -> Vec<u8> {
    bytes.to_vec()
}

#[test]
fn property_map_traversal_visits_each_key_once() {
    // P11: traverse visits every inserted key exactly once.
    let mut map: PropertyMap = PropertyMap::new();
    map.insert("a".into(), Variant::from(1i32));
    map.insert("b".into(), Variant::from(2i32));
    map.insert("c".into(), Variant::from(3i32));

    let mut seen: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
    seen.sort();
    assert_eq!(seen, ["a", "b", "c"]);
    assert_eq!(map.len(), 3);
}

#[test]
fn property_map_erase_then_has_key_is_false() {
    let mut map: PropertyMap = PropertyMap::new();
    map.insert("knob".into(), Variant::from(true));
    assert!(map.contains_key("knob"));
    map.remove("knob");
    assert!(!map.contains_key("knob"));
}

#[test]
fn property_map_copy_is_structurally_equal_and_independent() {
    let mut original: PropertyMap = PropertyMap::new();
    original.insert("knob".into(), Variant::from(7i32));
    let mut copy = original.clone();
    assert_eq!(original, copy);

    copy.insert("knob".into(), Variant::from(8i32));
    assert_ne!(original, copy);
    assert_eq!(original.get("knob"), Some(&Variant::from(7i32)));
}
