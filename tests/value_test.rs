//! 値モデルテスト
//!
//! 構造等価・数値の横断比較・同一性比較、クラス参照、inspect表示、
//! ケース等価性の既定動作と上書き表を網羅する。

use kata::value::{
    case_eq, ClassRef, ObjectLike, ProtocolOverrides, RangeValue, RegexpValue, Value,
};
use pretty_assertions::assert_eq;
use std::rc::Rc;
use test_case::test_case;

#[derive(Debug)]
struct Unit;

impl ObjectLike for Unit {
    fn class_name(&self) -> &str {
        "Unit"
    }
}

#[test]
fn test_structural_equality() {
    assert_eq!(
        Value::Array(vec![Value::Int(0), Value::from("a")]),
        Value::Array(vec![Value::Int(0), Value::from("a")])
    );
    assert_ne!(Value::from("a"), Value::symbol("a"));
    assert_eq!(
        Value::hash([("a", Value::Int(0))]),
        Value::hash([("a", Value::Int(0))])
    );
}

#[test]
fn test_numeric_equality_across_variants() {
    assert_eq!(Value::Int(0), Value::Float(0.0));
    assert_eq!(Value::Float(2.0), Value::Int(2));
    assert_ne!(Value::Int(2), Value::Float(2.5));
}

#[test]
fn test_object_equality_is_identity() {
    let a = Rc::new(Unit);
    let left = Value::Object(a.clone());
    let right = Value::Object(a);
    assert_eq!(left, right);

    let other = Value::Object(Rc::new(Unit));
    assert_ne!(left, other);
}

#[test_case(Value::Nil, "nil" ; "nil_value")]
#[test_case(Value::Bool(true), "true" ; "boolean")]
#[test_case(Value::Int(-3), "-3" ; "negative_int")]
#[test_case(Value::from("a\"b"), "\"a\\\"b\"" ; "escaped_string")]
#[test_case(Value::symbol("sym"), ":sym" ; "symbol")]
#[test_case(Value::Array(vec![Value::Int(0), Value::Nil]), "[0, nil]" ; "array")]
#[test_case(Value::hash([("a", Value::Int(0))]), "{a: 0}" ; "hash")]
#[test_case(Value::Class(ClassRef::Integer), "Integer" ; "class_reference")]
fn test_inspect_display(value: Value, expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[test]
fn test_range_display() {
    assert_eq!(
        Value::from(RangeValue::inclusive(0, 5)).to_string(),
        "0..5"
    );
    assert_eq!(
        Value::from(RangeValue::exclusive(0, 5)).to_string(),
        "0...5"
    );
    assert_eq!(
        Value::from(RangeValue::new(Some(Value::Int(0)), None, false)).to_string(),
        "0.."
    );
}

#[test]
fn test_regexp_display_and_equality() {
    let regexp = RegexpValue::new("a+").expect("regexp should compile");
    assert_eq!(Value::from(regexp.clone()).to_string(), "/a+/");
    let other = RegexpValue::new("a+").expect("regexp should compile");
    assert_eq!(Value::from(regexp), Value::from(other));
}

#[test]
fn test_object_inspect() {
    let value = Value::Object(Rc::new(Unit));
    assert_eq!(value.to_string(), "#<Unit>");
}

#[test]
fn test_class_of() {
    assert_eq!(Value::Nil.class_of(), ClassRef::NilClass);
    assert_eq!(Value::Int(0).class_of(), ClassRef::Integer);
    assert_eq!(Value::Float(0.0).class_of(), ClassRef::Float);
    assert_eq!(Value::from("a").class_of(), ClassRef::String);
    assert_eq!(
        Value::Object(Rc::new(Unit)).class_of(),
        ClassRef::User("Unit".to_string())
    );
}

#[test]
fn test_case_eq_class_membership() {
    let overrides = ProtocolOverrides::new();
    let class = Value::Class(ClassRef::Integer);
    assert!(case_eq(&class, &Value::Int(0), &overrides));
    assert!(!case_eq(&class, &Value::Float(0.0), &overrides));

    let user = Value::Class(ClassRef::User("Unit".to_string()));
    assert!(case_eq(&user, &Value::Object(Rc::new(Unit)), &overrides));
}

#[test]
fn test_case_eq_range_membership() {
    let overrides = ProtocolOverrides::new();
    let range = Value::from(RangeValue::inclusive(0, 9));
    assert!(case_eq(&range, &Value::Int(9), &overrides));
    assert!(case_eq(&range, &Value::Float(0.5), &overrides));
    assert!(!case_eq(&range, &Value::Int(10), &overrides));

    let strings = Value::from(RangeValue::inclusive("a", "c"));
    assert!(case_eq(&strings, &Value::from("b"), &overrides));
}

#[test]
fn test_case_eq_regexp_search() {
    let overrides = ProtocolOverrides::new();
    let regexp = Value::from(RegexpValue::new("b").expect("regexp should compile"));
    assert!(case_eq(&regexp, &Value::from("abc"), &overrides));
    assert!(!case_eq(&regexp, &Value::from("xyz"), &overrides));
    assert!(!case_eq(&regexp, &Value::Int(0), &overrides));
}

#[test]
fn test_case_eq_predicate_call() {
    let overrides = ProtocolOverrides::new();
    let zero = Value::predicate(|v| v == &Value::Int(0));
    assert!(case_eq(&zero, &Value::Int(0), &overrides));
    assert!(!case_eq(&zero, &Value::Int(1), &overrides));
}

#[test]
fn test_case_eq_plain_values_fall_back_to_equality() {
    let overrides = ProtocolOverrides::new();
    assert!(case_eq(&Value::from("a"), &Value::from("a"), &overrides));
    assert!(!case_eq(&Value::from("a"), &Value::from("b"), &overrides));
    assert!(case_eq(&Value::Nil, &Value::Nil, &overrides));
}

#[test]
fn test_case_eq_override_keyed_by_referenced_class() {
    // クラス参照の上書きは、参照先のクラスが鍵
    let mut overrides = ProtocolOverrides::new();
    overrides.override_case_eq(ClassRef::User("Even".to_string()), |_, candidate| {
        matches!(candidate, Value::Int(n) if n % 2 == 0)
    });

    let class = Value::Class(ClassRef::User("Even".to_string()));
    assert!(case_eq(&class, &Value::Int(4), &overrides));
    assert!(!case_eq(&class, &Value::Int(3), &overrides));

    // 他のクラス参照には影響しない
    let other = Value::Class(ClassRef::Integer);
    assert!(case_eq(&other, &Value::Int(3), &overrides));
}

#[test]
fn test_case_eq_override_keyed_by_value_class() {
    let mut overrides = ProtocolOverrides::new();
    // 範囲の被覆判定を丸ごと差し替える
    overrides.override_case_eq(ClassRef::Range, |_, _| true);
    let range = Value::from(RangeValue::inclusive(0, 1));
    assert!(case_eq(&range, &Value::Int(100), &overrides));
}
