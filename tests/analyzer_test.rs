//! パターン検証テスト
//!
//! kataエンジンの静的検証パスの包括的なテストスイート。
//! 重複束縛、未定義ピン参照、選択パターン内の束縛、省略形キーの
//! 形状検査、キー重複を網羅する。

use kata::analyzer::{validate, PatternAnalyzer};
use kata::error::ValidateError;
use kata::matcher::{Matcher, Scope};
use kata::pattern::*;
use kata::value::{ProtocolOverrides, Value};
use test_case::test_case;

/// 空スコープで検証するヘルパー関数
fn check(pattern: &Pattern) -> Result<(), ValidateError> {
    validate(pattern, &Scope::new())
}

fn assert_valid(pattern: &Pattern) {
    assert!(
        check(pattern).is_ok(),
        "{} should validate",
        pattern
    );
}

#[test]
fn test_duplicate_binding_rejected() {
    // `[a, a]` は常に重複束縛
    let result = check(&array([var("a"), var("a")]));
    assert!(matches!(
        result,
        Err(ValidateError::DuplicateBinding { ref name, .. }) if name == "a"
    ));
}

#[test]
fn test_underscore_prefixed_names_exempt() {
    assert_valid(&array([var("_a"), var("_a")]));
    assert_valid(&array([var("_"), var("_"), var("_a"), var("_a")]));
}

#[test]
fn test_duplicate_across_nested_hash() {
    // `[a, {a:}]`：省略形キーも束縛なので同じパス上で衝突する
    let result = check(&array([var("a"), hash([entry_shorthand("a")])]));
    assert!(matches!(
        result,
        Err(ValidateError::DuplicateBinding { ref name, .. }) if name == "a"
    ));
}

#[test]
fn test_duplicate_with_rest_capture() {
    let result = check(&array_rest([var("a")], Some("a"), []));
    assert!(matches!(
        result,
        Err(ValidateError::DuplicateBinding { ref name, .. }) if name == "a"
    ));

    let result = check(&hash_rest(
        [entry_shorthand("a")],
        HashRestKind::Capture("a".to_string()),
    ));
    assert!(matches!(
        result,
        Err(ValidateError::DuplicateBinding { ref name, .. }) if name == "a"
    ));
}

#[test]
fn test_duplicate_with_as_binding() {
    let result = check(&array([var("a"), as_pat(value(0), "a")]));
    assert!(matches!(
        result,
        Err(ValidateError::DuplicateBinding { ref name, .. }) if name == "a"
    ));
}

#[test]
fn test_explicit_key_pattern_is_not_a_binding() {
    // `{a: 0}` のキーは束縛ではない
    assert_valid(&array([var("a"), hash([entry("a", value(0))])]));
}

#[test]
fn test_pin_requires_outer_declaration() {
    let result = check(&pin("a"));
    assert!(matches!(
        result,
        Err(ValidateError::UndefinedPinReference { ref name, .. }) if name == "a"
    ));

    let mut scope = Scope::new();
    scope.insert("a".to_string(), Value::Int(0));
    assert!(validate(&pin("a"), &scope).is_ok());
}

#[test]
fn test_pin_does_not_see_pattern_bindings() {
    // パターン内で先に束縛しても、ピンの解決先にはならない
    let result = check(&array([var("a"), pin("a")]));
    assert!(matches!(
        result,
        Err(ValidateError::UndefinedPinReference { ref name, .. }) if name == "a"
    ));
}

#[test]
fn test_alternative_binding_rejected() {
    // `a | 0` 形式
    let result = check(&alt([var("a"), value(0)]));
    assert!(matches!(
        result,
        Err(ValidateError::IllegalAlternativeBinding { ref name, .. }) if name == "a"
    ));
}

#[test]
fn test_alternative_nested_binding_rejected() {
    // 分岐の深い位置の束縛も拒否される
    let result = check(&alt([value(0), array([hash([entry_shorthand("b")])])]));
    assert!(matches!(
        result,
        Err(ValidateError::IllegalAlternativeBinding { ref name, .. }) if name == "b"
    ));

    let result = check(&alt([value(0), array_rest([], Some("r"), [])]));
    assert!(matches!(
        result,
        Err(ValidateError::IllegalAlternativeBinding { .. })
    ));
}

#[test]
fn test_alternative_underscore_allowed() {
    // `_ | _a` 形式は許される
    assert_valid(&alt([var("_"), var("_a")]));
}

#[test]
fn test_as_binding_wrapping_alternative_allowed() {
    // 選択全体を外から束縛するのは曖昧でない
    assert_valid(&as_pat(alt([value(0), value(1)]), "a"));
}

#[test_case("a?" ; "question_mark")]
#[test_case("a-b" ; "hyphen")]
#[test_case("1a" ; "leading_digit")]
fn test_invalid_implicit_key(key: &str) {
    let result = check(&hash([entry_shorthand(key)]));
    assert!(matches!(
        result,
        Err(ValidateError::InvalidImplicitKey { .. })
    ));
}

#[test_case("a?" ; "question_mark")]
#[test_case("a-b" ; "hyphen")]
fn test_explicit_pattern_lifts_key_restriction(key: &str) {
    // `"a-b": true` のように値パターンを明示すれば許される
    assert_valid(&hash([entry(key, value(true))]));
}

#[test]
fn test_duplicate_key_rejected() {
    let result = check(&hash([entry_shorthand("a"), entry("a", value(0))]));
    assert!(matches!(
        result,
        Err(ValidateError::DuplicateKey { ref key, .. }) if key == "a"
    ));
}

#[test]
fn test_keys_distinct_across_hashes() {
    // 別々のハッシュパターンなら同じキーでよい
    assert_valid(&array([
        hash([entry("a", value(0))]),
        hash([entry("a", value(1))]),
    ]));
}

#[test]
fn test_validation_is_idempotent() {
    let pattern = array([var("a"), var("a")]);
    let mut analyzer = PatternAnalyzer::new(std::iter::empty());
    let first = analyzer.analyze(&pattern);
    let second = analyzer.analyze(&pattern);
    assert_eq!(first, second);

    let pattern = array([var("a"), var("b")]);
    assert!(analyzer.analyze(&pattern).is_ok());
    assert!(analyzer.analyze(&pattern).is_ok());
}

#[test]
fn test_validation_does_not_affect_matching() {
    let pattern = array([var("a"), var("b")]);
    let scope = Scope::new();
    assert!(validate(&pattern, &scope).is_ok());

    let overrides = ProtocolOverrides::new();
    let candidate = Value::Array(vec![Value::Int(0), Value::Int(1)]);
    let result = Matcher::new(&scope, &overrides)
        .try_match(&pattern, &candidate)
        .expect("matching should not error");
    assert!(result.is_some());
}
