//! 分解プロトコルの適用
//!
//! 候補値から順序列／マッピングを取り出す。探索順は固定で、
//! 上書き表 → ネイティブ形状 → オブジェクトの能力メソッド。
//! どれにも該当しない場合は `TypeMismatch` を返す。照合失敗
//! （NoMatch）とは異なり、これは呼び出し側まで必ず伝播する。

use super::{ProtocolOverrides, Value};
use crate::error::MatchError;
use crate::pattern::Span;
use indexmap::IndexMap;
use std::borrow::Cow;

/// 順序列への分解。配列系パターンの照合前に呼ばれる。
pub fn to_ordered_sequence<'a>(
    value: &'a Value,
    span: Span,
    overrides: &ProtocolOverrides,
) -> Result<Cow<'a, [Value]>, MatchError> {
    if let Some(f) = overrides.deconstruct_for(&value.class_of()) {
        return match f(value) {
            Some(Value::Array(items)) => Ok(Cow::Owned(items)),
            _ => Err(type_mismatch(value, "Array", span)),
        };
    }
    match value {
        Value::Array(items) => Ok(Cow::Borrowed(items.as_slice())),
        Value::Object(object) => match object.deconstruct() {
            Some(Value::Array(items)) => Ok(Cow::Owned(items)),
            _ => Err(type_mismatch(value, "Array", span)),
        },
        _ => Err(type_mismatch(value, "Array", span)),
    }
}

/// マッピングへの分解。ハッシュ系パターンの照合前に呼ばれる。
///
/// `requested` はパターンが名指しするキーのヒント（`**name` / `**nil`
/// 節があるときは `None` で、全エントリが要る）。協力側がヒントを
/// 無視して全部返しても、エンジンは必要なキーしか見ない。
pub fn to_mapping<'a>(
    value: &'a Value,
    requested: Option<&[String]>,
    span: Span,
    overrides: &ProtocolOverrides,
) -> Result<Cow<'a, IndexMap<String, Value>>, MatchError> {
    if let Some(f) = overrides.deconstruct_keys_for(&value.class_of()) {
        return match f(value, requested) {
            Some(Value::Hash(entries)) => Ok(Cow::Owned(entries)),
            _ => Err(type_mismatch(value, "Hash", span)),
        };
    }
    match value {
        Value::Hash(entries) => Ok(Cow::Borrowed(entries)),
        Value::Object(object) => match object.deconstruct_keys(requested) {
            Some(Value::Hash(entries)) => Ok(Cow::Owned(entries)),
            _ => Err(type_mismatch(value, "Hash", span)),
        },
        _ => Err(type_mismatch(value, "Hash", span)),
    }
}

fn type_mismatch(value: &Value, expected: &str, span: Span) -> MatchError {
    MatchError::TypeMismatch {
        value: value.to_string(),
        expected: expected.to_string(),
        span,
    }
}
