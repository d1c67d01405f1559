//! ケース等価性（`===` 相当）と上書き表
//!
//! 既定の判定はパターン側の値の種類で決まる：クラス参照は所属判定、
//! 範囲は被覆判定、正規表現は文字列検索、述語は呼び出し、それ以外は
//! 構造等価。スコープ付きの演算子再定義は持たず、差し替えは明示的に
//! 渡される [`ProtocolOverrides`] 表で行う。

use super::{ClassRef, Value};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// ケース等価性の上書き関数。引数は（パターン側の値, 候補値）。
pub type CaseEqFn = Rc<dyn Fn(&Value, &Value) -> bool>;

/// 順序列分解の上書き関数
pub type DeconstructFn = Rc<dyn Fn(&Value) -> Option<Value>>;

/// マッピング分解の上書き関数。第二引数は要求キーのヒント。
pub type DeconstructKeysFn = Rc<dyn Fn(&Value, Option<&[String]>) -> Option<Value>>;

/// クラス単位でケース等価性と分解プロトコルを差し替える表。
///
/// - ケース等価性はパターン側の値のクラスが鍵。パターン側がクラス
///   参照のときは参照されたクラスそのものが鍵になる（そのクラスの
///   `===` を上書きしていることになる）。
/// - 分解の上書きは候補値のクラスが鍵で、ネイティブ形状より優先される。
///
/// 空の表は既定動作そのもの。照合中は読み取り専用。
#[derive(Clone, Default)]
pub struct ProtocolOverrides {
    case_eq: HashMap<ClassRef, CaseEqFn>,
    deconstruct: HashMap<ClassRef, DeconstructFn>,
    deconstruct_keys: HashMap<ClassRef, DeconstructKeysFn>,
}

impl ProtocolOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// `class` の `===` を差し替える
    pub fn override_case_eq(
        &mut self,
        class: ClassRef,
        f: impl Fn(&Value, &Value) -> bool + 'static,
    ) {
        self.case_eq.insert(class, Rc::new(f));
    }

    /// `class` の順序列分解を差し替える
    pub fn override_deconstruct(
        &mut self,
        class: ClassRef,
        f: impl Fn(&Value) -> Option<Value> + 'static,
    ) {
        self.deconstruct.insert(class, Rc::new(f));
    }

    /// `class` のマッピング分解を差し替える
    pub fn override_deconstruct_keys(
        &mut self,
        class: ClassRef,
        f: impl Fn(&Value, Option<&[String]>) -> Option<Value> + 'static,
    ) {
        self.deconstruct_keys.insert(class, Rc::new(f));
    }

    pub(crate) fn case_eq_for(&self, class: &ClassRef) -> Option<&CaseEqFn> {
        self.case_eq.get(class)
    }

    pub(crate) fn deconstruct_for(&self, class: &ClassRef) -> Option<&DeconstructFn> {
        self.deconstruct.get(class)
    }

    pub(crate) fn deconstruct_keys_for(&self, class: &ClassRef) -> Option<&DeconstructKeysFn> {
        self.deconstruct_keys.get(class)
    }
}

impl fmt::Debug for ProtocolOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolOverrides")
            .field("case_eq", &self.case_eq.keys())
            .field("deconstruct", &self.deconstruct.keys())
            .field("deconstruct_keys", &self.deconstruct_keys.keys())
            .finish()
    }
}

/// ケース等価性判定。`pattern_value === candidate` に相当する。
pub fn case_eq(pattern_value: &Value, candidate: &Value, overrides: &ProtocolOverrides) -> bool {
    let key = case_eq_key(pattern_value);
    if let Some(f) = overrides.case_eq_for(&key) {
        return f(pattern_value, candidate);
    }
    match pattern_value {
        Value::Class(class) => candidate.class_of() == *class,
        Value::Range(range) => range.cover(candidate),
        Value::Regexp(regexp) => {
            matches!(candidate, Value::Str(s) if regexp.is_match(s))
        }
        Value::Proc(predicate) => predicate.call(candidate),
        _ => pattern_value == candidate,
    }
}

/// 上書き表を引く鍵。クラス参照なら参照先のクラス、それ以外は値自身のクラス。
fn case_eq_key(pattern_value: &Value) -> ClassRef {
    match pattern_value {
        Value::Class(class) => class.clone(),
        other => other.class_of(),
    }
}
