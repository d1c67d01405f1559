//! ハッシュパターンの評価

use super::{Bindings, MatchResult, Matcher};
use crate::pattern::{HashPattern, HashRestKind};
use crate::value::{case_eq, to_mapping, Value};
use indexmap::IndexMap;

impl Matcher<'_> {
    /// ハッシュパターンの評価。
    ///
    /// 宣言されたキーの不在は NoMatch（エラーではない）。`**` 節の
    /// 方針は最後に適用する：`**nil` は余剰キーがあれば失敗、
    /// `**name` は余剰エントリをハッシュとして束縛する。
    pub(crate) fn eval_hash(
        &self,
        pattern: &HashPattern,
        value: &Value,
        env: &mut Bindings,
    ) -> MatchResult<bool> {
        if let Some(constant) = &pattern.constant {
            if !case_eq(&constant.value, value, self.overrides()) {
                return Ok(false);
            }
        }

        // 空のハッシュパターンは空のマッピングにだけマッチする。
        // 空かどうかの判定には全エントリが要る。
        if pattern.entries.is_empty() && pattern.rest.is_none() {
            let mapping = to_mapping(value, None, pattern.span, self.overrides())?;
            return Ok(mapping.is_empty());
        }

        // `**name` / `**nil` では余剰キーの判定に全エントリが要る。
        // それ以外は名指しされたキーだけ要求すればよい。
        let requested: Option<Vec<String>> = match &pattern.rest {
            None => Some(declared_keys(pattern)),
            Some(rest) => match &rest.kind {
                HashRestKind::Discard => Some(declared_keys(pattern)),
                HashRestKind::Forbidden | HashRestKind::Capture(_) => None,
            },
        };
        let mapping = to_mapping(value, requested.as_deref(), pattern.span, self.overrides())?;

        for entry in &pattern.entries {
            let Some(element) = mapping.get(&entry.key) else {
                return Ok(false);
            };
            match &entry.pattern {
                Some(sub) => {
                    if !self.eval(sub, element, env)? {
                        return Ok(false);
                    }
                }
                None => {
                    // 省略形はキー名で束縛する
                    env.insert(entry.key.clone(), element.clone());
                }
            }
        }

        if let Some(rest) = &pattern.rest {
            match &rest.kind {
                HashRestKind::Discard => {}
                HashRestKind::Forbidden => {
                    let has_extra = mapping
                        .keys()
                        .any(|key| !pattern.entries.iter().any(|e| &e.key == key));
                    return Ok(!has_extra);
                }
                HashRestKind::Capture(name) => {
                    let remainder: IndexMap<String, Value> = mapping
                        .iter()
                        .filter(|(key, _)| !pattern.entries.iter().any(|e| &e.key == *key))
                        .map(|(key, element)| (key.clone(), element.clone()))
                        .collect();
                    env.insert(name.clone(), Value::Hash(remainder));
                }
            }
        }
        Ok(true)
    }
}

fn declared_keys(pattern: &HashPattern) -> Vec<String> {
    pattern.entries.iter().map(|e| e.key.clone()).collect()
}
