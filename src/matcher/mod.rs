//! パターン照合エンジン
//!
//! 検証済みのパターン木を候補値に対して評価し、成功なら束縛集合を、
//! 失敗なら NoMatch を返します。NoMatch は `Ok(None)` で表される
//! 通常の制御値で、エラーとして伝播するのは分解プロトコルの
//! `TypeMismatch` だけです。
//!
//! 照合は（パターン、候補値、外側スコープ、上書き表）の純関数で、
//! 試行ごとに新しい束縛環境を割り当てます。パターン木は不変なので、
//! 同じ木を何度でも照合に使えます。

mod mapping;
mod sequence;

use crate::error::MatchError;
use crate::pattern::Pattern;
use crate::value::{case_eq, ProtocolOverrides, Value};
use indexmap::IndexMap;

/// 外側スコープ。ピン参照の解決先で、照合成功時の束縛の合流先。
pub type Scope = IndexMap<String, Value>;

/// 一回の照合試行で蓄積される束縛環境（挿入順を保持する）
pub type Bindings = IndexMap<String, Value>;

/// 照合結果型のエイリアス
pub type MatchResult<T> = Result<T, MatchError>;

/// パターン照合器
pub struct Matcher<'a> {
    scope: &'a Scope,
    overrides: &'a ProtocolOverrides,
}

impl<'a> Matcher<'a> {
    pub fn new(scope: &'a Scope, overrides: &'a ProtocolOverrides) -> Self {
        Self { scope, overrides }
    }

    /// パターンを候補値に照合する。
    ///
    /// 成功なら `Ok(Some(bindings))`、照合失敗なら `Ok(None)`。
    /// `Err` になるのは候補値が要求された分解をサポートしない場合だけ。
    pub fn try_match(&self, pattern: &Pattern, value: &Value) -> MatchResult<Option<Bindings>> {
        let mut env = Bindings::new();
        if self.eval(pattern, value, &mut env)? {
            Ok(Some(env))
        } else {
            Ok(None)
        }
    }

    pub(crate) fn eval(
        &self,
        pattern: &Pattern,
        value: &Value,
        env: &mut Bindings,
    ) -> MatchResult<bool> {
        match pattern {
            Pattern::Value(p) => Ok(case_eq(&p.value, value, self.overrides)),
            Pattern::Variable(p) => {
                env.insert(p.name.clone(), value.clone());
                Ok(true)
            }
            Pattern::Pin(p) => match self.scope.get(&p.name) {
                Some(pinned) => Ok(case_eq(pinned, value, self.overrides)),
                None => {
                    // 検証済みの木では起きない。未検証の木は単に失敗させる。
                    log::trace!("pin target {} not in scope", p.name);
                    Ok(false)
                }
            },
            Pattern::Alternative(p) => {
                // 左から順に試し、最初に成功した分岐の束縛だけ合流する
                for alternative in &p.alternatives {
                    let mut attempt = Bindings::new();
                    if self.eval(alternative, value, &mut attempt)? {
                        env.extend(attempt);
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Pattern::As(p) => {
                if self.eval(&p.inner, value, env)? {
                    env.insert(p.name.clone(), value.clone());
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Pattern::Array(p) => self.eval_array(p, value, env),
            Pattern::Find(p) => self.eval_find(p, value, env),
            Pattern::Hash(p) => self.eval_hash(p, value, env),
        }
    }

    pub(crate) fn overrides(&self) -> &ProtocolOverrides {
        self.overrides
    }
}
