//! 配列パターンと検索パターンの評価

use super::{Bindings, MatchResult, Matcher};
use crate::pattern::{ArrayPattern, FindPattern};
use crate::value::{case_eq, to_ordered_sequence, Value};

impl Matcher<'_> {
    /// 配列パターンの評価。
    ///
    /// 定数ガード → 分解 → 長さ検査 → 要素照合の順で、残余があれば
    /// 前置・後置の両側を固定し、間の切片を残余に束縛する。
    pub(crate) fn eval_array(
        &self,
        pattern: &ArrayPattern,
        value: &Value,
        env: &mut Bindings,
    ) -> MatchResult<bool> {
        if let Some(constant) = &pattern.constant {
            if !case_eq(&constant.value, value, self.overrides()) {
                return Ok(false);
            }
        }
        let sequence = to_ordered_sequence(value, pattern.span, self.overrides())?;
        let n = sequence.len();
        let p = pattern.prefix.len();
        let q = pattern.postfix.len();

        match &pattern.rest {
            None => {
                if n != p {
                    return Ok(false);
                }
                for (sub, element) in pattern.prefix.iter().zip(sequence.iter()) {
                    if !self.eval(sub, element, env)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Some(rest) => {
                if n < p + q {
                    return Ok(false);
                }
                for (sub, element) in pattern.prefix.iter().zip(&sequence[..p]) {
                    if !self.eval(sub, element, env)? {
                        return Ok(false);
                    }
                }
                for (sub, element) in pattern.postfix.iter().zip(&sequence[n - q..]) {
                    if !self.eval(sub, element, env)? {
                        return Ok(false);
                    }
                }
                if let Some(name) = &rest.name {
                    env.insert(name.clone(), Value::Array(sequence[p..n - q].to_vec()));
                }
                Ok(true)
            }
        }
    }

    /// 検索パターンの評価。
    ///
    /// 固定要素列が整列する最左の開始位置を探す。位置ごとの試行は
    /// 使い捨ての環境で行い、失敗した試行の束縛は漏れない。
    pub(crate) fn eval_find(
        &self,
        pattern: &FindPattern,
        value: &Value,
        env: &mut Bindings,
    ) -> MatchResult<bool> {
        if let Some(constant) = &pattern.constant {
            if !case_eq(&constant.value, value, self.overrides()) {
                return Ok(false);
            }
        }
        let sequence = to_ordered_sequence(value, pattern.span, self.overrides())?;
        let n = sequence.len();
        let k = pattern.middle.len();
        if n < k {
            return Ok(false);
        }

        for start in 0..=n - k {
            let mut attempt = Bindings::new();
            let mut aligned = true;
            for (sub, element) in pattern.middle.iter().zip(&sequence[start..start + k]) {
                if !self.eval(sub, element, &mut attempt)? {
                    aligned = false;
                    break;
                }
            }
            if !aligned {
                continue;
            }
            if let Some(name) = &pattern.pre.name {
                env.insert(name.clone(), Value::Array(sequence[..start].to_vec()));
            }
            env.extend(attempt);
            if let Some(name) = &pattern.post.name {
                env.insert(name.clone(), Value::Array(sequence[start + k..].to_vec()));
            }
            return Ok(true);
        }
        Ok(false)
    }
}
