//! パターン木の静的検証モジュール
//!
//! このモジュールは、構築済みのパターン木に対して一度だけ走る
//! 検証パスを提供します。重複束縛、未定義のピン参照、選択パターン
//! 内の束縛、不正な省略形キーを拒否します。検証に失敗したパターンは
//! 照合に進んではいけません。
//!
//! 検証は「一つのパス」上の束縛名集合を保持しながら木を一巡します。
//! パスとは一回の照合成功で同時に有効になり得るノード列のことで、
//! 配列・ハッシュの入れ子要素は同じパス、選択パターンの各分岐は
//! 別のパスです（ただし分岐内の束縛はそもそも全面禁止なので、
//! 集合は線形に維持すれば足ります）。

use crate::error::ValidateError;
use crate::matcher::Scope;
use crate::pattern::{HashRestKind, Pattern, Span};
use std::collections::{HashMap, HashSet};

/// パターン木の検証器
///
/// 検証は冪等で、同じ木を何度検証しても同じ結果になる。
/// 検証がその後の照合に影響することもない。
pub struct PatternAnalyzer {
    /// 外側スコープで宣言済みの変数名（ピン参照の解決先）
    outer: HashSet<String>,
    /// 現在のパス上で束縛済みの変数名と初出位置
    bound: HashMap<String, Span>,
    /// 選択パターンの内側を走査中かどうか
    in_alternative: bool,
}

impl PatternAnalyzer {
    /// 外側スコープの変数名を指定して検証器を作る
    pub fn new(outer_names: impl IntoIterator<Item = String>) -> Self {
        Self {
            outer: outer_names.into_iter().collect(),
            bound: HashMap::new(),
            in_alternative: false,
        }
    }

    /// 照合に使うスコープから検証器を作る
    pub fn from_scope(scope: &Scope) -> Self {
        Self::new(scope.keys().cloned())
    }

    /// パターン木を検証する。最初に見つかった構造エラーを返す。
    pub fn analyze(&mut self, pattern: &Pattern) -> Result<(), ValidateError> {
        self.bound.clear();
        self.in_alternative = false;
        let result = self.walk(pattern);
        if let Err(e) = &result {
            log::debug!("pattern rejected: {}", e);
        }
        result
    }

    fn walk(&mut self, pattern: &Pattern) -> Result<(), ValidateError> {
        match pattern {
            Pattern::Value(_) => Ok(()),
            Pattern::Variable(p) => self.declare(&p.name, p.span),
            Pattern::Pin(p) => {
                if self.outer.contains(&p.name) {
                    Ok(())
                } else {
                    Err(ValidateError::UndefinedPinReference {
                        name: p.name.clone(),
                        span: p.span,
                    })
                }
            }
            Pattern::Alternative(p) => {
                let saved = self.in_alternative;
                self.in_alternative = true;
                for alternative in &p.alternatives {
                    self.walk(alternative)?;
                }
                self.in_alternative = saved;
                Ok(())
            }
            Pattern::As(p) => {
                self.walk(&p.inner)?;
                self.declare(&p.name, p.span)
            }
            Pattern::Array(p) => {
                for sub in &p.prefix {
                    self.walk(sub)?;
                }
                if let Some(rest) = &p.rest {
                    if let Some(name) = &rest.name {
                        self.declare(name, rest.span)?;
                    }
                }
                for sub in &p.postfix {
                    self.walk(sub)?;
                }
                Ok(())
            }
            Pattern::Find(p) => {
                if let Some(name) = &p.pre.name {
                    self.declare(name, p.pre.span)?;
                }
                for sub in &p.middle {
                    self.walk(sub)?;
                }
                if let Some(name) = &p.post.name {
                    self.declare(name, p.post.span)?;
                }
                Ok(())
            }
            Pattern::Hash(p) => {
                let mut keys_seen: HashSet<&str> = HashSet::new();
                for entry in &p.entries {
                    if !keys_seen.insert(&entry.key) {
                        return Err(ValidateError::DuplicateKey {
                            key: entry.key.clone(),
                            span: entry.span,
                        });
                    }
                    match &entry.pattern {
                        Some(sub) => self.walk(sub)?,
                        None => {
                            // 省略形 `{a:}` はキー名で束縛する
                            if !is_identifier_key(&entry.key) {
                                return Err(ValidateError::InvalidImplicitKey {
                                    key: entry.key.clone(),
                                    span: entry.span,
                                });
                            }
                            self.declare(&entry.key, entry.span)?;
                        }
                    }
                }
                if let Some(rest) = &p.rest {
                    if let HashRestKind::Capture(name) = &rest.kind {
                        self.declare(name, rest.span)?;
                    }
                }
                Ok(())
            }
        }
    }

    /// 束縛の宣言。`_` で始まる名前は重複・分岐の制約を免除される。
    fn declare(&mut self, name: &str, span: Span) -> Result<(), ValidateError> {
        if name.starts_with('_') {
            return Ok(());
        }
        if self.in_alternative {
            return Err(ValidateError::IllegalAlternativeBinding {
                name: name.to_string(),
                span,
            });
        }
        if self.bound.contains_key(name) {
            return Err(ValidateError::DuplicateBinding {
                name: name.to_string(),
                span,
            });
        }
        self.bound.insert(name.to_string(), span);
        Ok(())
    }
}

/// 検証の便利関数
pub fn validate(pattern: &Pattern, scope: &Scope) -> Result<(), ValidateError> {
    PatternAnalyzer::from_scope(scope).analyze(pattern)
}

/// ローカル変数名として有効なキーかどうか
fn is_identifier_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_key() {
        assert!(is_identifier_key("a"));
        assert!(is_identifier_key("_tmp"));
        assert!(is_identifier_key("a1"));
        assert!(!is_identifier_key("a?"));
        assert!(!is_identifier_key("a-b"));
        assert!(!is_identifier_key("1a"));
        assert!(!is_identifier_key(""));
    }
}
