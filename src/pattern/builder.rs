//! パターン木を組み立てるためのヘルパー関数群
//!
//! 外部パーサーを持たないホストやテストコードが、構造体リテラルを
//! 並べずにパターン木を構築できるようにする。スパンは全てダミーで、
//! 実際の位置情報を持つホストは各ノードのフィールドを直接埋める。

use super::{
    AlternativePattern, ArrayPattern, AsPattern, ConstGuard, FindPattern, HashPattern,
    HashPatternEntry, HashRestKind, HashRestPattern, Pattern, PinPattern, RestPattern, Span,
    ValuePattern, VariablePattern,
};
use crate::value::Value;

/// 値パターン
pub fn value(v: impl Into<Value>) -> Pattern {
    Pattern::Value(ValuePattern {
        value: v.into(),
        span: Span::dummy(),
    })
}

/// 変数束縛パターン
pub fn var(name: &str) -> Pattern {
    Pattern::Variable(VariablePattern {
        name: name.to_string(),
        span: Span::dummy(),
    })
}

/// ピンパターン（`^name`）
pub fn pin(name: &str) -> Pattern {
    Pattern::Pin(PinPattern {
        name: name.to_string(),
        span: Span::dummy(),
    })
}

/// 選択パターン（`p0 | p1 | ...`）
pub fn alt(alternatives: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::Alternative(AlternativePattern {
        alternatives: alternatives.into_iter().collect(),
        span: Span::dummy(),
    })
}

/// Asパターン（`pattern => name`）
pub fn as_pat(inner: Pattern, name: &str) -> Pattern {
    Pattern::As(AsPattern {
        inner: Box::new(inner),
        name: name.to_string(),
        span: Span::dummy(),
    })
}

/// 固定長の配列パターン（`[p0, p1]`）
pub fn array(elements: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::Array(ArrayPattern {
        constant: None,
        prefix: elements.into_iter().collect(),
        rest: None,
        postfix: Vec::new(),
        span: Span::dummy(),
    })
}

/// 残余付きの配列パターン（`[p.., *rest, q..]`）。
/// `rest` が `None` なら捕捉しない `*` 形式。
pub fn array_rest(
    prefix: impl IntoIterator<Item = Pattern>,
    rest: Option<&str>,
    postfix: impl IntoIterator<Item = Pattern>,
) -> Pattern {
    Pattern::Array(ArrayPattern {
        constant: None,
        prefix: prefix.into_iter().collect(),
        rest: Some(RestPattern {
            name: rest.map(str::to_string),
            span: Span::dummy(),
        }),
        postfix: postfix.into_iter().collect(),
        span: Span::dummy(),
    })
}

/// 検索パターン（`[*pre, m.., *post]`）
pub fn find(
    pre: Option<&str>,
    middle: impl IntoIterator<Item = Pattern>,
    post: Option<&str>,
) -> Pattern {
    Pattern::Find(FindPattern {
        constant: None,
        pre: RestPattern {
            name: pre.map(str::to_string),
            span: Span::dummy(),
        },
        middle: middle.into_iter().collect(),
        post: RestPattern {
            name: post.map(str::to_string),
            span: Span::dummy(),
        },
        span: Span::dummy(),
    })
}

/// ハッシュパターンのエントリ（`key: pattern`）
pub fn entry(key: &str, pattern: Pattern) -> HashPatternEntry {
    HashPatternEntry {
        key: key.to_string(),
        pattern: Some(pattern),
        span: Span::dummy(),
    }
}

/// ハッシュパターンの省略形エントリ（`key:` — キー名で束縛する）
pub fn entry_shorthand(key: &str) -> HashPatternEntry {
    HashPatternEntry {
        key: key.to_string(),
        pattern: None,
        span: Span::dummy(),
    }
}

/// `**` 節を持たないハッシュパターン
pub fn hash(entries: impl IntoIterator<Item = HashPatternEntry>) -> Pattern {
    Pattern::Hash(HashPattern {
        constant: None,
        entries: entries.into_iter().collect(),
        rest: None,
        span: Span::dummy(),
    })
}

/// `**` 節付きのハッシュパターン
pub fn hash_rest(
    entries: impl IntoIterator<Item = HashPatternEntry>,
    rest: HashRestKind,
) -> Pattern {
    Pattern::Hash(HashPattern {
        constant: None,
        entries: entries.into_iter().collect(),
        rest: Some(HashRestPattern {
            kind: rest,
            span: Span::dummy(),
        }),
        span: Span::dummy(),
    })
}

/// 定数ガードを付加する（`C(...)` / `C[...]` 形式）。
/// 配列・検索・ハッシュ以外のパターンには付加できないので、そのまま返す。
pub fn with_const(pattern: Pattern, constant: impl Into<Value>) -> Pattern {
    let guard = ConstGuard {
        value: constant.into(),
        span: Span::dummy(),
    };
    match pattern {
        Pattern::Array(mut p) => {
            p.constant = Some(guard);
            Pattern::Array(p)
        }
        Pattern::Find(mut p) => {
            p.constant = Some(guard);
            Pattern::Find(p)
        }
        Pattern::Hash(mut p) => {
            p.constant = Some(guard);
            Pattern::Hash(p)
        }
        other => other,
    }
}
