//! Pattern tree definitions for the kata matching engine.
//!
//! A pattern tree is the compiled, immutable representation of one
//! matching clause. Trees are produced by an embedding host (typically
//! from its parser), validated once by [`crate::analyzer::PatternAnalyzer`],
//! and then reused across any number of match attempts.

mod builder;

pub use builder::*;

use crate::value::Value;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// A single pattern node
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// An already-evaluated value, matched by case-equality
    Value(ValuePattern),
    /// A variable binding; always matches
    Variable(VariablePattern),
    /// A pinned reference to an outer-scope value; never binds
    Pin(PinPattern),
    /// Ordered alternatives, first match wins
    Alternative(AlternativePattern),
    /// Inner pattern plus a binding of the whole candidate
    As(AsPattern),
    /// Ordered-sequence destructuring with optional rest segment
    Array(ArrayPattern),
    /// Rest segments surrounding fixed elements; earliest alignment wins
    Find(FindPattern),
    /// Mapping destructuring with a rest policy
    Hash(HashPattern),
}

/// Value pattern (literal, range, regexp, class reference, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct ValuePattern {
    pub value: Value,
    pub span: Span,
}

/// Variable binding pattern
#[derive(Debug, Clone, PartialEq)]
pub struct VariablePattern {
    pub name: String,
    pub span: Span,
}

/// Pin pattern (`^name`)
#[derive(Debug, Clone, PartialEq)]
pub struct PinPattern {
    pub name: String,
    pub span: Span,
}

/// Alternative pattern (`p0 | p1 | ...`)
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativePattern {
    pub alternatives: Vec<Pattern>,
    pub span: Span,
}

/// As pattern (`pattern => name`)
#[derive(Debug, Clone, PartialEq)]
pub struct AsPattern {
    pub inner: Box<Pattern>,
    pub name: String,
    pub span: Span,
}

/// Constant guard on array/find/hash patterns (`C(...)` / `C[...]`)
#[derive(Debug, Clone, PartialEq)]
pub struct ConstGuard {
    pub value: Value,
    pub span: Span,
}

/// Rest segment in array/find patterns (`*` or `*name`)
#[derive(Debug, Clone, PartialEq)]
pub struct RestPattern {
    /// `None` is the bare `*` form, which captures nothing
    pub name: Option<String>,
    pub span: Span,
}

/// Array pattern (`[p0, p1, *rest, q0, q1]`)
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    pub constant: Option<ConstGuard>,
    pub prefix: Vec<Pattern>,
    pub rest: Option<RestPattern>,
    /// Only meaningful when `rest` is present
    pub postfix: Vec<Pattern>,
    pub span: Span,
}

/// Find pattern (`[*pre, m0, m1, *post]`)
#[derive(Debug, Clone, PartialEq)]
pub struct FindPattern {
    pub constant: Option<ConstGuard>,
    pub pre: RestPattern,
    pub middle: Vec<Pattern>,
    pub post: RestPattern,
    pub span: Span,
}

/// Hash pattern (`{a: 0, b:, **rest}`)
#[derive(Debug, Clone, PartialEq)]
pub struct HashPattern {
    pub constant: Option<ConstGuard>,
    pub entries: Vec<HashPatternEntry>,
    pub rest: Option<HashRestPattern>,
    pub span: Span,
}

/// One `key: subpattern` entry of a hash pattern
#[derive(Debug, Clone, PartialEq)]
pub struct HashPatternEntry {
    pub key: String,
    /// `None` is the shorthand `{a:}` form, which binds the key name
    pub pattern: Option<Pattern>,
    pub span: Span,
}

/// Rest clause of a hash pattern
#[derive(Debug, Clone, PartialEq)]
pub struct HashRestPattern {
    pub kind: HashRestKind,
    pub span: Span,
}

/// The three explicit `**` forms
#[derive(Debug, Clone, PartialEq)]
pub enum HashRestKind {
    /// `**` — extra keys allowed, nothing captured
    Discard,
    /// `**nil` — no extra keys allowed
    Forbidden,
    /// `**name` — extra entries bound as a hash
    Capture(String),
}

impl Pattern {
    /// Source span of this node
    pub fn span(&self) -> Span {
        match self {
            Pattern::Value(p) => p.span,
            Pattern::Variable(p) => p.span,
            Pattern::Pin(p) => p.span,
            Pattern::Alternative(p) => p.span,
            Pattern::As(p) => p.span,
            Pattern::Array(p) => p.span,
            Pattern::Find(p) => p.span,
            Pattern::Hash(p) => p.span,
        }
    }
}

// Pretty printing implementations

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Value(p) => write!(f, "{}", p.value),
            Pattern::Variable(p) => write!(f, "{}", p.name),
            Pattern::Pin(p) => write!(f, "^{}", p.name),
            Pattern::Alternative(p) => {
                for (i, alt) in p.alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", alt)?;
                }
                Ok(())
            }
            Pattern::As(p) => write!(f, "{} => {}", p.inner, p.name),
            Pattern::Array(p) => {
                if let Some(constant) = &p.constant {
                    write!(f, "{}", constant.value)?;
                }
                write!(f, "[")?;
                let mut first = true;
                for pat in &p.prefix {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{}", pat)?;
                }
                if let Some(rest) = &p.rest {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "*{}", rest.name.as_deref().unwrap_or(""))?;
                }
                for pat in &p.postfix {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{}", pat)?;
                }
                write!(f, "]")
            }
            Pattern::Find(p) => {
                if let Some(constant) = &p.constant {
                    write!(f, "{}", constant.value)?;
                }
                write!(f, "[*{}", p.pre.name.as_deref().unwrap_or(""))?;
                for pat in &p.middle {
                    write!(f, ", {}", pat)?;
                }
                write!(f, ", *{}]", p.post.name.as_deref().unwrap_or(""))
            }
            Pattern::Hash(p) => {
                if let Some(constant) = &p.constant {
                    write!(f, "{}", constant.value)?;
                }
                write!(f, "{{")?;
                let mut first = true;
                for entry in &p.entries {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    match &entry.pattern {
                        Some(pat) => write!(f, "{}: {}", entry.key, pat)?,
                        None => write!(f, "{}:", entry.key)?,
                    }
                }
                if let Some(rest) = &p.rest {
                    if !first {
                        write!(f, ", ")?;
                    }
                    match &rest.kind {
                        HashRestKind::Discard => write!(f, "**")?,
                        HashRestKind::Forbidden => write!(f, "**nil")?,
                        HashRestKind::Capture(name) => write!(f, "**{}", name)?,
                    }
                }
                write!(f, "}}")
            }
        }
    }
}
