//! Kata Pattern Matching Engine Library
//!
//! This library provides an embeddable structural pattern matching engine:
//! an immutable pattern tree model, a compile-time validation pass, a
//! recursive matcher with a deconstruction protocol for host objects, and
//! a `case/in` style dispatch layer for embedding hosts.

pub mod analyzer;
pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod value;

// Re-export commonly used types
pub use analyzer::{validate, PatternAnalyzer};
pub use dispatch::{matches, CaseIn, Clause, GuardFn};
pub use error::{
    DiagnosticError, ErrorCollector, KataError, KataResult, MatchError, ValidateError,
};
pub use matcher::{Bindings, Matcher, Scope};
pub use pattern::{Pattern, Span};
pub use value::{
    case_eq, ClassRef, ObjectLike, ProtocolOverrides, RangeValue, RegexpValue, Value,
};
