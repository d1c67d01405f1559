//! Runtime value model for the kata matching engine.
//!
//! Candidate values and the pattern-side literal values share one
//! representation. Host objects participate through the deconstruction
//! protocol ([`ObjectLike`]); scoped operator redefinition is expressed
//! through an explicitly-passed override table ([`ProtocolOverrides`]).

mod case_eq;
mod deconstruct;
mod object;
mod range;
mod regexp;

pub use case_eq::{case_eq, ProtocolOverrides};
pub use deconstruct::{to_mapping, to_ordered_sequence};
pub use object::ObjectLike;
pub use range::RangeValue;
pub use regexp::RegexpValue;

use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// A runtime value
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    Range(RangeValue),
    Regexp(RegexpValue),
    Class(ClassRef),
    Proc(ProcValue),
    Array(Vec<Value>),
    Hash(IndexMap<String, Value>),
    Object(Rc<dyn ObjectLike>),
}

/// A class reference. The class model is flat: builtin tags plus named
/// user classes, no ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassRef {
    NilClass,
    Boolean,
    Integer,
    Float,
    String,
    Symbol,
    Range,
    Regexp,
    Class,
    Proc,
    Array,
    Hash,
    User(String),
}

impl ClassRef {
    pub fn name(&self) -> &str {
        match self {
            ClassRef::NilClass => "NilClass",
            ClassRef::Boolean => "Boolean",
            ClassRef::Integer => "Integer",
            ClassRef::Float => "Float",
            ClassRef::String => "String",
            ClassRef::Symbol => "Symbol",
            ClassRef::Range => "Range",
            ClassRef::Regexp => "Regexp",
            ClassRef::Class => "Class",
            ClassRef::Proc => "Proc",
            ClassRef::Array => "Array",
            ClassRef::Hash => "Hash",
            ClassRef::User(name) => name,
        }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// ホスト述語を包む値。ケース等価性で候補値に適用される。
#[derive(Clone)]
pub struct ProcValue {
    f: Rc<dyn Fn(&Value) -> bool>,
}

impl ProcValue {
    pub fn new(f: impl Fn(&Value) -> bool + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    pub fn call(&self, value: &Value) -> bool {
        (self.f)(value)
    }
}

impl fmt::Debug for ProcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcValue")
    }
}

impl PartialEq for ProcValue {
    fn eq(&self, other: &Self) -> bool {
        // 同一性比較
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl Value {
    /// シンボル値を作る
    pub fn symbol(name: &str) -> Value {
        Value::Symbol(name.to_string())
    }

    /// ハッシュ値を作る
    pub fn hash<'a>(pairs: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
        Value::Hash(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// ホスト述語値を作る
    pub fn predicate(f: impl Fn(&Value) -> bool + 'static) -> Value {
        Value::Proc(ProcValue::new(f))
    }

    /// この値のクラス
    pub fn class_of(&self) -> ClassRef {
        match self {
            Value::Nil => ClassRef::NilClass,
            Value::Bool(_) => ClassRef::Boolean,
            Value::Int(_) => ClassRef::Integer,
            Value::Float(_) => ClassRef::Float,
            Value::Str(_) => ClassRef::String,
            Value::Symbol(_) => ClassRef::Symbol,
            Value::Range(_) => ClassRef::Range,
            Value::Regexp(_) => ClassRef::Regexp,
            Value::Class(_) => ClassRef::Class,
            Value::Proc(_) => ClassRef::Proc,
            Value::Array(_) => ClassRef::Array,
            Value::Hash(_) => ClassRef::Hash,
            Value::Object(o) => ClassRef::User(o.class_name().to_string()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            // 整数と浮動小数点は数値として比較する
            (Int(a), Float(b)) | (Float(b), Int(a)) => (*a as f64) == *b,
            (Str(a), Str(b)) => a == b,
            (Symbol(a), Symbol(b)) => a == b,
            (Range(a), Range(b)) => a == b,
            (Regexp(a), Regexp(b)) => a == b,
            (Class(a), Class(b)) => a == b,
            (Proc(a), Proc(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Hash(a), Hash(b)) => a == b,
            (Object(a), Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<ClassRef> for Value {
    fn from(v: ClassRef) -> Self {
        Value::Class(v)
    }
}

impl From<RangeValue> for Value {
    fn from(v: RangeValue) -> Self {
        Value::Range(v)
    }
}

impl From<RegexpValue> for Value {
    fn from(v: RegexpValue) -> Self {
        Value::Regexp(v)
    }
}

impl From<Rc<dyn ObjectLike>> for Value {
    fn from(v: Rc<dyn ObjectLike>) -> Self {
        Value::Object(v)
    }
}

// Diagnostic ("inspect") form, used by NoMatchingPattern messages
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Symbol(v) => write!(f, ":{}", v),
            Value::Range(v) => write!(f, "{}", v),
            Value::Regexp(v) => write!(f, "/{}/", v.source()),
            Value::Class(v) => write!(f, "{}", v),
            Value::Proc(_) => write!(f, "#<Proc>"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Hash(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Object(o) => write!(f, "{}", o.inspect()),
        }
    }
}
