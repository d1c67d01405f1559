//! 範囲値と所属判定

use super::Value;
use std::cmp::Ordering;
use std::fmt;

/// A range value with optional endpoints (`0..5`, `0...5`, `0..`, `..5`)
#[derive(Debug, Clone, PartialEq)]
pub struct RangeValue {
    pub start: Option<Box<Value>>,
    pub end: Option<Box<Value>>,
    pub exclusive: bool,
}

impl RangeValue {
    pub fn new(start: Option<Value>, end: Option<Value>, exclusive: bool) -> Self {
        Self {
            start: start.map(Box::new),
            end: end.map(Box::new),
            exclusive,
        }
    }

    /// 両端を含む範囲（`a..b`）
    pub fn inclusive(start: impl Into<Value>, end: impl Into<Value>) -> Self {
        Self::new(Some(start.into()), Some(end.into()), false)
    }

    /// 終端を含まない範囲（`a...b`）
    pub fn exclusive(start: impl Into<Value>, end: impl Into<Value>) -> Self {
        Self::new(Some(start.into()), Some(end.into()), true)
    }

    /// 値が範囲に含まれるかどうか。比較できない型の組は含まれない扱い。
    pub fn cover(&self, value: &Value) -> bool {
        if let Some(start) = &self.start {
            match compare(value, start) {
                Some(Ordering::Greater) | Some(Ordering::Equal) => {}
                _ => return false,
            }
        }
        if let Some(end) = &self.end {
            match compare(value, end) {
                Some(Ordering::Less) => {}
                Some(Ordering::Equal) if !self.exclusive => {}
                _ => return false,
            }
        }
        true
    }
}

/// 順序比較。数値同士と文字列同士のみ順序を持つ。
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = &self.start {
            write!(f, "{}", start)?;
        }
        write!(f, "{}", if self.exclusive { "..." } else { ".." })?;
        if let Some(end) = &self.end {
            write!(f, "{}", end)?;
        }
        Ok(())
    }
}
