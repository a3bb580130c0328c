// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Index values and their canonical string forms.
//!
//! Set members, index elements and parameter values share one value type.
//! Each index is stored as a tuple of values; the empty tuple is the index
//! of a scalar component.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

/// Index string recorded for scalar components and scalar-set members.
pub const SCALAR_INDEX: &str = "None";

/// A single element of a set or index, or a parameter value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Real(f64),
    Str(String),
}

/// A tuple of values addressing one entry of an indexed component.
pub type Index = Vec<Value>;

impl Value {
    /// Parse a bare data-file word: integers, then reals, else a string.
    ///
    /// Words like `inf` or `nan` stay strings; only words that look numeric
    /// are tried as reals.
    pub fn parse_word(word: &str) -> Self {
        if let Ok(i) = word.parse::<i64>() {
            return Value::Int(i);
        }
        let looks_numeric = word
            .trim_start_matches(['+', '-'])
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '.');
        if looks_numeric {
            if let Ok(r) = word.parse::<f64>() {
                return Value::Real(r);
            }
        }
        Value::Str(word.to_owned())
    }

    /// The quoted form used for tuple elements, e.g. `'a'`.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => quote(s),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Int(i) => i.hash(state),
            Value::Real(r) => r.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Real(r) => f.write_str(&format_real(*r)),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

/// Shortest round-trip form with a mandatory fractional part or a signed,
/// two-digit exponent: `2.0`, `0.5`, `1e+16`, `1e-07`.
fn format_real(r: f64) -> String {
    if r.is_nan() {
        return "nan".to_owned();
    }
    if r.is_infinite() {
        return if r > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    let s = format!("{r:?}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = exp.strip_prefix('-').map_or(("+", exp), |d| ("-", d));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

/// Quote a string the way tuple elements are printed: single quotes unless
/// the text contains a single quote and no double quote.
fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// Canonical string of an index, stored in the `index_str` columns.
///
/// The empty index renders as [`SCALAR_INDEX`], a one-element index as the
/// element itself and longer indices as a parenthesised tuple.
pub fn canonical(index: &[Value]) -> String {
    match index {
        [] => SCALAR_INDEX.to_owned(),
        [single] => single.to_string(),
        many => {
            let parts: Vec<String> = many.iter().map(Value::repr).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// Solver label of a component entry: `x` or `x[a,1]`.
pub fn label(name: &str, index: &[Value]) -> String {
    if index.is_empty() {
        return name.to_owned();
    }
    let parts: Vec<String> = index.iter().map(Value::to_string).collect();
    format!("{name}[{}]", parts.join(","))
}
