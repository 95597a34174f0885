//! Literal rendering of values, as used by record `Display`/`Debug`.
//!
//! Strings are quoted and escaped, `Nil` renders as `nil`, floats always
//! carry a fractional part (`5555.0`) and switch to exponent form outside
//! `[1e-4, 1e16)` (`1.0e+20`), maps render as `{key: value}`.

use crate::value::{Number, Value};
use std::fmt::{self, Write};

pub fn write_value<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::Nil => out.write_str("nil"),
        Value::Bool(b) => write!(out, "{}", b),
        Value::Number(n) => write_number(out, *n),
        Value::Str(s) => write_str_literal(out, s),
        Value::Array(arr) => {
            out.write_char('[')?;
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_value(out, v)?;
            }
            out.write_char(']')
        }
        Value::Map(map) => {
            if map.is_empty() {
                return out.write_str("{}");
            }
            out.write_char('{')?;
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write!(out, "{}: ", k)?;
                write_value(out, v)?;
            }
            out.write_char('}')
        }
        Value::Record(record) => write!(out, "{}", record),
    }
}

pub fn write_number<W: Write>(out: &mut W, n: Number) -> fmt::Result {
    match n {
        Number::I64(i) => write!(out, "{}", i),
        Number::U64(u) => write!(out, "{}", u),
        Number::F64(f) => write_float(out, f),
    }
}

fn write_float<W: Write>(out: &mut W, f: f64) -> fmt::Result {
    if f.is_nan() {
        return out.write_str("NaN");
    }
    if f.is_infinite() {
        return out.write_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
    }
    // Debug already picks the shortest round-trip digits and switches to
    // exponent form at the same thresholds; only the exponent shape differs.
    let repr = format!("{:?}", f);
    let Some((mantissa, exp)) = repr.split_once('e') else {
        return out.write_str(&repr);
    };
    out.write_str(mantissa)?;
    if !mantissa.contains('.') {
        out.write_str(".0")?;
    }
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    write!(out, "e{}{:0>2}", sign, digits)
}

pub fn write_str_literal<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            '\r' => out.write_str("\\r")?,
            '\u{1b}' => out.write_str("\\e")?,
            '#' if matches!(chars.peek(), Some(&('{' | '$' | '@'))) => out.write_str("\\#")?,
            c if c.is_control() => write!(out, "\\u{:04X}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Render a value to an owned string.
pub fn inspect(value: &Value) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_value(&mut out, value);
    out
}
