//! Pretty JSON with `JSON.stringify(value, null, 2)` output rules.
//!
//! Differences from `serde_json::to_string_pretty`:
//! - whole-number floats print without a fraction (`100.0` → `100`)
//! - array-index keys (`"0"`, `"1"`, ...) come first in ascending order,
//!   remaining keys keep insertion order

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Map, Value};

/// Largest magnitude JavaScript prints without an exponent.
const PLAIN_NUMBER_LIMIT: f64 = 1e21;

/// Render a value the way a browser's `JSON.stringify(value, null, 2)` does.
pub fn to_js_pretty(value: &Value) -> serde_json::Result<String> {
    let ordered = js_key_order(value.clone());
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, JsFormatter::default());
    ordered.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn is_array_index(key: &str) -> bool {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if key.len() > 1 && key.starts_with('0') {
        return false;
    }
    matches!(key.parse::<u32>(), Ok(n) if n != u32::MAX)
}

fn js_key_order(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut indexed = Vec::new();
            let mut named = Vec::new();
            for (key, value) in map {
                let value = js_key_order(value);
                match key.parse::<u32>() {
                    Ok(n) if is_array_index(&key) => indexed.push((n, key, value)),
                    _ => named.push((key, value)),
                }
            }
            indexed.sort_by_key(|(n, _, _)| *n);

            let mut ordered = Map::new();
            for (_, key, value) in indexed {
                ordered.insert(key, value);
            }
            for (key, value) in named {
                ordered.insert(key, value);
            }
            Value::Object(ordered)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(js_key_order).collect()),
        other => other,
    }
}

/// Two-space pretty printer with JavaScript number formatting.
#[derive(Default)]
struct JsFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl Formatter for JsFormatter<'_> {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < PLAIN_NUMBER_LIMIT {
            if value == 0.0 {
                // -0 prints as 0
                return writer.write_all(b"0");
            }
            return write!(writer, "{:.0}", value);
        }
        self.inner.write_f64(writer, value)
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}
