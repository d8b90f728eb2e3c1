//! Result values produced by semantic actions.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use protean_core::Colors;

/// Self-contained result value.
///
/// `List` is reserved for the accumulation of a repeatable rule. Appending a
/// `List` to another repeatable rule's accumulation splices its items in
/// instead of nesting it. Use `Array` for sequences that must keep their shape.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Array(Vec<Value>),
    /// Results of a repeatable rule, in match order.
    List(Vec<Value>),
    /// Object with ordered fields.
    Object(Vec<(String, Value)>),
    Tagged {
        tag: String,
        data: Option<Box<Value>>,
    },
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn tagged(tag: impl Into<String>, data: Value) -> Self {
        Value::Tagged {
            tag: tag.into(),
            data: Some(Box::new(data)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Items of an `Array` or `List`.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Append `self` to a repeatable rule's accumulation.
    pub(crate) fn append_to(self, acc: &mut Vec<Value>) {
        match self {
            Value::List(items) => acc.extend(items),
            other => acc.push(other),
        }
    }

    /// Format value as JSON, optionally colored.
    ///
    /// Keys are blue, strings green, `null` and structure dim.
    pub fn format(&self, pretty: bool, colors: Colors) -> String {
        let mut out = String::new();
        Formatter {
            out: &mut out,
            c: &colors,
            pretty,
        }
        .value(self, 0);
        out
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) | Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Tagged { tag, data } => {
                let len = if data.is_some() { 2 } else { 1 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("$tag", tag)?;
                if let Some(d) = data {
                    map.serialize_entry("$data", d)?;
                }
                map.end()
            }
        }
    }
}

struct Formatter<'a> {
    out: &'a mut String,
    c: &'a Colors,
    pretty: bool,
}

impl Formatter<'_> {
    fn value(&mut self, value: &Value, indent: usize) {
        match value {
            Value::Null => self.colored(self.c.dim, "null"),
            Value::String(s) => self.string(self.c.green, s),
            Value::Array(items) | Value::List(items) => self.array(items, indent),
            Value::Object(fields) => {
                let fields: Vec<_> = fields.iter().map(|(k, v)| (k.as_str(), v)).collect();
                self.object(&fields, indent);
            }
            Value::Tagged { tag, data } => {
                let tag = Value::String(tag.clone());
                let mut fields = vec![("$tag", &tag)];
                if let Some(d) = data {
                    fields.push(("$data", d.as_ref()));
                }
                self.object(&fields, indent);
            }
        }
    }

    fn array(&mut self, items: &[Value], indent: usize) {
        self.punct('[');
        let inner = if self.pretty { indent + 2 } else { 0 };
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.punct(',');
            }
            self.newline(inner);
            self.value(item, inner);
        }
        if !items.is_empty() {
            self.newline(indent);
        }
        self.punct(']');
    }

    fn object(&mut self, fields: &[(&str, &Value)], indent: usize) {
        self.punct('{');
        let inner = if self.pretty { indent + 2 } else { 0 };
        for (i, (key, value)) in fields.iter().enumerate() {
            if i > 0 {
                self.punct(',');
            }
            self.newline(inner);
            self.string(self.c.blue, key);
            self.punct(':');
            if self.pretty {
                self.out.push(' ');
            }
            self.value(value, inner);
        }
        if !fields.is_empty() {
            self.newline(indent);
        }
        self.punct('}');
    }

    fn newline(&mut self, indent: usize) {
        if self.pretty {
            self.out.push('\n');
            self.out.push_str(&" ".repeat(indent));
        }
    }

    fn punct(&mut self, ch: char) {
        self.out.push_str(self.c.dim);
        self.out.push(ch);
        self.out.push_str(self.c.reset);
    }

    fn string(&mut self, color: &str, s: &str) {
        self.out.push_str(color);
        self.out.push('"');
        self.out.push_str(&escape_json_string(s));
        self.out.push('"');
        self.out.push_str(self.c.reset);
    }

    fn colored(&mut self, color: &str, text: &str) {
        self.out.push_str(color);
        self.out.push_str(text);
        self.out.push_str(self.c.reset);
    }
}

fn escape_json_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result
}
