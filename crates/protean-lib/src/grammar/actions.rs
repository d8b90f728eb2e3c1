//! Named actions available to grammar definition files.

use std::rc::Rc;

use super::pattern::Action;
use super::value::Value;
use crate::diagnostics::DiagnosticKind;
use crate::engine::{ActionContext, Unwind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinAction {
    /// Single value as is, several as an array.
    Default,
    /// `{ "$tag": rule, "$data": [values] }`.
    Tree,
    First,
    Last,
    /// String values joined with spaces.
    Text,
    Null,
    /// Adds a pattern to a rule: the last two string values are the rule name
    /// and the pattern spec.
    Extend,
}

impl BuiltinAction {
    pub const ALL: [BuiltinAction; 7] = [
        Self::Default,
        Self::Tree,
        Self::First,
        Self::Last,
        Self::Text,
        Self::Null,
        Self::Extend,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Tree => "tree",
            Self::First => "first",
            Self::Last => "last",
            Self::Text => "text",
            Self::Null => "null",
            Self::Extend => "extend",
        }
    }

    /// `None` for [`Default`](Self::Default), which is the pattern fallback.
    pub fn action(self) -> Option<Action> {
        let action: Action = match self {
            Self::Default => return None,
            Self::Tree => Rc::new(tree),
            Self::First => Rc::new(first),
            Self::Last => Rc::new(last),
            Self::Text => Rc::new(text),
            Self::Null => Rc::new(null),
            Self::Extend => Rc::new(extend),
        };
        Some(action)
    }
}

fn tree(cx: &mut ActionContext<'_>, values: Vec<Value>) -> Result<Value, Unwind> {
    Ok(Value::tagged(cx.rule_name(), Value::Array(values)))
}

fn first(_: &mut ActionContext<'_>, values: Vec<Value>) -> Result<Value, Unwind> {
    Ok(values.into_iter().next().unwrap_or_default())
}

fn last(_: &mut ActionContext<'_>, values: Vec<Value>) -> Result<Value, Unwind> {
    Ok(values.into_iter().last().unwrap_or_default())
}

fn text(_: &mut ActionContext<'_>, values: Vec<Value>) -> Result<Value, Unwind> {
    Ok(Value::String(join_text(&values)))
}

fn null(_: &mut ActionContext<'_>, _: Vec<Value>) -> Result<Value, Unwind> {
    Ok(Value::Null)
}

fn extend(cx: &mut ActionContext<'_>, values: Vec<Value>) -> Result<Value, Unwind> {
    let strings: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
    let [.., rule, spec] = strings.as_slice() else {
        return Err(cx.fail(
            DiagnosticKind::ExtensionFailed,
            "expected a rule name and a pattern",
        ));
    };
    let (rule, spec) = (rule.to_string(), spec.to_string());

    if let Err(e) = cx.extend(&rule, &spec, None) {
        return Err(cx.fail(DiagnosticKind::ExtensionFailed, e.to_string()));
    }

    Ok(Value::Object(vec![
        ("rule".to_owned(), Value::String(rule)),
        ("pattern".to_owned(), Value::String(spec)),
    ]))
}

fn join_text(values: &[Value]) -> String {
    let mut words = Vec::new();
    collect_text(values, &mut words);
    words.join(" ")
}

fn collect_text<'v>(values: &'v [Value], out: &mut Vec<&'v str>) {
    for value in values {
        match value {
            Value::String(s) => out.push(s),
            Value::Array(items) | Value::List(items) => collect_text(items, out),
            Value::Tagged { data: Some(d), .. } => collect_text(std::slice::from_ref(d.as_ref()), out),
            Value::Object(fields) => {
                for (_, v) in fields {
                    collect_text(std::slice::from_ref(v), out);
                }
            }
            Value::Null | Value::Tagged { data: None, .. } => {}
        }
    }
}
