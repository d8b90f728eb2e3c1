use std::fmt;
use std::rc::Rc;

use super::element::Element;
use super::value::Value;
use crate::engine::{ActionContext, Unwind};

/// Semantic action: receives the collected element values in pattern order.
pub type Action = Rc<dyn Fn(&mut ActionContext<'_>, Vec<Value>) -> Result<Value, Unwind>>;

/// One alternative of a rule. Immutable once added.
pub struct Pattern {
    elements: Vec<Element>,
    action: Option<Action>,
}

impl Pattern {
    pub fn new(elements: Vec<Element>, action: Option<Action>) -> Self {
        Self { elements, action }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Run the action, or fall back to the default result: the single value
    /// when exactly one was collected, an array otherwise.
    pub(crate) fn reduce(
        &self,
        cx: &mut ActionContext<'_>,
        mut values: Vec<Value>,
    ) -> Result<Value, Unwind> {
        match &self.action {
            Some(action) => action(cx, values),
            None if values.len() == 1 => Ok(values.pop().unwrap_or_default()),
            None => Ok(Value::Array(values)),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("elements", &self.elements)
            .field("action", &self.action.as_ref().map(|_| ".."))
            .finish()
    }
}
