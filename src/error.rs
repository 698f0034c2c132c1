// Errors raised while attaching the field to a page. None of these reach a
// running frame: a field that fails to attach stays detached and every later
// call on it does nothing.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    // The canvas has no 2D rendering context, or is bound to another type
    NoContext,
    // A DOM call threw
    Js(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NoContext => write!(f, "canvas has no 2d rendering context"),
            FieldError::Js(msg) => write!(f, "DOM call failed: {}", msg),
        }
    }
}

impl std::error::Error for FieldError {}

impl From<JsValue> for FieldError {
    fn from(value: JsValue) -> Self {
        FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(FieldError::NoContext.to_string(), "canvas has no 2d rendering context");
        assert_eq!(FieldError::Js("boom".into()).to_string(), "DOM call failed: boom");
    }
}
