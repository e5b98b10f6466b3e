use super::{python, SubError, SubValidator};
use crate::loader::Node;

/// Shape checks for `show if`-family modifiers, outside any screen context.
///
/// Three accepted shapes: a bare variable-name string, a
/// `{variable: name, is: value}` mapping, or a `{code: source}` mapping.
/// Whether a referenced variable exists on the screen is a separate,
/// scope-aware check; only the shape and embedded code syntax are judged
/// here.
pub struct ConditionShape;

impl SubValidator for ConditionShape {
    fn validate(&self, value: &Node) -> Vec<SubError> {
        if let Some(text) = value.as_str() {
            return check_shorthand(text);
        }
        if value.as_mapping().is_some() {
            return check_mapping(value);
        }
        // Other value types are left to the interview engine.
        Vec::new()
    }
}

pub(crate) fn check_shorthand(text: &str) -> Vec<SubError> {
    if text.starts_with("variable:") || text.starts_with("code:") {
        return vec![SubError::here(format!(
            "condition \"{text}\" appears to be malformed. Use mapping \
             syntax: {{ variable: var_name, is: value }} or {{ code: ... }}"
        ))];
    }
    Vec::new()
}

pub(crate) fn check_mapping(value: &Node) -> Vec<SubError> {
    if value.has_key("variable") {
        // Scope-aware validation happens against the screen's field list.
        return Vec::new();
    }
    if let Some(code) = value.get("code") {
        let Some(source) = code.as_str() else {
            return vec![SubError::here("condition code must be a YAML string")];
        };
        return match python::module_syntax_error(source) {
            Some((message, line)) => vec![SubError::new(
                format!("condition code has a syntax error: {message}"),
                line,
            )],
            None => Vec::new(),
        };
    }
    vec![SubError::here(
        "condition mapping must have either a \"variable\" key or a \"code\" key",
    )]
}
