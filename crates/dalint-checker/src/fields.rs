//! Screen-scope validation for a block's field list.
//!
//! Variables referenced by the shorthand `show if`/`hide if` forms must be
//! defined by a field on the same screen: the interview engine evaluates
//! those forms in the browser, before anything defined later or elsewhere
//! exists. The `code` form runs under full interpreter semantics with the
//! whole accumulated variable store, so it may reference anything.
//!
//! Validation is two distinct passes: the scope is the *whole* screen, so
//! an earlier field may reference a variable introduced by a later field.

use crate::loader::{Node, ParsedBlock};
use crate::schema::ContentKind;
use crate::sublang::{python, validator_for};
use dalint_types::ValidationError;
use std::collections::HashSet;

/// Keys that can never hold a field's variable name.
const RESERVED_FIELD_KEYS: &[&str] = &[
    "default",
    "default value",
    "hint",
    "help",
    "label",
    "datatype",
    "choices",
    "validation code",
    "show if",
    "hide if",
    "js show if",
    "js hide if",
    "enable if",
    "disable if",
    "js enable if",
    "js disable if",
];

/// Modifiers that make a field conditionally hidden.
const SHOW_HIDE_KEYS: &[&str] = &["show if", "hide if", "js show if", "js hide if"];

const JS_MODIFIERS: &[&str] = &["js show if", "js hide if", "js enable if", "js disable if"];

const CONDITION_MODIFIERS: &[&str] = &["show if", "hide if"];

/// The variable names a field list introduces on its screen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScreenScope {
    /// Every variable defined by a field on this screen.
    pub variables: HashSet<String>,
    /// The subset whose fields are conditionally shown or hidden.
    pub hidden: HashSet<String>,
}

/// Pass 1: collect the screen's variable names and the hidden subset.
#[must_use]
pub fn collect_scope(field_entries: &[Node]) -> ScreenScope {
    let mut scope = ScreenScope::default();
    for entry in field_entries {
        let Some(name) = field_variable_name(entry) else {
            continue;
        };
        scope.variables.insert(name.to_string());
        if SHOW_HIDE_KEYS.iter().any(|key| entry.has_key(key)) {
            scope.hidden.insert(name.to_string());
        }
    }
    scope
}

/// The field's variable name: the first string value whose key is not a
/// reserved modifier or metadata key.
fn field_variable_name(entry: &Node) -> Option<&str> {
    entry.as_mapping()?.iter().find_map(|(key, value)| {
        let name = value.as_str()?;
        if RESERVED_FIELD_KEYS.contains(&key.key_display().as_str()) {
            None
        } else {
            Some(name)
        }
    })
}

/// Validate one block's `fields` value.
///
/// `line_offset` is the enclosing fragment's absolute first line; scope
/// findings land on the block's absolute line, and embedded code findings
/// additionally carry the native line within the code.
#[must_use]
pub fn validate_field_list(
    block: &ParsedBlock,
    fields_value: &Node,
    line_offset: usize,
    file: &str,
) -> Vec<ValidationError> {
    let base_line = line_offset + block.start_line;

    let Some(field_entries) = fields_value.as_sequence() else {
        return vec![ValidationError::heuristic(
            format!(
                "fields must be a sequence of field entries, is {}",
                fields_value.describe()
            ),
            base_line,
            file,
        )];
    };

    let scope = collect_scope(field_entries);
    let mut errors = Vec::new();

    for entry in field_entries {
        if entry.as_mapping().is_none() {
            continue;
        }

        for key in JS_MODIFIERS {
            if let Some(value) = entry.get(key) {
                let validator = validator_for(ContentKind::JsCondition);
                for sub in validator.validate(value) {
                    errors.push(ValidationError::heuristic(
                        format!("{key}: {}", sub.message),
                        base_line,
                        file,
                    ));
                }
            }
        }

        for key in CONDITION_MODIFIERS {
            if let Some(value) = entry.get(key) {
                check_condition_modifier(key, value, &scope, base_line, file, &mut errors);
            }
        }
    }

    errors
}

fn check_condition_modifier(
    key: &str,
    value: &Node,
    scope: &ScreenScope,
    base_line: usize,
    file: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(text) = value.as_str() {
        if !text.contains(':') {
            // Shorthand form: the name must belong to this screen.
            if !scope.variables.contains(text) {
                errors.push(not_defined_error(key, text, base_line, file));
            }
        } else if text.starts_with("variable:") || text.starts_with("code:") {
            errors.push(ValidationError::heuristic(
                format!(
                    "{key}: \"{text}\" appears to be malformed. Use mapping syntax: \
                     {key}: {{ variable: var_name, is: value }} or {key}: {{ code: ... }}"
                ),
                base_line,
                file,
            ));
        }
        return;
    }

    if value.as_mapping().is_none() {
        return;
    }

    let has_code = value.has_key("code");
    if let Some(variable) = value.get("variable") {
        if !has_code {
            match variable.as_str() {
                Some(name) => {
                    if !scope.variables.contains(name) {
                        errors.push(not_defined_error(key, name, base_line, file));
                    }
                }
                None => errors.push(ValidationError::heuristic(
                    format!(
                        "{key}: variable must be a YAML string, is {}",
                        variable.describe()
                    ),
                    base_line,
                    file,
                )),
            }
            return;
        }
    }

    if let Some(code) = value.get("code") {
        // The code form may reference variables from any screen.
        match code.as_str() {
            Some(source) => {
                if let Some((message, line)) = python::module_syntax_error(source) {
                    errors.push(ValidationError::heuristic(
                        format!("{key}: code has a syntax error: {message}"),
                        base_line + line,
                        file,
                    ));
                }
            }
            None => errors.push(ValidationError::heuristic(
                format!("{key}: code must be a YAML string"),
                base_line,
                file,
            )),
        }
        return;
    }

    errors.push(ValidationError::heuristic(
        format!("{key} mapping must have either a \"variable\" key or a \"code\" key"),
        base_line,
        file,
    ));
}

fn not_defined_error(key: &str, name: &str, line: usize, file: &str) -> ValidationError {
    ValidationError::heuristic(
        format!(
            "{key}: {name} is not defined on this screen. Use \
             {key}: {{ code: ... }} instead for variables from previous screens"
        ),
        line,
        file,
    )
}
