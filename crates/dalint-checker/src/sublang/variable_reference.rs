use super::{SubError, SubValidator};
use crate::loader::Node;
use regex::Regex;
use std::sync::LazyLock;

/// Spaces are tolerated only inside an embedded quoted segment, as in
/// `x.y['spaced key']`.
static SPACE_INSIDE_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^ ]*['"].* .*['"][^ ]*$"#).unwrap());

/// A variable reference such as `user_name` or `x.y['a']` — the value of
/// keys like `field`, `def`, `yesno`, `generic object`.
pub struct VariableReference;

impl SubValidator for VariableReference {
    fn validate(&self, value: &Node) -> Vec<SubError> {
        let Some(text) = value.as_str() else {
            return vec![SubError::here(format!(
                "the variable needs to be a YAML string, is {}",
                value.describe()
            ))];
        };
        if text.contains(' ') && !SPACE_INSIDE_QUOTES.is_match(text) {
            return vec![SubError::here(format!(
                "the variable cannot have whitespace (is \"{text}\")"
            ))];
        }
        Vec::new()
    }
}
