use super::{python, SubError, SubValidator};
use crate::loader::Node;

/// A multi-line scripting-language code block, e.g. the body of a `code`
/// key. Parsing is delegated to the host language's syntax engine; the
/// error line is the native line within the block.
pub struct CodeBlock;

impl SubValidator for CodeBlock {
    fn validate(&self, value: &Node) -> Vec<SubError> {
        let Some(source) = value.as_str() else {
            return vec![SubError::here(format!(
                "code block must be a YAML string, is {}",
                value.describe()
            ))];
        };
        match python::module_syntax_error(source) {
            Some((message, line)) => {
                vec![SubError::new(format!("Python syntax error: {message}"), line)]
            }
            None => Vec::new(),
        }
    }
}
