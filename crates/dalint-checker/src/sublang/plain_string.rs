use super::{SubError, SubValidator};
use crate::loader::Node;

/// The value must be a direct YAML string, not a sequence or mapping.
pub struct PlainString;

impl SubValidator for PlainString {
    fn validate(&self, value: &Node) -> Vec<SubError> {
        if value.as_str().is_some() {
            Vec::new()
        } else {
            vec![SubError::here(format!("{} isn't a string", value.describe()))]
        }
    }
}
