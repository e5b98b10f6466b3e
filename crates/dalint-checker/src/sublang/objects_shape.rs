use super::{SubError, SubValidator};
use crate::loader::Node;

/// The `objects` declaration: a sequence of `name: Type` entries or a
/// single mapping.
pub struct ObjectsShape;

impl SubValidator for ObjectsShape {
    fn validate(&self, value: &Node) -> Vec<SubError> {
        if value.as_sequence().is_some() || value.as_mapping().is_some() {
            Vec::new()
        } else {
            vec![SubError::here(format!(
                "objects block needs to be a sequence or a mapping, is {}",
                value.describe()
            ))]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_fragment, LoadOutcome, Node};

    fn value_of(text: &str) -> Node {
        match load_fragment(text) {
            Ok(LoadOutcome::Block(block)) => block.get("objects").cloned().unwrap(),
            other => panic!("expected a block, got {other:?}"),
        }
    }

    #[test]
    fn test_sequence_and_mapping_pass() {
        assert!(ObjectsShape
            .validate(&value_of("objects:\n  - user: Individual\n"))
            .is_empty());
        assert!(ObjectsShape
            .validate(&value_of("objects:\n  user: Individual\n"))
            .is_empty());
    }

    #[test]
    fn test_scalar_fails() {
        let errors = ObjectsShape.validate(&value_of("objects: user\n"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert!(errors[0].message.contains("sequence or a mapping"));
    }
}
