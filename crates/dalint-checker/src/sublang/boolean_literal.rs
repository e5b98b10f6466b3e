use super::{SubError, SubValidator};
use crate::loader::Node;

/// Boolean-literal fields such as `mandatory`.
///
/// Intentionally permissive: the interview engine accepts several truthy
/// spellings (`True`, `true`, and expressions evaluated later), so the only
/// check is that the key exists at all.
pub struct BooleanLiteral;

impl SubValidator for BooleanLiteral {
    fn validate(&self, _value: &Node) -> Vec<SubError> {
        Vec::new()
    }
}
