//! Block classification and exclusivity resolution.
//!
//! A block's candidate kinds are the kind names that appear among its keys,
//! in kind-table order. Most kinds are exclusive: two of them in one block
//! is an authoring error unless the pair is an allowed partnership
//! (a `question` with its `attachment`, a `template` with its `terms`).

use crate::loader::ParsedBlock;
use crate::schema::{BlockKindSpec, BLOCK_KINDS};

/// A heuristic classification finding for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// None of the block's keys names a known kind.
    NoPossibleKind { keys: Vec<String> },
    /// More than one exclusive kind matched without a partner relationship.
    AmbiguousKinds { kinds: Vec<&'static str> },
}

impl ClassifyError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NoPossibleKind { keys } => {
                format!(
                    "no recognized block kind among keys: {}",
                    keys.join(", ")
                )
            }
            Self::AmbiguousKinds { kinds } => {
                format!(
                    "block could be more than one kind: {}",
                    kinds.join(", ")
                )
            }
        }
    }
}

/// The kinds whose names appear as keys of the block, in table order.
///
/// Kind candidacy is case-sensitive, unlike vocabulary membership: a kind
/// key spelled with different case never activates the kind's rules.
#[must_use]
pub fn candidate_kinds(block: &ParsedBlock) -> Vec<&'static BlockKindSpec> {
    BLOCK_KINDS
        .iter()
        .filter(|spec| block.get(spec.name).is_some())
        .collect()
}

/// Resolve a block's kind, reporting ambiguity and unclassifiable blocks.
#[must_use]
pub fn resolve(block: &ParsedBlock) -> Vec<ClassifyError> {
    let mut errors = Vec::new();

    let candidates = candidate_kinds(block);
    if candidates.is_empty() {
        let keys = block
            .entries
            .iter()
            .map(|(k, _)| k.key_display())
            .collect();
        errors.push(ClassifyError::NoPossibleKind { keys });
    }

    let exclusive: Vec<&BlockKindSpec> =
        candidates.into_iter().filter(|spec| spec.exclusive).collect();
    if exclusive.len() > 1 {
        // Exactly two kinds are fine when the second is a declared partner
        // of the first; the check is asymmetric on purpose.
        let partnered =
            exclusive.len() == 2 && exclusive[0].partners.contains(&exclusive[1].name);
        if !partnered {
            errors.push(ClassifyError::AmbiguousKinds {
                kinds: exclusive.iter().map(|spec| spec.name).collect(),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_fragment, LoadOutcome};

    fn block(text: &str) -> ParsedBlock {
        match load_fragment(text) {
            Ok(LoadOutcome::Block(block)) => block,
            other => panic!("expected a block, got {other:?}"),
        }
    }

    #[test]
    fn test_single_kind_resolves_cleanly() {
        assert!(resolve(&block("question: q\nfields: []\n")).is_empty());
        assert!(resolve(&block("code: |\n  x = 1\n")).is_empty());
    }

    #[test]
    fn test_no_possible_kind() {
        let errors = resolve(&block("subquestion: text\n"));
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ClassifyError::NoPossibleKind { keys } => {
                assert_eq!(keys, &["subquestion".to_string()]);
            }
            other => panic!("expected NoPossibleKind, got {other:?}"),
        }
    }

    #[test]
    fn test_question_and_template_are_ambiguous() {
        let errors = resolve(&block("question: q\ntemplate: some_var\n"));
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ClassifyError::AmbiguousKinds { kinds } => {
                assert_eq!(kinds, &["template", "question"]);
            }
            other => panic!("expected AmbiguousKinds, got {other:?}"),
        }
    }

    #[test]
    fn test_partnered_pairs_are_allowed() {
        assert!(resolve(&block("question: q\nterms:\n  term: def\n")).is_empty());
        assert!(resolve(&block("template: t\nterms:\n  term: def\n")).is_empty());
        assert!(resolve(&block("question: q\nattachment:\n  name: a\n")).is_empty());
    }

    #[test]
    fn test_question_and_code_are_ambiguous() {
        let errors = resolve(&block("question: q\ncode: |\n  x = 1\n"));
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ClassifyError::AmbiguousKinds { kinds } if kinds.len() == 2));
    }

    #[test]
    fn test_three_kinds_not_excused_by_partners() {
        let errors = resolve(&block(
            "question: q\nterms:\n  term: def\ntemplate: t\n",
        ));
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ClassifyError::AmbiguousKinds { kinds } => assert_eq!(kinds.len(), 3),
            other => panic!("expected AmbiguousKinds, got {other:?}"),
        }
    }

    #[test]
    fn test_comment_never_conflicts() {
        assert!(resolve(&block("question: q\ncomment: a note\n")).is_empty());
    }

    #[test]
    fn test_kind_match_is_case_sensitive() {
        // "Question" is in the vocabulary (case-insensitively) but does not
        // activate the question kind.
        let errors = resolve(&block("Question: q\n"));
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ClassifyError::NoPossibleKind { .. }));
    }
}
