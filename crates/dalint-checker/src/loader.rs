//! Line-mapped YAML loading.
//!
//! The loader consumes the marked event stream of one fragment and builds a
//! [`Node`] tree in which every node remembers the 1-based line (relative to
//! the fragment) where it starts. Duplicate scalar keys are rejected at
//! parse time: last-value-wins would silently hide authoring mistakes.
//!
//! A block's start line lives on [`ParsedBlock::start_line`], not inside the
//! mapping, so key iteration only ever sees the author's keys.

use std::collections::{HashMap, HashSet};
use thiserror::Error;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

/// A YAML scalar after plain-scalar resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
}

/// One node of a loaded fragment, with its fragment-relative start line.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: NodeValue,
    /// 1-based line within the fragment where this node starts.
    pub line: usize,
}

impl Node {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.value {
            NodeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&[(Node, Node)]> {
        match &self.value {
            NodeValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a mapping entry by exact string key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The display form of a scalar node used as a mapping key.
    ///
    /// Non-scalar keys render as a shape description; they are never valid
    /// block keys and surface through the unknown-key check.
    #[must_use]
    pub fn key_display(&self) -> String {
        match &self.value {
            NodeValue::Scalar(Scalar::Str(s)) => s.clone(),
            NodeValue::Scalar(Scalar::Null) => "null".to_string(),
            NodeValue::Scalar(Scalar::Bool(b)) => b.to_string(),
            NodeValue::Scalar(Scalar::Int(i)) => i.to_string(),
            NodeValue::Scalar(Scalar::Float(f)) => f.to_string(),
            NodeValue::Sequence(_) => "<sequence>".to_string(),
            NodeValue::Mapping(_) => "<mapping>".to_string(),
        }
    }

    /// A short rendering for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.value {
            NodeValue::Scalar(Scalar::Str(s)) => format!("\"{s}\""),
            NodeValue::Scalar(_) => self.key_display(),
            NodeValue::Sequence(_) => "a sequence".to_string(),
            NodeValue::Mapping(_) => "a mapping".to_string(),
        }
    }
}

/// One successfully loaded block: the root mapping of a fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBlock {
    /// 1-based line within the fragment where the first key appears.
    pub start_line: usize,
    pub entries: Vec<(Node, Node)>,
}

impl ParsedBlock {
    /// Look up a top-level entry by exact string key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }
}

/// What a fragment loaded into.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No document content (comments or whitespace only).
    Empty,
    Block(ParsedBlock),
    /// A document whose root is a scalar or sequence; it cannot be a block.
    NotAMapping { line: usize },
}

/// Fatal parse failure for one fragment.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("found duplicate key \"{key}\" in mapping")]
    DuplicateKey {
        key: String,
        /// Fragment-relative line of the second occurrence.
        line: usize,
    },
    #[error("invalid YAML: {0}")]
    Scan(#[from] ScanError),
}

/// Parse one fragment into a block, detecting duplicate keys as they are
/// inserted.
pub fn load_fragment(text: &str) -> Result<LoadOutcome, LoadError> {
    let mut parser = Parser::new_from_str(text);
    let mut builder = TreeBuilder::default();
    let scan_result = parser.load(&mut builder, false);

    // A duplicate key found while building takes precedence: it is the
    // parse failure the author needs to see first.
    if let Some((key, line)) = builder.duplicate {
        return Err(LoadError::DuplicateKey { key, line });
    }
    scan_result?;

    match builder.root {
        None => Ok(LoadOutcome::Empty),
        Some(Node {
            value: NodeValue::Mapping(entries),
            line,
        }) => Ok(LoadOutcome::Block(ParsedBlock {
            start_line: line,
            entries,
        })),
        Some(node) => Ok(LoadOutcome::NotAMapping { line: node.line }),
    }
}

enum Container {
    Sequence {
        items: Vec<Node>,
        line: usize,
        anchor: usize,
    },
    Mapping {
        entries: Vec<(Node, Node)>,
        seen_keys: HashSet<String>,
        pending_key: Option<Node>,
        line: usize,
        anchor: usize,
    },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Container>,
    root: Option<Node>,
    anchors: HashMap<usize, Node>,
    /// First duplicate key observed: (key text, line of second occurrence).
    duplicate: Option<(String, usize)>,
}

impl TreeBuilder {
    fn insert(&mut self, node: Node, raw_scalar: Option<&str>) {
        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some(Container::Sequence { items, .. }) => items.push(node),
            Some(Container::Mapping {
                entries,
                seen_keys,
                pending_key,
                ..
            }) => {
                if let Some(key) = pending_key.take() {
                    entries.push((key, node));
                } else {
                    // Only scalar keys are checked for duplicates; complex
                    // keys never appear in interview files.
                    if let Some(raw) = raw_scalar {
                        if !seen_keys.insert(raw.to_string()) && self.duplicate.is_none() {
                            self.duplicate = Some((raw.to_string(), node.line));
                        }
                    }
                    *pending_key = Some(node);
                }
            }
        }
    }

    fn finish_container(&mut self, container: Container) {
        let (node, anchor) = match container {
            Container::Sequence { items, line, anchor } => (
                Node {
                    value: NodeValue::Sequence(items),
                    line,
                },
                anchor,
            ),
            Container::Mapping {
                entries, line, anchor, ..
            } => (
                Node {
                    value: NodeValue::Mapping(entries),
                    line,
                },
                anchor,
            ),
        };
        if anchor != 0 {
            self.anchors.insert(anchor, node.clone());
        }
        self.insert(node, None);
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        match ev {
            Event::Scalar(value, style, anchor, _) => {
                let node = Node {
                    value: NodeValue::Scalar(resolve_scalar(&value, style)),
                    line: mark.line(),
                };
                if anchor != 0 {
                    self.anchors.insert(anchor, node.clone());
                }
                self.insert(node, Some(&value));
            }
            Event::SequenceStart(anchor, _) => {
                self.stack.push(Container::Sequence {
                    items: Vec::new(),
                    line: mark.line(),
                    anchor,
                });
            }
            Event::MappingStart(anchor, _) => {
                self.stack.push(Container::Mapping {
                    entries: Vec::new(),
                    seen_keys: HashSet::new(),
                    pending_key: None,
                    line: mark.line(),
                    anchor,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                if let Some(container) = self.stack.pop() {
                    self.finish_container(container);
                }
            }
            Event::Alias(id) => {
                let node = self.anchors.get(&id).cloned().unwrap_or(Node {
                    value: NodeValue::Scalar(Scalar::Null),
                    line: mark.line(),
                });
                self.insert(node, None);
            }
            _ => {}
        }
    }
}

/// Resolve a plain scalar to its core-schema type; quoted and block scalars
/// are always strings.
fn resolve_scalar(value: &str, style: TScalarStyle) -> Scalar {
    if style != TScalarStyle::Plain {
        return Scalar::Str(value.to_string());
    }
    match value {
        "" | "~" | "null" | "Null" | "NULL" => Scalar::Null,
        "true" | "True" | "TRUE" => Scalar::Bool(true),
        "false" | "False" | "FALSE" => Scalar::Bool(false),
        _ => {
            if let Ok(i) = value.parse::<i64>() {
                Scalar::Int(i)
            } else if let Ok(f) = value.parse::<f64>() {
                Scalar::Float(f)
            } else {
                Scalar::Str(value.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_block(text: &str) -> ParsedBlock {
        match load_fragment(text) {
            Ok(LoadOutcome::Block(block)) => block,
            other => panic!("expected a block, got {other:?}"),
        }
    }

    #[test]
    fn test_block_start_line_is_first_key() {
        let block = load_block("question: hello\nfields: []\n");
        assert_eq!(block.start_line, 1);

        let block = load_block("\n\nquestion: hello\n");
        assert_eq!(block.start_line, 3);
    }

    #[test]
    fn test_start_line_is_not_a_key() {
        let block = load_block("question: hello\n");
        assert_eq!(block.entries.len(), 1);
        assert_eq!(block.entries[0].0.as_str(), Some("question"));
    }

    #[test]
    fn test_duplicate_key_reports_second_occurrence_line() {
        let err = load_fragment("question: one\nfields: []\nquestion: two\n")
            .expect_err("duplicate key must fail");
        match err {
            LoadError::DuplicateKey { key, line } => {
                assert_eq!(key, "question");
                assert_eq!(line, 3);
            }
            other => panic!("expected duplicate key error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_key_in_nested_mapping() {
        let err = load_fragment("show if:\n  code: a\n  code: b\n")
            .expect_err("duplicate key must fail");
        match err {
            LoadError::DuplicateKey { key, line } => {
                assert_eq!(key, "code");
                assert_eq!(line, 3);
            }
            other => panic!("expected duplicate key error, got {other:?}"),
        }
    }

    #[test]
    fn test_comments_only_fragment_is_empty() {
        assert_eq!(
            load_fragment("# a comment\n# another\n").unwrap(),
            LoadOutcome::Empty
        );
        assert_eq!(load_fragment("").unwrap(), LoadOutcome::Empty);
    }

    #[test]
    fn test_sequence_root_is_not_a_mapping() {
        match load_fragment("- a\n- b\n").unwrap() {
            LoadOutcome::NotAMapping { line } => assert_eq!(line, 1),
            other => panic!("expected NotAMapping, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_resolution() {
        let block = load_block(
            "a: yes_text\nb: true\nc: 3\nd: 3.5\ne: ~\nf: \"true\"\n",
        );
        assert_eq!(block.get("a").unwrap().as_str(), Some("yes_text"));
        assert_eq!(
            block.get("b").unwrap().value,
            NodeValue::Scalar(Scalar::Bool(true))
        );
        assert_eq!(
            block.get("c").unwrap().value,
            NodeValue::Scalar(Scalar::Int(3))
        );
        assert_eq!(
            block.get("d").unwrap().value,
            NodeValue::Scalar(Scalar::Float(3.5))
        );
        assert_eq!(
            block.get("e").unwrap().value,
            NodeValue::Scalar(Scalar::Null)
        );
        // Quoting forces a string.
        assert_eq!(block.get("f").unwrap().as_str(), Some("true"));
    }

    #[test]
    fn test_block_scalar_keeps_lines() {
        let block = load_block("question: |\n  line one\n  line two\nmandatory: true\n");
        assert_eq!(
            block.get("question").unwrap().as_str(),
            Some("line one\nline two\n")
        );
    }

    #[test]
    fn test_nested_mapping_lines() {
        let block = load_block("question: q\nfields:\n  - name: x\n");
        let fields = block.get("fields").unwrap().as_sequence().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].line, 3);
        assert_eq!(fields[0].get("name").unwrap().as_str(), Some("x"));
    }

    #[test]
    fn test_anchor_and_alias_resolve() {
        let block = load_block("a: &x hello\nb: *x\n");
        assert_eq!(block.get("b").unwrap().as_str(), Some("hello"));
    }

    #[test]
    fn test_scan_error_surfaces() {
        let err = load_fragment("question: [unclosed\n").expect_err("must fail");
        assert!(matches!(err, LoadError::Scan(_)));
    }
}
