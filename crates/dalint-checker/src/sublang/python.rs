//! Shared access to the scripting-language syntax engine.

use rustpython_parser::{parse, Mode};

/// Parse `source` and return the first syntax error as
/// `(message, 1-based line)`, or `None` if the source is well formed.
pub(crate) fn syntax_error(source: &str, mode: Mode) -> Option<(String, usize)> {
    match parse(source, mode, "<embedded>") {
        Ok(_) => None,
        Err(err) => {
            let offset = err.offset.to_usize().min(source.len());
            let line = source.as_bytes()[..offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count()
                + 1;
            Some((err.error.to_string(), line))
        }
    }
}

/// Syntax-check a multi-line statement block.
pub(crate) fn module_syntax_error(source: &str) -> Option<(String, usize)> {
    syntax_error(source, Mode::Module)
}

/// Syntax-check a single expression.
pub(crate) fn expression_syntax_error(source: &str) -> Option<(String, usize)> {
    syntax_error(source, Mode::Expression)
}
