use super::{python, SubError, SubValidator};
use crate::loader::Node;

/// Interview template text.
///
/// The dialect has two constructs with embedded host-language code:
/// `${ expression }` substitutions and `%`-prefixed control lines
/// (`% if c:`, `% for x in y:`, `% endif`, ...). The frame is checked here;
/// every embedded expression is delegated to the host-language parser.
/// Errors carry the 1-based line within the template value.
pub struct TemplateText;

impl SubValidator for TemplateText {
    fn validate(&self, value: &Node) -> Vec<SubError> {
        let Some(text) = value.as_str() else {
            return vec![SubError::here(format!(
                "template text must be a YAML string, is {}",
                value.describe()
            ))];
        };
        let mut errors = check_expressions(text);
        errors.extend(check_control_lines(text));
        errors.sort_by_key(|e| e.line);
        errors
    }
}

/// Scan for `${ ... }` substitutions and validate each body.
fn check_expressions(text: &str) -> Vec<SubError> {
    let mut errors = Vec::new();
    let bytes = text.as_bytes();
    let mut line = 1usize;
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] == b'\n' {
            line += 1;
            i += 1;
            continue;
        }
        if bytes[i] == b'$' && i + 1 < bytes.len() && bytes[i + 1] == b'{' {
            let Some(end) = text[i + 2..].find('}') else {
                errors.push(SubError::new("unterminated ${ ... } expression", line));
                break;
            };
            let body = &text[i + 2..i + 2 + end];
            if body.trim().is_empty() {
                errors.push(SubError::new("empty ${ ... } expression", line));
            } else if let Some((message, _)) = python::expression_syntax_error(body.trim()) {
                errors.push(SubError::new(
                    format!("template expression is not valid: {message}"),
                    line,
                ));
            }
            line += body.bytes().filter(|&b| b == b'\n').count();
            i += 2 + end + 1;
            continue;
        }
        i += 1;
    }

    errors
}

/// Validate `%`-prefixed control lines. `%%` escapes a literal percent.
fn check_control_lines(text: &str) -> Vec<SubError> {
    let mut errors = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim_start();
        if !trimmed.starts_with('%') || trimmed.starts_with("%%") {
            continue;
        }
        let body = trimmed[1..].trim();
        if let Some(message) = check_control_line(body) {
            errors.push(SubError::new(message, idx + 1));
        }
    }
    errors
}

fn check_control_line(body: &str) -> Option<String> {
    if body.is_empty() {
        return Some("empty '%' control line".to_string());
    }
    let keyword = body
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(':');
    match keyword {
        "if" | "elif" | "for" | "while" => {
            if !body.ends_with(':') {
                return Some(format!("'% {keyword}' line must end with ':'"));
            }
            // An `elif` cannot stand alone, so parse it as an `if`.
            let statement = if keyword == "elif" {
                format!("if{} pass", &body[4..])
            } else {
                format!("{body} pass")
            };
            python::module_syntax_error(&statement)
                .map(|(message, _)| format!("invalid '% {keyword}' condition: {message}"))
        }
        "else" => {
            if body == "else:" {
                None
            } else {
                Some("'% else' line must be '% else:'".to_string())
            }
        }
        "endif" | "endfor" | "endwhile" => None,
        other => Some(format!("unknown template control keyword '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{NodeValue, Scalar};

    fn string_node(s: &str) -> Node {
        Node {
            value: NodeValue::Scalar(Scalar::Str(s.into())),
            line: 1,
        }
    }

    fn check(s: &str) -> Vec<SubError> {
        TemplateText.validate(&string_node(s))
    }

    #[test]
    fn test_plain_text_passes() {
        assert!(check("What is your name?\n").is_empty());
    }

    #[test]
    fn test_substitutions_pass() {
        assert!(check("Hello ${ user.name }, you owe ${ total * 2 }.\n").is_empty());
    }

    #[test]
    fn test_bad_expression_reports_its_line() {
        let errors = check("Intro line\nHello ${ user. }\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert!(errors[0].message.contains("template expression"));
    }

    #[test]
    fn test_unterminated_expression() {
        let errors = check("Hello ${ user.name\nbye\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert!(errors[0].message.contains("unterminated"));
    }

    #[test]
    fn test_control_lines_pass() {
        let text = "% if user.minor:\nA guardian must sign.\n% else:\nSign below.\n% endif\n";
        assert!(check(text).is_empty());
    }

    #[test]
    fn test_for_loop_passes() {
        assert!(check("% for item in items:\n* ${ item }\n% endfor\n").is_empty());
    }

    #[test]
    fn test_missing_colon_on_control_line() {
        let errors = check("% if user.minor\ntext\n% endif\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert!(errors[0].message.contains("must end with ':'"));
    }

    #[test]
    fn test_unknown_control_keyword() {
        let errors = check("ok\n% frob x\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert!(errors[0].message.contains("unknown template control keyword"));
    }

    #[test]
    fn test_escaped_percent_is_literal() {
        assert!(check("%% not a control line\n").is_empty());
    }

    #[test]
    fn test_non_string_value() {
        let errors = TemplateText.validate(&Node {
            value: NodeValue::Scalar(Scalar::Int(5)),
            line: 1,
        });
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("must be a YAML string"));
    }
}
