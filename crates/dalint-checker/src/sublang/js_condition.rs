use super::{SubError, SubValidator};
use crate::loader::Node;
use regex::Regex;
use std::sync::LazyLock;

/// `${ ... }` template spans inside the expression. They are rendered
/// server-side before the expression ever reaches the client, so they are
/// neutralized with a harmless literal before syntax checking.
static TEMPLATE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\{[^}]*\}").unwrap());

/// `val(...)` calls whose argument starts like a bare identifier. Quoted
/// arguments never match because the first character class excludes quotes.
static VAL_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"val\s*\(\s*([A-Za-z_][A-Za-z0-9_.\[\]'"]*)\s*\)"#).unwrap()
});

/// Client-side conditional expressions (`js show if` and friends).
///
/// The expression runs in the browser and reads on-screen fields through
/// the `val()` reference function, which takes the field's variable name as
/// a string literal. No fine-grained line mapping is attempted: every
/// finding lands on line 1 of the value.
pub struct JsCondition;

impl SubValidator for JsCondition {
    fn validate(&self, value: &Node) -> Vec<SubError> {
        let Some(text) = value.as_str() else {
            return vec![SubError::here(format!(
                "client-side condition must be a string, is {}",
                value.describe()
            ))];
        };

        let mut errors = Vec::new();
        let neutralized = TEMPLATE_SPAN.replace_all(text, "true");

        if !neutralized.contains("val(") {
            errors.push(SubError::here(
                "client-side condition must contain at least one val() call \
                 to reference an on-screen field",
            ));
        }

        for captures in VAL_CALL.captures_iter(&neutralized) {
            let argument = &captures[1];
            // A dot or bracket means a property/index access pattern, which
            // is left alone.
            if !argument.contains('.') && !argument.contains('[') {
                errors.push(SubError::here(format!(
                    "val() argument must be a quoted string literal, not \
                     \"{argument}\". Use val(\"{argument}\") instead"
                )));
            }
        }

        if let Some(message) = script_syntax_error(&neutralized) {
            errors.push(SubError::here(format!(
                "invalid JavaScript syntax: {message}"
            )));
        }

        errors
    }
}

/// Parse the text as an ECMAScript script and return the first error
/// message, if any.
fn script_syntax_error(source: &str) -> Option<String> {
    use swc_core::common::{sync::Lrc, FileName, SourceMap};
    use swc_core::ecma::ast::EsVersion;
    use swc_core::ecma::parser::{parse_file_as_script, EsSyntax, Syntax};

    let cm: Lrc<SourceMap> = Lrc::default();
    let fm = cm.new_source_file(Lrc::new(FileName::Anon), source.to_string());
    let mut recovered = Vec::new();
    let result = parse_file_as_script(
        &fm,
        Syntax::Es(EsSyntax::default()),
        EsVersion::latest(),
        None,
        &mut recovered,
    );
    match result {
        Ok(_) => recovered
            .into_iter()
            .next()
            .map(|err| err.into_kind().msg().to_string()),
        Err(err) => Some(err.into_kind().msg().to_string()),
    }
}
