//! Static rule tables: the recognized-key vocabulary, the content-type
//! column, and the ordered block-kind table.
//!
//! The tables are flat, immutable lookup structures. Kind resolution
//! depends on table *order* (see [`BLOCK_KINDS`]), so the kind table is an
//! ordered slice rather than a map.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Which sub-language validator applies to a key's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Must be a YAML string.
    PlainString,
    /// Interview template text (`${...}` substitutions, `%` control lines).
    Template,
    /// A scripting-language code block.
    CodeBlock,
    /// A boolean literal; intentionally unconstrained.
    BooleanLiteral,
    /// `show if`-family condition shapes (string shorthand or dict form).
    Condition,
    /// `js show if`-family client-side conditional expressions.
    JsCondition,
    /// A variable reference such as `user.name` or `items[0]`.
    VariableReference,
    /// The `objects` declaration: a sequence or a mapping.
    ObjectsShape,
}

/// Keys that carry a content-type validator, by lowercase key name.
const CONTENT_TYPES: &[(&str, ContentKind)] = &[
    ("question", ContentKind::Template),
    ("subquestion", ContentKind::Template),
    ("mako", ContentKind::Template),
    ("mandatory", ContentKind::BooleanLiteral),
    ("code", ContentKind::CodeBlock),
    ("objects", ContentKind::ObjectsShape),
    ("id", ContentKind::PlainString),
    ("ga id", ContentKind::PlainString),
    ("segment id", ContentKind::PlainString),
    ("continue button label", ContentKind::PlainString),
    ("field", ContentKind::VariableReference),
    ("def", ContentKind::VariableReference),
    ("generic object", ContentKind::VariableReference),
    ("yesno", ContentKind::VariableReference),
    ("noyes", ContentKind::VariableReference),
    ("yesnomaybe", ContentKind::VariableReference),
    ("noyesmaybe", ContentKind::VariableReference),
    ("continue button field", ContentKind::VariableReference),
    ("show if", ContentKind::Condition),
    ("hide if", ContentKind::Condition),
    ("enable if", ContentKind::Condition),
    ("disable if", ContentKind::Condition),
    ("js show if", ContentKind::JsCondition),
    ("js hide if", ContentKind::JsCondition),
    ("js enable if", ContentKind::JsCondition),
    ("js disable if", ContentKind::JsCondition),
];

/// Look up the content-type validator for a key (case-insensitive).
#[must_use]
pub fn content_kind(key: &str) -> Option<ContentKind> {
    let key = key.to_lowercase();
    CONTENT_TYPES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
}

/// Every key the interview engine understands, in any block shape.
///
/// Membership is checked case-insensitively; anything absent is an
/// unknown-key error regardless of its value.
const RECOGNIZED_KEYS: &[&str] = &[
    "features",
    "scan for variables",
    "only sets",
    "question",
    "code",
    "event",
    "translations",
    "default language",
    "on change",
    "sections",
    "progressive",
    "auto open",
    "section",
    "machine learning storage",
    "language",
    "prevent going back",
    "back button",
    "usedefs",
    "continue button label",
    "continue button color",
    "resume button label",
    "resume button color",
    "back button label",
    "corner back button label",
    "skip undefined",
    "list collect",
    "mandatory",
    "attachment options",
    "script",
    "css",
    "initial",
    "default role",
    "command",
    "objects from file",
    "use objects",
    "data",
    "variable name",
    "data from code",
    "objects",
    "id",
    "ga id",
    "segment id",
    "segment",
    "supersedes",
    "order",
    "image sets",
    "images",
    "def",
    "mako",
    "interview help",
    "default screen parts",
    "default validation messages",
    "generic object",
    "generic list object",
    "comment",
    "metadata",
    "modules",
    "reset",
    "imports",
    "terms",
    "auto terms",
    "role",
    "include",
    "action buttons",
    "if",
    "validation code",
    "require",
    "orelse",
    "attachment",
    "attachments",
    "attachment code",
    "attachments code",
    "allow emailing",
    "allow downloading",
    "email subject",
    "email body",
    "email template",
    "email address default",
    "progress",
    "zip filename",
    "action",
    "backgroundresponse",
    "response",
    "binaryresponse",
    "all_variables",
    "response filename",
    "content type",
    "redirect url",
    "null response",
    "sleep",
    "include_internal",
    "css class",
    "table css class",
    "response code",
    "subquestion",
    "reload",
    "help",
    "audio",
    "video",
    "decoration",
    "signature",
    "under",
    "pre",
    "post",
    "right",
    "check in",
    "yesno",
    "noyes",
    "yesnomaybe",
    "noyesmaybe",
    "sets",
    "choices",
    "buttons",
    "dropdown",
    "combobox",
    "field",
    "shuffle",
    "review",
    "need",
    "depends on",
    "target",
    "table",
    "rows",
    "columns",
    "require gathered",
    "allow reordering",
    "edit",
    "delete buttons",
    "confirm",
    "read only",
    "edit header",
    "show if empty",
    "template",
    "content file",
    "content",
    "subject",
    "reconsider",
    "undefine",
    "continue button field",
    "fields",
    "indent",
    "url",
    "default",
    "datatype",
    "extras",
    "allowed to set",
    "show incomplete",
    "not available label",
    "required",
    "always include editable files",
    "question metadata",
    "include attachment notice",
    "include download tab",
    "describe file types",
    "manual attachment list",
    "breadcrumb",
    "tabular",
    "hide continue button",
    "disable continue button",
    "pen color",
    "gathered",
    "show if",
    "hide if",
    "js show if",
    "js hide if",
    "enable if",
    "disable if",
    "js enable if",
    "js disable if",
    "disable others",
    // Only present in non-question blocks such as tables.
    "filter",
    "sort key",
    "sort reverse",
];

static RECOGNIZED_KEY_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| RECOGNIZED_KEYS.iter().copied().collect());

/// Case-insensitive vocabulary membership.
#[must_use]
pub fn is_recognized_key(key: &str) -> bool {
    RECOGNIZED_KEY_SET.contains(key.to_lowercase().as_str())
}

/// The closest vocabulary key to an unknown key, if close enough to be a
/// plausible typo.
#[must_use]
pub fn closest_recognized_key(key: &str) -> Option<&'static str> {
    let key = key.to_lowercase();
    RECOGNIZED_KEYS
        .iter()
        .map(|candidate| (*candidate, strsim::jaro_winkler(&key, candidate)))
        .filter(|(_, score)| *score >= 0.88)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(candidate, _)| candidate)
}

/// Co-occurrence rules for one block kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockKindSpec {
    pub name: &'static str,
    /// Whether this kind conflicts with other exclusive kinds in one block.
    pub exclusive: bool,
    /// Kinds allowed to co-occur with this one.
    pub partners: &'static [&'static str],
    /// Keys this kind restricts a block to, where known. Recorded from the
    /// rule model; no check consumes it yet because the known sets are
    /// partial.
    pub allowed_attrs: &'static [&'static str],
}

const fn kind(name: &'static str) -> BlockKindSpec {
    BlockKindSpec {
        name,
        exclusive: true,
        partners: &[],
        allowed_attrs: &[],
    }
}

/// Every block kind, in priority order. Partner resolution compares the
/// second candidate (in this order) against the first candidate's partner
/// list, so the order is part of the rule model.
pub const BLOCK_KINDS: &[BlockKindSpec] = &[
    BlockKindSpec {
        allowed_attrs: &["include"],
        ..kind("include")
    },
    BlockKindSpec {
        allowed_attrs: &["features"],
        ..kind("features")
    },
    BlockKindSpec {
        allowed_attrs: &["objects"],
        ..kind("objects")
    },
    BlockKindSpec {
        allowed_attrs: &["objects from file", "use objects"],
        ..kind("objects from file")
    },
    BlockKindSpec {
        allowed_attrs: &["sections"],
        ..kind("sections")
    },
    BlockKindSpec {
        allowed_attrs: &["imports"],
        ..kind("imports")
    },
    BlockKindSpec {
        allowed_attrs: &["order"],
        ..kind("order")
    },
    BlockKindSpec {
        partners: &["question"],
        ..kind("attachment")
    },
    BlockKindSpec {
        partners: &["question"],
        ..kind("attachments")
    },
    BlockKindSpec {
        partners: &["terms"],
        allowed_attrs: &[
            "template",
            "content",
            "language",
            "subject",
            "generic object",
            "content file",
            "reconsider",
        ],
        ..kind("template")
    },
    BlockKindSpec {
        allowed_attrs: &["sort key", "filter"],
        ..kind("table")
    },
    kind("translations"),
    kind("modules"),
    kind("mako"),
    BlockKindSpec {
        partners: &["question"],
        ..kind("auto terms")
    },
    BlockKindSpec {
        partners: &["question", "template"],
        ..kind("terms")
    },
    BlockKindSpec {
        allowed_attrs: &["gathered", "data"],
        ..kind("variable name")
    },
    kind("default language"),
    kind("default validation messages"),
    kind("reset"),
    kind("on change"),
    kind("images"),
    kind("image sets"),
    BlockKindSpec {
        allowed_attrs: &["default screen parts"],
        ..kind("default screen parts")
    },
    kind("metadata"),
    BlockKindSpec {
        partners: &["auto terms", "terms", "attachment", "attachments"],
        ..kind("question")
    },
    BlockKindSpec {
        allowed_attrs: &["event", "mandatory"],
        ..kind("response")
    },
    kind("code"),
    BlockKindSpec {
        exclusive: false,
        ..kind("comment")
    },
    kind("interview help"),
    kind("machine learning storage"),
];

/// Look up a kind spec by name.
#[must_use]
pub fn kind_spec(name: &str) -> Option<&'static BlockKindSpec> {
    BLOCK_KINDS.iter().find(|spec| spec.name == name)
}
