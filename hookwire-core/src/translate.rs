use std::str::FromStr;

use crate::recordmodel::RecordModelError;

// Array of strict keywords (currently in use)
const STRICT_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

// Array of reserved keywords (for future use)
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "typeof",
    "unsized", "virtual", "yield",
];

/// How Rust field names map onto JSON keys when no explicit `rename` is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenameRule {
    /// `feature_flag` becomes `featureFlag`
    #[default]
    CamelCase,
    /// `feature_flag` stays `feature_flag`
    SnakeCase,
    /// the field name is used as is, including any trailing underscore
    Verbatim,
}

impl FromStr for RenameRule {
    type Err = RecordModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camelCase" => Ok(RenameRule::CamelCase),
            "snake_case" => Ok(RenameRule::SnakeCase),
            "verbatim" => Ok(RenameRule::Verbatim),
            _ => Err(RecordModelError::UnknownRenameRule(s.to_string())),
        }
    }
}

/// Makes first character of the given string uppercase and returns the result
fn capitalize(s: &str) -> String {
    modify_first_char(s, char::to_uppercase)
}

fn modify_first_char<F, R>(s: &str, m: F) -> String
where
    F: FnOnce(char) -> R,
    R: Iterator<Item = char>,
{
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => m(f).collect::<String>() + c.as_str(),
    }
}

/// Derives the JSON key of a record field from its (unraw'ed) Rust name.
///
/// A single trailing underscore, the usual way of dodging a keyword
/// (`type_`), is dropped for every rule but [`RenameRule::Verbatim`].
pub fn field_to_json_key(field_name: &str, rule: RenameRule) -> String {
    let base = match rule {
        RenameRule::Verbatim => return field_name.to_string(),
        _ => field_name.strip_suffix('_').unwrap_or(field_name),
    };
    match rule {
        RenameRule::CamelCase => {
            let leading = base.len() - base.trim_start_matches('_').len();
            let mut parts = base[leading..].split('_').filter(|p| !p.is_empty());
            let mut key = "_".repeat(leading);
            if let Some(first) = parts.next() {
                key.push_str(first);
            }
            for p in parts {
                key.push_str(&capitalize(p));
            }
            key
        }
        _ => base.to_string(),
    }
}

/// Converts a camelCase JSON key into the snake_case Rust field name the
/// `#[record]` convention expects for it.
pub fn json_key_to_rust_fieldname(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                name.push('_');
            }
            name.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            name.push('_');
            prev_lower = false;
        }
    }
    avoid_reserved(&name)
}

fn avoid_reserved(s: &str) -> String {
    if STRICT_KEYWORDS
        .iter()
        .chain(RESERVED_KEYWORDS.iter())
        .any(|e| (*e).eq(s))
    {
        s.to_string() + "_"
    } else {
        s.to_string()
    }
}
