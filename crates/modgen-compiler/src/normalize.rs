//! Identifier normalization.
//!
//! Every artifact name the generators emit (file paths, namespaced resource
//! keys, Java symbols, command literals) is derived through these functions.
//! They are total: bad input degrades to the supplied fallback instead of
//! failing, and the character classes are part of the output contract.

use std::sync::LazyLock;

use regex::Regex;

/// Fallback used by [`display_name`] and [`to_code_symbol`].
pub const GENERATED_FALLBACK: &str = "Generated";

/// Fallback used by [`to_code_constant`].
pub const CONSTANT_FALLBACK: &str = "UNNAMED";

/// Path fallback used when the right-hand side of a namespaced id is empty.
pub const PATH_FALLBACK: &str = "generated";

static PATH_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9/._-]+").expect("valid regex"));
static COMMAND_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]+").expect("valid regex"));
static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));
static WORD_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_/.-]+").expect("valid regex"));
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"));
static LITERAL_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_.-]+:[a-z0-9/._-]+$").expect("valid regex"));

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Normalizes a free-form string into a resource path fragment.
///
/// Output only contains `[a-z0-9/._-]` and never starts or ends with one of
/// `_ . / -`.
pub fn normalize_path(raw: &str, fallback: &str) -> String {
    let lowered = raw.to_lowercase();
    let spaced = lowered.trim().replace(' ', "_");
    let replaced = PATH_DISALLOWED.replace_all(&spaced, "_");
    let collapsed = UNDERSCORE_RUN.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches(|c| matches!(c, '_' | '.' | '/' | '-'));
    or_fallback(trimmed, fallback)
}

/// Normalizes a string into a command literal (`[a-z0-9_]` only).
pub fn normalize_command_literal(raw: &str, fallback: &str) -> String {
    let lowered = raw.to_lowercase();
    let spaced = lowered.trim().replace(' ', "_");
    let stripped = COMMAND_DISALLOWED.replace_all(&spaced, "");
    or_fallback(&stripped, fallback)
}

/// Splits `namespace:path` into normalized parts.
///
/// Without a colon the whole value is the path and the namespace is
/// `default_namespace`.
pub fn split_namespaced(value: &str, default_namespace: &str) -> (String, String) {
    match value.split_once(':') {
        Some((namespace, path)) => (
            normalize_path(namespace, default_namespace),
            normalize_path(path, PATH_FALLBACK),
        ),
        None => (
            default_namespace.to_string(),
            normalize_path(value, PATH_FALLBACK),
        ),
    }
}

/// Turns `ruby_block` into `Ruby Block`.
pub fn display_name(identifier: &str) -> String {
    let words: Vec<String> = WORD_SEPARATORS
        .split(identifier)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    or_fallback(&words.join(" "), GENERATED_FALLBACK)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Derives a class-style symbol: `ruby_guardian` → `RubyGuardian`.
pub fn to_code_symbol(value: &str) -> String {
    let symbol: String = NON_ALPHANUMERIC
        .split(value)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect();
    or_fallback(&symbol, GENERATED_FALLBACK)
}

/// Derives a constant-style symbol: `ruby-block` → `RUBY_BLOCK`.
pub fn to_code_constant(value: &str) -> String {
    let replaced = NON_ALPHANUMERIC.replace_all(value, "_");
    let constant = replaced.trim_matches('_').to_uppercase();
    or_fallback(&constant, CONSTANT_FALLBACK)
}

/// Derives a fragment usable as a Java package segment or directory name.
pub fn to_filesystem_fragment(value: &str, fallback: &str) -> String {
    let lowered = value.to_lowercase();
    let replaced = COMMAND_DISALLOWED.replace_all(&lowered, "_");
    or_fallback(replaced.trim_matches('_'), fallback)
}

/// True when `value` is already a strict `namespace:path` identifier.
pub fn is_literal_identifier(value: &str) -> bool {
    LITERAL_IDENTIFIER.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("Ruby Block", "x"), "ruby_block");
        assert_eq!(normalize_path("  Gems/Ruby  ", "x"), "gems/ruby");
        assert_eq!(normalize_path("a!!b__c", "x"), "a_b_c");
        assert_eq!(normalize_path("_-./edge./-_", "x"), "edge");
        assert_eq!(normalize_path("", "fallback"), "fallback");
        assert_eq!(normalize_path("!!!", "fallback"), "fallback");
    }

    #[test]
    fn test_normalize_command_literal() {
        assert_eq!(normalize_command_literal("Ruby Cmd", "modgen"), "ruby_cmd");
        assert_eq!(normalize_command_literal("a/b.c-d", "modgen"), "abcd");
        assert_eq!(normalize_command_literal("///", "modgen"), "modgen");
    }

    #[test]
    fn test_split_namespaced() {
        assert_eq!(
            split_namespaced("c:gems/ruby", "demo"),
            ("c".to_string(), "gems/ruby".to_string())
        );
        assert_eq!(
            split_namespaced("Ruby Ore", "demo"),
            ("demo".to_string(), "ruby_ore".to_string())
        );
        assert_eq!(
            split_namespaced(":", "demo"),
            ("demo".to_string(), "generated".to_string())
        );
        assert_eq!(
            split_namespaced("a:b:c", "demo"),
            ("a".to_string(), "b_c".to_string())
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("ruby_block"), "Ruby Block");
        assert_eq!(display_name("gems/RUBY"), "Gems Ruby");
        assert_eq!(display_name("__"), "Generated");
    }

    #[test]
    fn test_code_symbols() {
        assert_eq!(to_code_symbol("ruby_guardian"), "RubyGuardian");
        assert_eq!(to_code_symbol("demo_mod"), "DemoMod");
        assert_eq!(to_code_symbol("already camelCase"), "AlreadyCamelCase");
        assert_eq!(to_code_symbol("%%"), "Generated");

        assert_eq!(to_code_constant("ruby-block"), "RUBY_BLOCK");
        assert_eq!(to_code_constant("__x  y__"), "X_Y");
        assert_eq!(to_code_constant("***"), "UNNAMED");
    }

    #[test]
    fn test_filesystem_fragment() {
        assert_eq!(to_filesystem_fragment("Demo-Mod", "generated"), "demo_mod");
        assert_eq!(to_filesystem_fragment("Theo Bobble", "author"), "theo_bobble");
        assert_eq!(to_filesystem_fragment("...", "author"), "author");
    }

    #[test]
    fn test_literal_identifier() {
        assert!(is_literal_identifier("minecraft:diamond"));
        assert!(is_literal_identifier("c:gems/ruby"));
        assert!(!is_literal_identifier("ruby"));
        assert!(!is_literal_identifier("Minecraft:Diamond"));
        assert!(!is_literal_identifier("a:b:c"));
    }
}
