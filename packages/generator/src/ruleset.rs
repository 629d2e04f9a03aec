//! Structural checks for ruleset definitions

use stylesmith_common::{escape_css_selector, Diagnostic};
use stylesmith_parser::{is_single_selector_ruleset, parse_ruleset, ruleset_contains_class, ParsedRuleset};

/// Reject a ruleset that is blank or never selects `.class_name`.
///
/// Diagnostics are reported against `reported_as`, which differs from
/// `class_name` when modifiers were applied (`hover:card` reports a broken
/// `card` ruleset).
pub(crate) fn validate_ruleset(
    reported_as: &str,
    class_name: &str,
    css: &str,
) -> Result<ParsedRuleset, Diagnostic> {
    if css.trim().is_empty() {
        return Err(Diagnostic::error(
            reported_as,
            format!("Ruleset for '{}' is empty", class_name),
        ));
    }

    let parsed = parse_ruleset(css.trim());
    if !ruleset_contains_class(&parsed.rules, class_name) {
        let selector = format!(".{}", escape_css_selector(class_name));
        return Err(Diagnostic::error(
            reported_as,
            format!("Ruleset does not contain a '{}' selector", selector),
        )
        .with_suggestion(format!("Add a rule whose selector includes '{}'", selector)));
    }

    Ok(parsed)
}

/// Warning for a ruleset that only styles `.class_name` and could be a
/// plain declaration
pub(crate) fn single_selector_warning(class_name: &str, parsed: &ParsedRuleset) -> Option<Diagnostic> {
    if !is_single_selector_ruleset(&parsed.rules, class_name) {
        return None;
    }

    let mut declaration = parsed.leading_comments.join("\n");
    if !declaration.is_empty() {
        declaration.push('\n');
    }
    declaration.push_str(&parsed.rules[0].declarations);

    let selector = format!(".{}", escape_css_selector(class_name));
    Some(
        Diagnostic::warning(
            class_name,
            format!("Ruleset only styles '{}'; use a declaration instead", selector),
        )
        .with_suggestion(format!("declaration: \"{}\"", declaration)),
    )
}
