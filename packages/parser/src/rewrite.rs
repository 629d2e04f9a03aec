//! Injecting modifier fragments into ruleset selectors

use crate::modifier::ModifierOutput;
use crate::ruleset::{parse_ruleset, Rule};
use crate::selector::{modify_single_selector, split_selector_list, SkippedModifier};
use std::ops::Range;
use stylesmith_common::css::wrap_blocks;

/// Result of rewriting one selector list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorGroupRewrite {
    pub selector: String,
    /// Whether any member contained the class token
    pub matched: bool,
    pub skipped: Vec<SkippedModifier>,
}

/// Rewrite every member of a selector list independently, rejoined with `,\n`
pub fn modify_selector_group(
    group: &str,
    class_name: &str,
    escaped_name: &str,
    state_suffix: &str,
    pseudo_element_suffix: &str,
) -> SelectorGroupRewrite {
    let mut skipped = Vec::new();
    let mut matched = false;
    let selectors: Vec<String> = split_selector_list(group)
        .into_iter()
        .map(|selector| {
            let rewrite = modify_single_selector(
                selector,
                class_name,
                escaped_name,
                state_suffix,
                pseudo_element_suffix,
            );
            matched |= rewrite.matched;
            skipped.extend(rewrite.skipped);
            rewrite.selector
        })
        .collect();

    SelectorGroupRewrite {
        selector: selectors.join(",\n"),
        matched,
        skipped,
    }
}

/// A ruleset with modifiers applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifiedRuleset {
    pub css: String,
    pub skipped: Vec<SkippedModifier>,
}

/// Apply a modifier set to every rule of `css`, then wrap the result in the
/// media and ancestor blocks.
///
/// Rules whose selectors never mention the class are dropped; keyframes are
/// kept as written. Blank input yields blank output.
pub fn generate_modified_ruleset(
    css: &str,
    class_name: &str,
    escaped_name: &str,
    output: &ModifierOutput,
) -> ModifiedRuleset {
    let source = css.trim();
    if source.is_empty() {
        return ModifiedRuleset::default();
    }

    let parsed = parse_ruleset(source);
    let mut rewritten = source.to_string();
    let mut skipped = Vec::new();

    // Replace back to front so earlier ranges stay valid
    for rule in parsed.rules.iter().rev().filter(|rule| !rule.is_keyframe()) {
        let group = modify_selector_group(
            &rule.selector,
            class_name,
            escaped_name,
            &output.state_suffix,
            &output.pseudo_element_suffix,
        );
        if group.matched {
            rewritten.replace_range(rule.selector_range.clone(), &group.selector);
        } else {
            rewritten.replace_range(rule_extent(source, rule), "");
        }
        skipped.splice(0..0, group.skipped);
    }

    let rewritten = rewritten.trim_end().to_string();
    if rewritten.is_empty() {
        return ModifiedRuleset {
            css: String::new(),
            skipped,
        };
    }

    ModifiedRuleset {
        css: wrap_blocks(output.wrappers(), rewritten),
        skipped,
    }
}

/// Source range of a whole rule, its closing brace and the whitespace after it
fn rule_extent(source: &str, rule: &Rule) -> Range<usize> {
    let mut end = rule.declarations_range.end;
    if source.as_bytes().get(end) == Some(&b'}') {
        end += 1;
    }
    end += source[end..].len() - source[end..].trim_start().len();
    rule.selector_range.start..end
}
