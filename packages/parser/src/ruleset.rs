//! Lightweight scanner for hand-written ruleset CSS
//!
//! Walks brace depth to find `selector { declarations }` pairs. Grouping
//! at-rules are descended into; other at-rules are skipped. This is not a
//! CSS grammar and assumes well-formed, generated-shape input.

use crate::selector::find_class_token;
use std::ops::Range;
use stylesmith_common::escape_css_selector;

/// At-rules whose bodies contain ordinary rules
const GROUPING_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "layer",
    "container",
    "scope",
    "keyframes",
    "-webkit-keyframes",
];

/// A `selector { declarations }` pair found in a ruleset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: String,
    /// Byte range of the trimmed selector in the source
    pub selector_range: Range<usize>,
    /// Byte range of the text between the braces
    pub declarations_range: Range<usize>,
    /// Preludes of the enclosing at-rules, outermost first
    pub at_rules: Vec<String>,
}

impl Rule {
    pub fn is_keyframe(&self) -> bool {
        self.at_rules
            .iter()
            .any(|prelude| at_rule_name(prelude).ends_with("keyframes"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRuleset {
    pub rules: Vec<Rule>,
    /// Comments before the first rule, verbatim with delimiters
    pub leading_comments: Vec<String>,
}

/// Parse ruleset CSS into its rules
pub fn parse_ruleset(css: &str) -> ParsedRuleset {
    let mut scanner = RulesetScanner::new(css);
    let mut at_rules = Vec::new();
    scanner.scan_block(css.len(), &mut at_rules);

    ParsedRuleset {
        rules: scanner.rules,
        leading_comments: scanner.leading_comments,
    }
}

fn at_rule_name(prelude: &str) -> String {
    prelude
        .trim_start_matches('@')
        .split(|c: char| c.is_whitespace() || c == '(' || c == '{')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

struct RulesetScanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    rules: Vec<Rule>,
    leading_comments: Vec<String>,
}

impl<'a> RulesetScanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            rules: Vec::new(),
            leading_comments: Vec::new(),
        }
    }

    fn scan_block(&mut self, end: usize, at_rules: &mut Vec<String>) {
        loop {
            let record = self.rules.is_empty() && at_rules.is_empty();
            self.skip_trivia(end, record);
            if self.pos >= end {
                break;
            }

            if self.bytes[self.pos] == b'}' {
                self.pos += 1;
                continue;
            }

            let prelude_start = self.pos;
            match self.scan_prelude(end) {
                Some(b'{') => {}
                Some(_) => {
                    // Statement at-rule such as `@import ...;`
                    self.pos += 1;
                    continue;
                }
                None if self.pos < end => {
                    // Stray closing brace after a dangling prelude
                    self.pos += 1;
                    continue;
                }
                None => break,
            }

            let brace = self.pos;
            let body_start = brace + 1;
            let body_end = self.find_block_end(body_start, end);
            let prelude = self.src[prelude_start..brace].trim_end();
            let selector_range = prelude_start..prelude_start + prelude.len();

            if prelude.starts_with('@') {
                if GROUPING_AT_RULES.contains(&at_rule_name(prelude).as_str()) {
                    at_rules.push(prelude.to_string());
                    self.pos = body_start;
                    self.scan_block(body_end, at_rules);
                    at_rules.pop();
                }
            } else {
                self.rules.push(Rule {
                    selector: prelude.to_string(),
                    declarations: self.src[body_start..body_end].trim().to_string(),
                    selector_range,
                    declarations_range: body_start..body_end,
                    at_rules: at_rules.clone(),
                });
            }

            self.pos = (body_end + 1).min(end);
        }
    }

    /// Skip whitespace and comments, optionally recording comment text
    fn skip_trivia(&mut self, end: usize, record_comments: bool) {
        while self.pos < end {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if self.bytes[self.pos..end].starts_with(b"/*") {
                let start = self.pos;
                self.pos = self.comment_end(self.pos, end);
                if record_comments {
                    self.leading_comments
                        .push(self.src[start..self.pos].to_string());
                }
            } else {
                break;
            }
        }
    }

    fn comment_end(&self, start: usize, end: usize) -> usize {
        self.src[start + 2..end]
            .find("*/")
            .map_or(end, |offset| start + 2 + offset + 2)
    }

    fn string_end(&self, start: usize, end: usize) -> usize {
        let quote = self.bytes[start];
        let mut i = start + 1;
        while i < end {
            match self.bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return i + 1,
                _ => i += 1,
            }
        }
        end
    }

    /// Advance to the `{` or `;` that ends a prelude at depth zero
    fn scan_prelude(&mut self, end: usize) -> Option<u8> {
        let mut depth = 0usize;
        while self.pos < end {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'"' | b'\'' => self.pos = self.string_end(self.pos, end),
                b'/' if self.bytes[self.pos..end].starts_with(b"/*") => {
                    self.pos = self.comment_end(self.pos, end);
                }
                b'(' | b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b')' | b']' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                b @ (b'{' | b';') if depth == 0 => return Some(b),
                b'}' if depth == 0 => return None,
                _ => self.pos += 1,
            }
        }
        None
    }

    /// Index of the `}` matching the block that starts at `start`
    fn find_block_end(&self, start: usize, end: usize) -> usize {
        let mut depth = 1usize;
        let mut i = start;
        while i < end {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'"' | b'\'' => i = self.string_end(i, end),
                b'/' if self.bytes[i..end].starts_with(b"/*") => i = self.comment_end(i, end),
                b'{' => {
                    depth += 1;
                    i += 1;
                }
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return i;
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }
        end
    }
}

/// True when the ruleset is a single plain `.class_name { ... }` rule that
/// could have been written as a declaration
pub fn is_single_selector_ruleset(rules: &[Rule], class_name: &str) -> bool {
    match rules {
        [rule] => {
            rule.at_rules.is_empty()
                && rule.selector == format!(".{}", escape_css_selector(class_name))
        }
        _ => false,
    }
}

/// True when some rule's selector contains the exact class token
pub fn ruleset_contains_class(rules: &[Rule], class_name: &str) -> bool {
    let escaped = escape_css_selector(class_name);
    rules
        .iter()
        .any(|rule| find_class_token(&rule.selector, &escaped).is_some())
}
