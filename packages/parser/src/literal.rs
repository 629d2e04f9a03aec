//! CSS-literal classes: `property:value` with optional modifier prefixes
//!
//! `md:hover:color:red`, `display:flex`, `margin:0~auto`,
//! `nth-child(2n+1):background:var(--bg_2)`.

use crate::error::{LiteralError, LiteralResult};
use crate::modifier::{lookup_modifier, modifier_names, ModifierOutput, ModifierSet};
use crate::properties::KnownProperties;
use crate::segment::split_segments;
use stylesmith_common::find_closest;

const IMPORTANT: &str = "!important";

/// A successfully parsed literal class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLiteral {
    pub modifiers: ModifierSet,
    pub property: String,
    /// Decoded value (`~` as space, normalized ` !important`)
    pub value: String,
    /// Non-fatal issues found while parsing
    pub warnings: Vec<String>,
}

impl ParsedLiteral {
    pub fn declaration(&self) -> String {
        format!("{}: {};", self.property, self.value)
    }
}

/// A literal ready to be emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOutput {
    pub declaration: String,
    pub modifiers: ModifierOutput,
}

pub fn interpret_literal(parsed: &ParsedLiteral) -> LiteralOutput {
    LiteralOutput {
        declaration: parsed.declaration(),
        modifiers: parsed.modifiers.interpret(),
    }
}

fn strip_important(name: &str) -> (&str, bool) {
    match name.strip_suffix(IMPORTANT) {
        Some(body) => (body, true),
        None => (name, false),
    }
}

/// Cheap pre-check: could `name` be a literal at all?
///
/// Requires a depth-zero `:` and rejects names whose last segment follows
/// the underscore token convention (`hover:p_md` is a modifier applied to a
/// token class, not a literal).
pub fn is_possible_css_literal(name: &str) -> bool {
    let (body, _) = strip_important(name);

    match split_segments(body) {
        Ok(segments) => {
            segments.len() >= 2
                && !segments
                    .last()
                    .is_some_and(|last| is_token_shaped(last))
        }
        Err(_) => body.contains(':'),
    }
}

/// `p_md`, `color_a_5`, `shadow_bottom_lg`
fn is_token_shaped(segment: &str) -> bool {
    let mut parts = segment.split('_');
    let Some(head) = parts.next() else {
        return false;
    };
    let head_ok = head.starts_with(|c: char| c.is_ascii_lowercase())
        && head.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

    let mut tail_count = 0;
    for part in parts {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return false;
        }
        tail_count += 1;
    }

    head_ok && tail_count > 0
}

/// Parse a literal class name.
///
/// Leading segments that name modifiers are consumed first; the first
/// segment that is not a modifier is the property and the rest, rejoined
/// with `:`, is the value. The last two segments are never read as
/// modifiers since a property and a value must remain.
pub fn parse_literal(name: &str, known_properties: &KnownProperties) -> LiteralResult<ParsedLiteral> {
    let (body, important) = strip_important(name);
    let segments = split_segments(body)?;

    if segments.len() < 2 {
        return Err(LiteralError::NotALiteral {
            name: name.to_string(),
        });
    }

    let mut modifiers = Vec::new();
    let mut index = 0;
    while index + 2 < segments.len() {
        match lookup_modifier(segments[index]) {
            Some(modifier) => modifiers.push(modifier),
            None => break,
        }
        index += 1;
    }

    let property = segments[index];
    let remaining = segments.len() - index;

    if !known_properties.is_known(property) {
        // More than a value follows, so this segment was meant as a modifier.
        if remaining >= 3 {
            return Err(LiteralError::UnknownModifier {
                name: property.to_string(),
                suggestion: find_closest(property, modifier_names()),
            });
        }
        return Err(LiteralError::UnknownProperty {
            property: property.to_string(),
            suggestion: known_properties.suggest(property),
        });
    }

    let modifiers = ModifierSet::from_sequence(modifiers)?;

    let value = format_value(&segments[index + 1..].join(":"), important);
    if value.is_empty() || value == IMPORTANT {
        return Err(LiteralError::MissingValue {
            property: property.to_string(),
        });
    }

    let mut warnings = Vec::new();
    if has_ambiguous_calc(&value) {
        warnings.push(format!(
            "Ambiguous calc() in '{}': '+' and '-' need surrounding spaces (write '~' for a space)",
            name
        ));
    }

    Ok(ParsedLiteral {
        modifiers,
        property: property.to_string(),
        value,
        warnings,
    })
}

/// Decode `~` to spaces outside quoted strings and normalize `!important`
pub fn format_value(raw: &str, important: bool) -> String {
    let mut value = String::with_capacity(raw.len() + IMPORTANT.len() + 1);
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in raw.chars() {
        if escaped {
            value.push(ch);
            escaped = false;
            continue;
        }
        match (ch, quote) {
            ('\\', _) => {
                escaped = true;
                value.push(ch);
            }
            ('"' | '\'', None) => {
                quote = Some(ch);
                value.push(ch);
            }
            (c, Some(q)) if c == q => {
                quote = None;
                value.push(ch);
            }
            ('~', None) => value.push(' '),
            _ => value.push(ch),
        }
    }

    let mut value = value.trim().to_string();
    if important {
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(IMPORTANT);
    }
    value
}

/// True when a `calc()` body has `+`/`-` operators glued to their operands,
/// which CSS reads as a sign instead of an operator.
pub fn has_ambiguous_calc(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = value[search_from..].find("calc(") {
        let open = search_from + offset + "calc".len();
        let close = matching_paren(bytes, open).unwrap_or(bytes.len());
        if calc_body_is_ambiguous(bytes, open + 1, close) {
            return true;
        }
        search_from = open + 1;
    }

    false
}

fn matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn calc_body_is_ambiguous(bytes: &[u8], start: usize, end: usize) -> bool {
    let mut i = start;

    while i < end {
        // var() names may contain hyphens and digits.
        if bytes[i..end].starts_with(b"var(") {
            i = matching_paren(bytes, i + 3).map_or(end, |close| close + 1);
            continue;
        }

        let b = bytes[i];
        if (b == b'+' || b == b'-') && i > start && ends_operand(bytes, start, i) {
            return true;
        }
        i += 1;
    }

    false
}

/// Does the text right before `op` end a numeric operand or a group?
fn ends_operand(bytes: &[u8], start: usize, op: usize) -> bool {
    let prev = bytes[op - 1];
    if prev == b')' || prev == b'%' || prev.is_ascii_digit() {
        return true;
    }
    if !prev.is_ascii_alphabetic() {
        return false;
    }

    // A unit like `rem` counts only when it ends a dimension such as `1rem`.
    let mut token_start = op - 1;
    while token_start > start
        && (bytes[token_start - 1].is_ascii_alphanumeric() || bytes[token_start - 1] == b'.')
    {
        token_start -= 1;
    }
    let first = bytes[token_start];
    let glued_to_hyphen = token_start > start && bytes[token_start - 1] == b'-';
    (first.is_ascii_digit() || first == b'.') && !glued_to_hyphen
}
