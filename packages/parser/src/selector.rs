//! Hand-written selector scanner used to inject modifiers into rulesets
//!
//! Only the constructs needed to find class tokens and compound boundaries
//! are understood: escapes, quoted strings, attribute selectors,
//! functional pseudo-classes, and combinators.

use stylesmith_common::escape_css_selector;

/// Single-colon pseudo-elements kept for CSS2 compatibility
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-letter", "first-line"];

/// Byte cursor over a selector
pub struct SelectorCursor<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SelectorCursor<'a> {
    pub fn new(src: &'a str, pos: usize) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: pos.min(src.len()),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    pub fn at_combinator(&self) -> bool {
        matches!(
            self.peek(),
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'>' | b'+' | b'~')
        )
    }

    /// Consume `\x`, `\:` or a hex escape like `\32 ` (including its
    /// terminating whitespace)
    pub fn scan_escape(&mut self) -> usize {
        self.advance(1);
        let Some(next) = self.peek() else {
            return self.pos;
        };

        if next.is_ascii_hexdigit() {
            let mut digits = 0;
            while digits < 6 && self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.advance(1);
                digits += 1;
            }
            if matches!(self.peek(), Some(b' ' | b'\t' | b'\n')) {
                self.advance(1);
            }
        } else {
            let width = self.src[self.pos..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.advance(width);
        }
        self.pos
    }

    /// Consume identifier characters and escapes
    pub fn scan_identifier(&mut self) -> usize {
        while let Some(b) = self.peek() {
            if b == b'\\' {
                self.scan_escape();
            } else if is_identifier_byte(b) {
                self.advance(1);
            } else {
                break;
            }
        }
        self.pos
    }

    /// Consume a quoted string starting at the opening quote
    pub fn scan_quoted(&mut self) -> usize {
        let Some(quote) = self.peek() else {
            return self.pos;
        };
        self.advance(1);
        while let Some(b) = self.peek() {
            if b == b'\\' {
                self.advance(2);
            } else if b == quote {
                self.advance(1);
                break;
            } else {
                self.advance(1);
            }
        }
        self.pos
    }

    /// Consume `[attr op "value" i]` starting at `[`
    pub fn scan_attribute(&mut self) -> usize {
        self.advance(1);
        while let Some(b) = self.peek() {
            match b {
                b'\\' => {
                    self.scan_escape();
                }
                b'"' | b'\'' => {
                    self.scan_quoted();
                }
                b']' => {
                    self.advance(1);
                    break;
                }
                _ => self.advance(1),
            }
        }
        self.pos
    }

    /// Consume a balanced `( ... )` group starting at `(`
    pub fn scan_parenthesized(&mut self) -> usize {
        let mut depth = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => {
                    self.scan_escape();
                    continue;
                }
                b'"' | b'\'' => {
                    self.scan_quoted();
                    continue;
                }
                b'[' => {
                    self.scan_attribute();
                    continue;
                }
                b'(' => depth += 1,
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance(1);
                        break;
                    }
                }
                _ => {}
            }
            self.advance(1);
        }
        self.pos
    }

    /// Consume a pseudo-class such as `:hover` or `:not(...)`.
    ///
    /// Returns `false` without moving when the cursor is on a pseudo-element
    /// (`::x` or a legacy single-colon one).
    pub fn scan_pseudo_class(&mut self) -> bool {
        if self.peek_at(1) == Some(b':') {
            return false;
        }

        let name_start = self.pos + 1;
        let mut probe = SelectorCursor::new(self.src, name_start);
        let name_end = probe.scan_identifier();
        let name = self.src[name_start..name_end].to_ascii_lowercase();

        if LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()) {
            return false;
        }

        self.pos = name_end;
        if self.peek() == Some(b'(') {
            self.scan_parenthesized();
        }
        true
    }
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80
}

/// Index just past the compound selector that starts at `pos` (a `.`).
///
/// Classes, IDs, attribute selectors and pseudo-classes (including
/// functional ones like `:not(...)`) belong to the compound. Combinators,
/// `::` pseudo-elements and the legacy single-colon pseudo-elements end it.
pub fn find_compound_end(selector: &str, pos: usize) -> usize {
    let mut cursor = SelectorCursor::new(selector, pos);

    while let Some(b) = cursor.peek() {
        if cursor.at_combinator() {
            break;
        }
        match b {
            b'.' | b'#' => {
                cursor.advance(1);
                cursor.scan_identifier();
            }
            b'[' => {
                cursor.scan_attribute();
            }
            b':' => {
                if !cursor.scan_pseudo_class() {
                    break;
                }
            }
            b'\\' => {
                cursor.scan_escape();
            }
            b'*' | b'&' => cursor.advance(1),
            b if is_identifier_byte(b) => {
                cursor.scan_identifier();
            }
            _ => break,
        }
    }

    cursor.pos()
}

/// Position of the `.` that starts the exact class token `escaped_class`,
/// ignoring anything inside brackets, parentheses or strings
pub fn find_class_token(selector: &str, escaped_class: &str) -> Option<usize> {
    let mut cursor = SelectorCursor::new(selector, 0);

    while let Some(b) = cursor.peek() {
        match b {
            b'\\' => {
                cursor.scan_escape();
            }
            b'"' | b'\'' => {
                cursor.scan_quoted();
            }
            b'[' => {
                cursor.scan_attribute();
            }
            b'(' => {
                cursor.scan_parenthesized();
            }
            b'.' => {
                let start = cursor.pos();
                let rest = &selector[start + 1..];
                if rest.starts_with(escaped_class) {
                    let after = rest.as_bytes().get(escaped_class.len()).copied();
                    if !after.is_some_and(|b| is_identifier_byte(b) || b == b'\\') {
                        return Some(start);
                    }
                }
                cursor.advance(1);
                cursor.scan_identifier();
            }
            _ => cursor.advance(1),
        }
    }

    None
}

/// Split a selector list on top-level commas
pub fn split_selector_list(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut cursor = SelectorCursor::new(selector, 0);
    let mut start = 0;

    while let Some(b) = cursor.peek() {
        match b {
            b'\\' => {
                cursor.scan_escape();
            }
            b'"' | b'\'' => {
                cursor.scan_quoted();
            }
            b'[' => {
                cursor.scan_attribute();
            }
            b'(' => {
                cursor.scan_parenthesized();
            }
            b',' => {
                parts.push(selector[start..cursor.pos()].trim());
                cursor.advance(1);
                start = cursor.pos();
            }
            _ => cursor.advance(1),
        }
    }
    parts.push(selector[start..].trim());

    parts.into_iter().filter(|part| !part.is_empty()).collect()
}

/// Split `:focus:hover:nth-child(2n+1)` into its individual pseudo-classes
pub fn split_pseudo_chain(suffix: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut cursor = SelectorCursor::new(suffix, 0);
    let mut start = 0;

    while let Some(b) = cursor.peek() {
        match b {
            b'(' => {
                cursor.scan_parenthesized();
            }
            b':' if cursor.pos() > start && suffix.as_bytes()[cursor.pos() - 1] != b':' => {
                parts.push(&suffix[start..cursor.pos()]);
                start = cursor.pos();
                cursor.advance(1);
            }
            _ => cursor.advance(1),
        }
    }
    if start < suffix.len() {
        parts.push(&suffix[start..]);
    }

    parts
}

/// Does `haystack` already contain the exact pseudo `pseudo`?
fn contains_pseudo(haystack: &str, pseudo: &str) -> bool {
    if pseudo.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    let takes_argument = pseudo.ends_with(')');

    haystack.match_indices(pseudo).any(|(index, _)| {
        let single_colon = !pseudo.starts_with("::");
        if single_colon && index > 0 && bytes[index - 1] == b':' {
            return false;
        }
        match bytes.get(index + pseudo.len()).copied() {
            Some(b) if is_identifier_byte(b) => false,
            Some(b'(') if !takes_argument => false,
            _ => true,
        }
    })
}

/// Is `::name` already written in its CSS2 form `:name` at the compound boundary?
fn contains_legacy_pseudo_element(rest: &str, pseudo_element: &str) -> bool {
    let Some(name) = pseudo_element.strip_prefix("::") else {
        return false;
    };
    if !LEGACY_PSEUDO_ELEMENTS.contains(&name) {
        return false;
    }
    rest.strip_prefix(':')
        .and_then(|rest| rest.strip_prefix(name))
        .is_some_and(|after| !after.bytes().next().is_some_and(is_identifier_byte))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    StateConflict,
    PseudoElementConflict,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StateConflict => "state_conflict",
            Self::PseudoElementConflict => "pseudo_element_conflict",
        }
    }
}

/// A modifier left out of one selector because it was already there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedModifier {
    pub reason: SkipReason,
    pub selector: String,
    pub modifier: String,
}

/// Result of rewriting one selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorRewrite {
    pub selector: String,
    /// Whether the class token was found
    pub matched: bool,
    pub skipped: Vec<SkippedModifier>,
}

/// Rename `.class_name` to `.escaped_name` and insert the state suffix and
/// then the pseudo-element suffix at the end of its compound.
///
/// Pseudo-classes or a pseudo-element already present are not added again.
/// A selector that does not contain the class token is returned unchanged.
pub fn modify_single_selector(
    selector: &str,
    class_name: &str,
    escaped_name: &str,
    state_suffix: &str,
    pseudo_element_suffix: &str,
) -> SelectorRewrite {
    let escaped_class = escape_css_selector(class_name);
    let Some(start) = find_class_token(selector, &escaped_class) else {
        return SelectorRewrite {
            selector: selector.to_string(),
            matched: false,
            skipped: Vec::new(),
        };
    };

    let token_end = start + 1 + escaped_class.len();
    let compound_end = find_compound_end(selector, start);
    let compound = &selector[start..compound_end];
    let mut skipped = Vec::new();

    let mut states = String::new();
    for state in split_pseudo_chain(state_suffix) {
        if contains_pseudo(compound, state) {
            skipped.push(SkippedModifier {
                reason: SkipReason::StateConflict,
                selector: selector.to_string(),
                modifier: state.to_string(),
            });
        } else {
            states.push_str(state);
        }
    }

    let mut pseudo_element = pseudo_element_suffix;
    if contains_pseudo(&selector[start..], pseudo_element_suffix)
        || contains_legacy_pseudo_element(&selector[compound_end..], pseudo_element_suffix)
    {
        skipped.push(SkippedModifier {
            reason: SkipReason::PseudoElementConflict,
            selector: selector.to_string(),
            modifier: pseudo_element_suffix.to_string(),
        });
        pseudo_element = "";
    }

    let rewritten = format!(
        "{}.{}{}{}{}{}",
        &selector[..start],
        escaped_name,
        &selector[token_end..compound_end],
        states,
        pseudo_element,
        &selector[compound_end..]
    );

    SelectorRewrite {
        selector: rewritten,
        matched: true,
        skipped,
    }
}
