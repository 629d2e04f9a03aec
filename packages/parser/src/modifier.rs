//! Modifier table, sequence validation, and interpretation into CSS fragments
//!
//! A modifier is a class-name prefix such as `md:`, `dark:`, `hover:` or
//! `before:`. Modifiers must appear in canonical order:
//! media → ancestor → states (alphabetical) → pseudo-element.

use crate::error::{LiteralError, LiteralResult};

/// Responsive breakpoints, smallest first
const BREAKPOINTS: &[(&str, &str)] = &[
    ("sm", "40rem"),
    ("md", "48rem"),
    ("lg", "64rem"),
    ("xl", "80rem"),
    ("2xl", "96rem"),
];

const MAX_BREAKPOINTS: &[(&str, &str)] = &[
    ("max-sm", "40rem"),
    ("max-md", "48rem"),
    ("max-lg", "64rem"),
    ("max-xl", "80rem"),
    ("max-2xl", "96rem"),
];

/// Media features that are not breakpoints
const MEDIA_FEATURES: &[(&str, &str)] = &[
    ("motion-safe", "@media (prefers-reduced-motion: no-preference)"),
    ("motion-reduce", "@media (prefers-reduced-motion: reduce)"),
    ("contrast-more", "@media (prefers-contrast: more)"),
    ("portrait", "@media (orientation: portrait)"),
    ("landscape", "@media (orientation: landscape)"),
    ("print", "@media print"),
];

const ANCESTORS: &[(&str, &str)] = &[("dark", ":root.dark"), ("light", ":root.light")];

/// State modifiers and the pseudo-class each one emits
const STATES: &[(&str, &str)] = &[
    ("active", ":active"),
    ("autofill", ":autofill"),
    ("checked", ":checked"),
    ("default", ":default"),
    ("disabled", ":disabled"),
    ("empty", ":empty"),
    ("enabled", ":enabled"),
    ("even", ":nth-child(even)"),
    ("first", ":first-child"),
    ("first-child", ":first-child"),
    ("first-of-type", ":first-of-type"),
    ("focus", ":focus"),
    ("focus-visible", ":focus-visible"),
    ("focus-within", ":focus-within"),
    ("hover", ":hover"),
    ("in-range", ":in-range"),
    ("indeterminate", ":indeterminate"),
    ("invalid", ":invalid"),
    ("last", ":last-child"),
    ("last-child", ":last-child"),
    ("last-of-type", ":last-of-type"),
    ("odd", ":nth-child(odd)"),
    ("only", ":only-child"),
    ("only-child", ":only-child"),
    ("only-of-type", ":only-of-type"),
    ("open", ":open"),
    ("optional", ":optional"),
    ("out-of-range", ":out-of-range"),
    ("placeholder-shown", ":placeholder-shown"),
    ("read-only", ":read-only"),
    ("read-write", ":read-write"),
    ("required", ":required"),
    ("target", ":target"),
    ("user-invalid", ":user-invalid"),
    ("user-valid", ":user-valid"),
    ("valid", ":valid"),
    ("visited", ":visited"),
];

/// States that take an argument, e.g. `nth-child(2n+1)`
const PARAMETERIZED_STATES: &[&str] = &[
    "nth-child",
    "nth-last-child",
    "nth-of-type",
    "nth-last-of-type",
];

const PSEUDO_ELEMENTS: &[&str] = &[
    "after",
    "backdrop",
    "before",
    "file-selector-button",
    "first-letter",
    "first-line",
    "marker",
    "placeholder",
    "selection",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModifierKind {
    Media,
    Ancestor,
    State,
    PseudoElement,
}

impl ModifierKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Ancestor => "ancestor",
            Self::State => "state",
            Self::PseudoElement => "pseudo-element",
        }
    }
}

/// A single recognized modifier.
///
/// `css_fragment` is the at-rule prelude for media modifiers, the ancestor
/// selector for ancestors, and the selector suffix for states and
/// pseudo-elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub name: String,
    pub css_fragment: String,
}

impl Modifier {
    fn new(kind: ModifierKind, name: &str, css_fragment: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.to_string(),
            css_fragment: css_fragment.into(),
        }
    }
}

/// Look up a modifier by the name used in a class prefix
pub fn lookup_modifier(name: &str) -> Option<Modifier> {
    if let Some((_, size)) = BREAKPOINTS.iter().find(|(n, _)| *n == name) {
        return Some(Modifier::new(
            ModifierKind::Media,
            name,
            format!("@media (width >= {})", size),
        ));
    }
    if let Some((_, size)) = MAX_BREAKPOINTS.iter().find(|(n, _)| *n == name) {
        return Some(Modifier::new(
            ModifierKind::Media,
            name,
            format!("@media (width < {})", size),
        ));
    }
    if let Some((_, query)) = MEDIA_FEATURES.iter().find(|(n, _)| *n == name) {
        return Some(Modifier::new(ModifierKind::Media, name, *query));
    }
    if let Some((_, selector)) = ANCESTORS.iter().find(|(n, _)| *n == name) {
        return Some(Modifier::new(ModifierKind::Ancestor, name, *selector));
    }
    if let Some((_, pseudo)) = STATES.iter().find(|(n, _)| *n == name) {
        return Some(Modifier::new(ModifierKind::State, name, *pseudo));
    }
    if PSEUDO_ELEMENTS.contains(&name) {
        return Some(Modifier::new(
            ModifierKind::PseudoElement,
            name,
            format!("::{}", name),
        ));
    }

    lookup_parametric(name)
}

/// `min-width(800px)`, `max-width(600px)`, `nth-child(2n+1)` and friends
fn lookup_parametric(name: &str) -> Option<Modifier> {
    let (function, argument) = split_function(name)?;

    match function {
        "min-width" => Some(Modifier::new(
            ModifierKind::Media,
            name,
            format!("@media (width >= {})", argument),
        )),
        "max-width" => Some(Modifier::new(
            ModifierKind::Media,
            name,
            format!("@media (width < {})", argument),
        )),
        f if PARAMETERIZED_STATES.contains(&f) => Some(Modifier::new(
            ModifierKind::State,
            name,
            format!(":{}({})", f, argument),
        )),
        _ => None,
    }
}

/// Split `fn(arg)` into `("fn", "arg")`, decoding `~` to spaces in the argument
fn split_function(name: &str) -> Option<(&str, String)> {
    let open = name.find('(')?;
    let inner = name.strip_suffix(')')?.get(open + 1..)?;
    let function = &name[..open];

    if function.is_empty() || inner.trim().is_empty() {
        return None;
    }

    Some((function, inner.replace('~', " ").trim().to_string()))
}

/// Every static modifier name, used for "did you mean" suggestions
pub fn modifier_names() -> impl Iterator<Item = &'static str> {
    BREAKPOINTS
        .iter()
        .chain(MAX_BREAKPOINTS)
        .chain(MEDIA_FEATURES)
        .chain(ANCESTORS)
        .chain(STATES)
        .map(|(name, _)| *name)
        .chain(PSEUDO_ELEMENTS.iter().copied())
        .chain(PARAMETERIZED_STATES.iter().copied())
        .chain(["min-width", "max-width"])
}

/// Validated modifiers of a single class name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet {
    pub media: Option<Modifier>,
    pub ancestor: Option<Modifier>,
    /// In source order, which is also alphabetical by name
    pub states: Vec<Modifier>,
    pub pseudo_element: Option<Modifier>,
}

impl ModifierSet {
    /// Validate a modifier sequence as written in the class name.
    ///
    /// Misordered or duplicated modifiers are rejected, never reordered.
    pub fn from_sequence(modifiers: Vec<Modifier>) -> LiteralResult<Self> {
        let mut set = ModifierSet::default();
        let mut previous: Option<(ModifierKind, String)> = None;

        for modifier in modifiers {
            if let Some((kind, name)) = &previous {
                if modifier.kind < *kind {
                    return Err(LiteralError::ModifierOrder {
                        modifier: modifier.name,
                        previous: name.clone(),
                    });
                }
            }
            previous = Some((modifier.kind, modifier.name.clone()));

            match modifier.kind {
                ModifierKind::Media => {
                    if let Some(first) = &set.media {
                        return Err(LiteralError::MultipleMedia {
                            first: first.name.clone(),
                            second: modifier.name,
                        });
                    }
                    set.media = Some(modifier);
                }
                ModifierKind::Ancestor => {
                    if let Some(first) = &set.ancestor {
                        if first.name == modifier.name {
                            return Err(LiteralError::DuplicateModifier {
                                name: modifier.name,
                            });
                        }
                        return Err(LiteralError::ExclusiveAncestors {
                            first: first.name.clone(),
                            second: modifier.name,
                        });
                    }
                    set.ancestor = Some(modifier);
                }
                ModifierKind::State => {
                    // Aliases such as `first` and `first-child` emit the same pseudo-class
                    if set
                        .states
                        .iter()
                        .any(|state| state.css_fragment == modifier.css_fragment)
                    {
                        return Err(LiteralError::DuplicateModifier {
                            name: modifier.name,
                        });
                    }
                    if let Some(last) = set.states.last() {
                        if last.name == modifier.name {
                            return Err(LiteralError::DuplicateModifier {
                                name: modifier.name,
                            });
                        }
                        if modifier.name < last.name {
                            let mut found: Vec<&str> =
                                set.states.iter().map(|s| s.name.as_str()).collect();
                            found.push(&modifier.name);
                            let mut expected = found.clone();
                            expected.sort_unstable();
                            return Err(LiteralError::StateOrder {
                                found: found.join(":"),
                                expected: expected.join(":"),
                            });
                        }
                    }
                    set.states.push(modifier);
                }
                ModifierKind::PseudoElement => {
                    if let Some(first) = &set.pseudo_element {
                        return Err(LiteralError::MultiplePseudoElements {
                            first: first.name.clone(),
                            second: modifier.name,
                        });
                    }
                    set.pseudo_element = Some(modifier);
                }
            }
        }

        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_none()
            && self.ancestor.is_none()
            && self.states.is_empty()
            && self.pseudo_element.is_none()
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|state| state.name.as_str())
    }

    /// Build the CSS fragments these modifiers contribute
    pub fn interpret(&self) -> ModifierOutput {
        ModifierOutput {
            media_wrapper: self.media.as_ref().map(|m| m.css_fragment.clone()),
            ancestor_wrapper: self.ancestor.as_ref().map(|m| m.css_fragment.clone()),
            state_suffix: self
                .states
                .iter()
                .map(|state| state.css_fragment.as_str())
                .collect(),
            pseudo_element_suffix: self
                .pseudo_element
                .as_ref()
                .map(|m| m.css_fragment.clone())
                .unwrap_or_default(),
        }
    }
}

/// CSS fragments produced by a [`ModifierSet`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierOutput {
    /// e.g. `@media (width >= 48rem)`
    pub media_wrapper: Option<String>,
    /// e.g. `:root.dark`
    pub ancestor_wrapper: Option<String>,
    /// Pseudo-classes in source order, e.g. `:focus:hover`
    pub state_suffix: String,
    /// e.g. `::before`, empty when absent
    pub pseudo_element_suffix: String,
}

impl ModifierOutput {
    /// States first, then the pseudo-element
    pub fn selector_suffix(&self) -> String {
        format!("{}{}", self.state_suffix, self.pseudo_element_suffix)
    }

    /// Wrapper headers, outermost first
    pub fn wrappers(&self) -> Vec<&str> {
        self.media_wrapper
            .iter()
            .chain(self.ancestor_wrapper.iter())
            .map(String::as_str)
            .collect()
    }
}
