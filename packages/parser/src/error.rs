use stylesmith_common::ErrorCategory;
use thiserror::Error;

pub type LiteralResult<T> = Result<T, LiteralError>;

/// Why a class name could not be read as a CSS literal or modifier chain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("'{name}' is not a property:value literal")]
    NotALiteral { name: String },

    #[error("Unbalanced parentheses, brackets or quotes in '{name}'")]
    Unbalanced { name: String },

    #[error("Missing value for property '{property}'")]
    MissingValue { property: String },

    #[error("Modifier '{modifier}' must come before '{previous}' (order: media → ancestor → state → pseudo-element)")]
    ModifierOrder { modifier: String, previous: String },

    #[error("Only one media modifier is allowed, found '{first}' and '{second}'")]
    MultipleMedia { first: String, second: String },

    #[error("Only one pseudo-element modifier is allowed, found '{first}' and '{second}'")]
    MultiplePseudoElements { first: String, second: String },

    #[error("Modifiers '{first}' and '{second}' are mutually exclusive")]
    ExclusiveAncestors { first: String, second: String },

    #[error("Duplicate modifier '{name}'")]
    DuplicateModifier { name: String },

    #[error("State modifiers must be in alphabetical order: '{found}' should be written '{expected}'")]
    StateOrder { found: String, expected: String },

    #[error("Unknown modifier '{name}'")]
    UnknownModifier {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Unknown CSS property '{property}'")]
    UnknownProperty {
        property: String,
        suggestion: Option<String>,
    },
}

impl LiteralError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownModifier { .. } | Self::UnknownProperty { .. } => {
                ErrorCategory::Validation
            }
            _ => ErrorCategory::Parse,
        }
    }

    /// Human-readable fix, if the error carries one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownModifier {
                suggestion: Some(name),
                ..
            }
            | Self::UnknownProperty {
                suggestion: Some(name),
                ..
            } => Some(format!("Did you mean '{}'?", name)),
            Self::StateOrder { expected, .. } => Some(format!("Use '{}'", expected)),
            _ => None,
        }
    }
}
