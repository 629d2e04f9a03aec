use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// Pipeline phase that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticPhase {
    Extraction,
    Generation,
}

/// Broad failure class shared by every error enum in the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed literal or modifier sequence
    Parse,
    /// Unknown modifier or property
    Validation,
    /// Broken references, cycles, empty or mismatched rulesets
    Structural,
}

/// Where a class name was found by the extractor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A diagnostic produced while turning class names into CSS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    pub phase: DiagnosticPhase,

    /// Human-readable message
    pub message: String,

    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,

    /// The class name the diagnostic is about
    pub class_name: String,

    /// Source locations of the class name, when the caller supplied them
    pub locations: Option<Vec<SourceLocation>>,
}

impl Diagnostic {
    pub fn new(
        level: DiagnosticLevel,
        class_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            phase: DiagnosticPhase::Generation,
            message: message.into(),
            suggestion: None,
            class_name: class_name.into(),
            locations: None,
        }
    }

    pub fn error(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, class_name, message)
    }

    pub fn warning(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, class_name, message)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a suggestion only if one exists
    pub fn with_optional_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    pub fn with_phase(mut self, phase: DiagnosticPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_locations(mut self, locations: Vec<SourceLocation>) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
        };
        write!(f, "{}: [{}] {}", level, self.class_name, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        if let Some(locations) = &self.locations {
            for location in locations {
                write!(f, "\n  at {}", location)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let diagnostic = Diagnostic::error("colr:red", "Unknown CSS property 'colr'")
            .with_suggestion("Did you mean 'color'?")
            .with_locations(vec![SourceLocation::new("src/App.svelte", 3, 14)]);

        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.phase, DiagnosticPhase::Generation);
        assert_eq!(diagnostic.suggestion.as_deref(), Some("Did you mean 'color'?"));
        assert_eq!(diagnostic.locations.as_ref().map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_display_includes_locations() {
        let diagnostic = Diagnostic::warning("p_xx", "No matching class definition")
            .with_locations(vec![SourceLocation::new("a.html", 1, 2)]);
        let text = diagnostic.to_string();

        assert!(text.starts_with("warning: [p_xx]"));
        assert!(text.contains("at a.html:1:2"));
    }

    #[test]
    fn test_serializes_lowercase_levels() {
        let diagnostic = Diagnostic::error("x", "boom");
        let json = serde_json::to_string(&diagnostic).unwrap();

        assert!(json.contains(r#""level":"error""#));
        assert!(json.contains(r#""phase":"generation""#));
    }
}
