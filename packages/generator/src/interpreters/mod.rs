mod literal;
mod modified;

pub use literal::CssLiteralInterpreter;
pub use modified::ModifiedClassInterpreter;

use crate::config::{GeneratorConfig, UnknownPropertyPolicy};
use crate::registry::ClassRegistry;
use regex::Regex;
use stylesmith_common::css::{wrap_block, wrap_blocks};
use stylesmith_common::{escape_css_selector, Diagnostic, DiagnosticLevel, ErrorCategory};
use stylesmith_parser::{KnownProperties, ModifierOutput};

/// Everything an interpreter may consult while handling one class name
#[derive(Debug, Clone, Copy)]
pub struct InterpretContext<'a> {
    pub registry: &'a ClassRegistry,
    pub known_properties: &'a KnownProperties,
    pub config: &'a GeneratorConfig,
    /// The class was declared on purpose rather than picked up by extraction
    pub explicit: bool,
}

impl<'a> InterpretContext<'a> {
    /// Severity for a failure of the given category.
    ///
    /// Validation failures on classes nobody declared explicitly may belong
    /// to another CSS system, so they are warnings unless configured otherwise.
    pub fn level_for(&self, category: ErrorCategory) -> DiagnosticLevel {
        match category {
            ErrorCategory::Validation
                if !self.explicit
                    && self.config.unknown_property_policy
                        == UnknownPropertyPolicy::WarnUnlessExplicit =>
            {
                DiagnosticLevel::Warning
            }
            _ => DiagnosticLevel::Error,
        }
    }

    pub fn diagnostic(
        &self,
        class_name: &str,
        category: ErrorCategory,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Diagnostic {
        Diagnostic::new(self.level_for(category), class_name, message)
            .with_optional_suggestion(suggestion)
    }
}

/// Outcome of running one interpreter on one class name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interpretation {
    /// `None` hands the name on to the next interpreter. `Some("")` claims
    /// the name without emitting anything.
    pub css: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Interpretation {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn css(css: impl Into<String>) -> Self {
        Self {
            css: Some(css.into()),
            diagnostics: Vec::new(),
        }
    }

    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            css: None,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }
}

/// Turns class names that have no static definition into CSS
pub trait ClassInterpreter {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// Names this interpreter is willing to look at
    fn pattern(&self) -> &Regex;

    fn interpret(&self, class_name: &str, context: &InterpretContext<'_>) -> Interpretation;
}

/// Ordered list of interpreters; the first one to claim a name wins
pub struct InterpreterRegistry {
    interpreters: Vec<Box<dyn ClassInterpreter>>,
}

impl InterpreterRegistry {
    /// CSS literals first, then modifiers applied to registered classes
    pub fn new() -> Self {
        Self {
            interpreters: vec![
                Box::new(CssLiteralInterpreter::new()),
                Box::new(ModifiedClassInterpreter::new()),
            ],
        }
    }

    pub fn empty() -> Self {
        Self {
            interpreters: Vec::new(),
        }
    }

    pub fn interpreters(&self) -> &[Box<dyn ClassInterpreter>] {
        &self.interpreters
    }

    pub fn add_interpreter(&mut self, interpreter: Box<dyn ClassInterpreter>) {
        self.interpreters.push(interpreter);
    }

    /// Insert ahead of the built-in interpreters
    pub fn prepend_interpreter(&mut self, interpreter: Box<dyn ClassInterpreter>) {
        self.interpreters.insert(0, interpreter);
    }
}

impl Default for InterpreterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InterpreterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.interpreters.iter().map(|i| i.name()).collect();
        f.debug_struct("InterpreterRegistry")
            .field("interpreters", &names)
            .finish()
    }
}

/// `media { ancestor { .name{suffix} { declarations } } }`
pub fn render_rule(class_name: &str, modifiers: &ModifierOutput, declarations: &str) -> String {
    let selector = format!(
        ".{}{}",
        escape_css_selector(class_name),
        modifiers.selector_suffix()
    );
    wrap_blocks(modifiers.wrappers(), wrap_block(&selector, declarations))
}
