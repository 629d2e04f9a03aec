use super::{render_rule, ClassInterpreter, InterpretContext, Interpretation};
use regex::Regex;
use stylesmith_common::{Diagnostic, DiagnosticLevel};
use stylesmith_parser::{
    interpret_literal, is_possible_css_literal, lookup_modifier, parse_literal, split_segments,
    LiteralError,
};

/// `property:value` classes with optional modifier prefixes
pub struct CssLiteralInterpreter {
    pattern: Regex,
}

impl CssLiteralInterpreter {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^\S+:\S+$").expect("valid literal pattern"),
        }
    }

    /// Names better handled by the modifier interpreter: the last segment is
    /// a registered class (`hover:card`)
    fn defers_to_registry(class_name: &str, context: &InterpretContext<'_>) -> bool {
        split_segments(class_name)
            .ok()
            .and_then(|segments| segments.last().copied())
            .is_some_and(|last| context.registry.contains(last))
    }
}

impl Default for CssLiteralInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassInterpreter for CssLiteralInterpreter {
    fn name(&self) -> &'static str {
        "css-literal"
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn interpret(&self, class_name: &str, context: &InterpretContext<'_>) -> Interpretation {
        if !is_possible_css_literal(class_name) || Self::defers_to_registry(class_name, context) {
            return Interpretation::pass();
        }

        let parsed = match parse_literal(class_name, context.known_properties) {
            Ok(parsed) => parsed,
            // `hover:something` names a modifier, not a property; let the
            // next interpreter look at it
            Err(LiteralError::UnknownProperty { property, .. })
                if lookup_modifier(&property).is_some() =>
            {
                return Interpretation::pass();
            }
            Err(err) => {
                return Interpretation::failed(context.diagnostic(
                    class_name,
                    err.category(),
                    err.to_string(),
                    err.suggestion(),
                ));
            }
        };

        let warnings = parsed
            .warnings
            .iter()
            .map(|warning| Diagnostic::new(DiagnosticLevel::Warning, class_name, warning.as_str()));

        let output = interpret_literal(&parsed);
        Interpretation::css(render_rule(class_name, &output.modifiers, &output.declaration))
            .with_diagnostics(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::registry::{ClassDefinition, ClassRegistry};
    use stylesmith_parser::KnownProperties;

    fn run(class_name: &str, registry: &ClassRegistry, explicit: bool) -> Interpretation {
        let known = KnownProperties::bundled();
        let config = GeneratorConfig::default();
        let context = InterpretContext {
            registry,
            known_properties: &known,
            config: &config,
            explicit,
        };
        CssLiteralInterpreter::new().interpret(class_name, &context)
    }

    #[test]
    fn test_simple_literal() {
        let result = run("display:flex", &ClassRegistry::new(), false);
        assert_eq!(result.css.as_deref(), Some(".display\\:flex {\n  display: flex;\n}"));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_modified_literal() {
        let result = run("md:hover:opacity:80%", &ClassRegistry::new(), false);
        assert_eq!(
            result.css.as_deref(),
            Some("@media (width >= 48rem) {\n  .md\\:hover\\:opacity\\:80\\%:hover {\n    opacity: 80%;\n  }\n}")
        );
    }

    #[test]
    fn test_unknown_property_severity() {
        let result = run("colr:red", &ClassRegistry::new(), false);
        assert_eq!(result.css, None);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
        assert_eq!(result.diagnostics[0].suggestion.as_deref(), Some("Did you mean 'color'?"));

        let result = run("colr:red", &ClassRegistry::new(), true);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Error);
    }

    #[test]
    fn test_order_error_is_always_error() {
        let result = run("hover:md:color:red", &ClassRegistry::new(), false);
        assert_eq!(result.css, None);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Error);
    }

    #[test]
    fn test_defers_registered_and_token_names() {
        let registry = ClassRegistry::new().with("card", ClassDefinition::declaration("padding: 1rem;"));
        assert_eq!(run("hover:card", &registry, false), Interpretation::pass());
        assert_eq!(run("hover:p_md", &registry, false), Interpretation::pass());
        assert_eq!(run("hover:mystery", &registry, false), Interpretation::pass());
    }

    #[test]
    fn test_calc_warning_keeps_css() {
        let result = run("width:calc(100%-1rem)", &ClassRegistry::new(), false);
        assert!(result.css.is_some());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
    }
}
