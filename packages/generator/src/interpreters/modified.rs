use super::{render_rule, ClassInterpreter, InterpretContext, Interpretation};
use crate::registry::DefinitionKind;
use crate::resolver::resolve_composite;
use crate::ruleset::validate_ruleset;
use regex::Regex;
use stylesmith_common::{escape_css_selector, find_closest, Diagnostic, ErrorCategory};
use stylesmith_parser::{
    generate_modified_ruleset, lookup_modifier, modifier_names, split_segments, LiteralError,
    ModifierSet, SkipReason,
};

/// Modifier prefixes applied to a registered class: `hover:card`,
/// `md:dark:panel`, `focus:p_md`
pub struct ModifiedClassInterpreter {
    pattern: Regex,
}

impl ModifiedClassInterpreter {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^(?:[^\s:]+:)+[^\s:]+$").expect("valid modifier pattern"),
        }
    }
}

impl Default for ModifiedClassInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassInterpreter for ModifiedClassInterpreter {
    fn name(&self) -> &'static str {
        "modified-class"
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn interpret(&self, class_name: &str, context: &InterpretContext<'_>) -> Interpretation {
        let Ok(segments) = split_segments(class_name) else {
            return Interpretation::pass();
        };
        let Some((base, prefixes)) = segments.split_last() else {
            return Interpretation::pass();
        };
        if prefixes.is_empty() {
            return Interpretation::pass();
        }
        let Some(definition) = context.registry.get(base) else {
            return Interpretation::pass();
        };

        let mut modifiers = Vec::with_capacity(prefixes.len());
        for prefix in prefixes {
            match lookup_modifier(prefix) {
                Some(modifier) => modifiers.push(modifier),
                None => {
                    let err = LiteralError::UnknownModifier {
                        name: prefix.to_string(),
                        suggestion: find_closest(prefix, modifier_names()),
                    };
                    return Interpretation::failed(context.diagnostic(
                        class_name,
                        err.category(),
                        err.to_string(),
                        err.suggestion(),
                    ));
                }
            }
        }

        let output = match ModifierSet::from_sequence(modifiers) {
            Ok(set) => set.interpret(),
            Err(err) => {
                return Interpretation::failed(context.diagnostic(
                    class_name,
                    err.category(),
                    err.to_string(),
                    err.suggestion(),
                ));
            }
        };

        if let DefinitionKind::Ruleset(css) = &definition.kind {
            if let Err(diagnostic) = validate_ruleset(class_name, base, css) {
                return Interpretation::failed(diagnostic);
            }
            let escaped = escape_css_selector(class_name);
            let modified = generate_modified_ruleset(css, base, &escaped, &output);
            let warnings = modified.skipped.iter().map(|skip| {
                let what = match skip.reason {
                    SkipReason::StateConflict => "state",
                    SkipReason::PseudoElementConflict => "pseudo-element",
                };
                Diagnostic::warning(
                    class_name,
                    format!(
                        "Skipped {} '{}' for selector '{}' because it is already present ({})",
                        what,
                        skip.modifier,
                        skip.selector,
                        skip.reason.as_str()
                    ),
                )
            });
            return Interpretation::css(modified.css).with_diagnostics(warnings);
        }

        match resolve_composite(context.registry, base) {
            Ok(declarations) if declarations.is_empty() => Interpretation::css(""),
            Ok(declarations) => Interpretation::css(render_rule(class_name, &output, &declarations)),
            Err(err) => Interpretation::failed(context.diagnostic(
                class_name,
                ErrorCategory::Structural,
                err.to_string(),
                err.suggestion(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::registry::{ClassDefinition, ClassRegistry};
    use stylesmith_common::DiagnosticLevel;
    use stylesmith_parser::KnownProperties;

    fn registry() -> ClassRegistry {
        ClassRegistry::new()
            .with("box", ClassDefinition::declaration("padding: 1rem;"))
            .with("flex", ClassDefinition::declaration("display: flex;"))
            .with("row", ClassDefinition::composes_and_declaration(["flex"], "flex-direction: row;"))
            .with("nothing", ClassDefinition::composes(Vec::<String>::new()))
            .with("broken", ClassDefinition::composes(["missing"]))
            .with(
                "panel",
                ClassDefinition::ruleset(".panel { padding: 2rem; }\n.panel:hover { color: red; }"),
            )
            .with("mismatch", ClassDefinition::ruleset(".other { margin: 0; }"))
            .with("blank", ClassDefinition::ruleset("  "))
    }

    fn run(class_name: &str) -> Interpretation {
        let registry = registry();
        let known = KnownProperties::bundled();
        let config = GeneratorConfig::default();
        let context = InterpretContext {
            registry: &registry,
            known_properties: &known,
            config: &config,
            explicit: false,
        };
        ModifiedClassInterpreter::new().interpret(class_name, &context)
    }

    #[test]
    fn test_state_on_declaration() {
        let result = run("hover:box");
        assert_eq!(result.css.as_deref(), Some(".hover\\:box:hover {\n  padding: 1rem;\n}"));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_media_on_composite() {
        let result = run("md:row");
        assert_eq!(
            result.css.as_deref(),
            Some("@media (width >= 48rem) {\n  .md\\:row {\n    display: flex;\n    flex-direction: row;\n  }\n}")
        );
    }

    #[test]
    fn test_unknown_base_passes() {
        assert_eq!(run("hover:unknown"), Interpretation::pass());
        assert_eq!(run("box"), Interpretation::pass());
    }

    #[test]
    fn test_unknown_modifier_suggests() {
        let result = run("hovr:box");
        assert_eq!(result.css, None);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
        assert_eq!(result.diagnostics[0].suggestion.as_deref(), Some("Did you mean 'hover'?"));
    }

    #[test]
    fn test_misordered_modifiers() {
        let result = run("hover:md:box");
        assert_eq!(result.css, None);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Error);
    }

    #[test]
    fn test_empty_composite_claims_name() {
        assert_eq!(run("hover:nothing"), Interpretation::css(""));
    }

    #[test]
    fn test_broken_composite_is_error() {
        let result = run("hover:broken");
        assert_eq!(result.css, None);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Error);
        assert!(result.diagnostics[0].message.contains("Unknown class 'missing'"));
    }

    #[test]
    fn test_broken_rulesets_are_errors() {
        for class_name in ["hover:mismatch", "hover:blank"] {
            let result = run(class_name);
            assert_eq!(result.css, None, "{}", class_name);
            assert_eq!(result.diagnostics.len(), 1);
            assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Error);
            assert_eq!(result.diagnostics[0].class_name, class_name);
        }
    }

    #[test]
    fn test_ruleset_with_conflict() {
        let result = run("hover:panel");
        let css = result.css.unwrap();

        assert!(css.contains(".hover\\:panel:hover { padding: 2rem; }"));
        assert!(!css.contains(":hover:hover"));
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
        assert!(result.diagnostics[0].message.contains("state_conflict"));
    }
}
