//! Turning a batch of class names into one stylesheet

use crate::config::GeneratorConfig;
use crate::interpreters::{InterpretContext, InterpreterRegistry};
use crate::ordering::CascadeKey;
use crate::registry::{ClassDefinition, ClassRegistry, DefinitionKind};
use crate::resolver::resolve_composite;
use crate::ruleset::{single_selector_warning, validate_ruleset};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use stylesmith_common::css::{comment_block, wrap_block};
use stylesmith_common::{escape_css_selector, find_closest, Diagnostic, SourceLocation};
use stylesmith_parser::KnownProperties;
use stylesmith_theme::{extract_var_references, ThemeCss, VariableGraph, VariableResolution};
use tracing::{debug, info, instrument};

/// CSS text plus everything worth telling the user about it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationResult {
    pub css: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    /// Theme variables the generated CSS refers to, without `--`
    pub fn referenced_variables(&self) -> BTreeSet<String> {
        extract_var_references(&self.css)
    }
}

/// Resolves class names against static definitions, then interpreters
pub struct CssGenerator<'a> {
    registry: &'a ClassRegistry,
    interpreters: &'a InterpreterRegistry,
    known_properties: &'a KnownProperties,
    config: GeneratorConfig,
    explicit_classes: HashSet<String>,
    locations: HashMap<String, Vec<SourceLocation>>,
}

/// Output of a single class name
struct ClassOutput {
    css: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> CssGenerator<'a> {
    pub fn new(
        registry: &'a ClassRegistry,
        interpreters: &'a InterpreterRegistry,
        known_properties: &'a KnownProperties,
    ) -> Self {
        Self {
            registry,
            interpreters,
            known_properties,
            config: GeneratorConfig::default(),
            explicit_classes: HashSet::new(),
            locations: HashMap::new(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Classes declared on purpose; unresolved or invalid ones are errors
    pub fn with_explicit_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Where each class name was found, attached to its diagnostics
    pub fn with_locations(mut self, locations: HashMap<String, Vec<SourceLocation>>) -> Self {
        self.locations = locations;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate CSS for every distinct name in `class_names`.
    ///
    /// Definitions are emitted in registry order, interpreted classes after
    /// them in cascade order. A failing class never affects the others.
    #[instrument(skip(self, class_names), fields(definitions = self.registry.len()))]
    pub fn generate<I, S>(&self, class_names: I) -> GenerationResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = class_names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let mut defined: Vec<(usize, String)> = Vec::new();
        let mut interpreted: Vec<(CascadeKey, String)> = Vec::new();
        let mut diagnostics = Vec::new();

        for name in &names {
            let (output, from_definition) = match self.registry.get(name) {
                Some(definition) => (self.generate_definition(name, definition), true),
                None => (self.interpret(name), false),
            };

            let mut class_diagnostics = output.diagnostics;
            if let Some(locations) = self.locations.get(name.as_str()) {
                class_diagnostics = class_diagnostics
                    .into_iter()
                    .map(|diagnostic| diagnostic.with_locations(locations.clone()))
                    .collect();
            }
            diagnostics.extend(class_diagnostics);

            let Some(css) = output.css.filter(|css| !css.is_empty()) else {
                continue;
            };
            if from_definition {
                let position = self.registry.position(name).unwrap_or(usize::MAX);
                defined.push((position, css));
            } else {
                interpreted.push((CascadeKey::new(name), css));
            }
        }

        defined.sort_by_key(|(position, _)| *position);
        interpreted.sort_by(|a, b| a.0.cmp(&b.0));

        let rules: Vec<String> = defined
            .into_iter()
            .map(|(_, css)| css)
            .chain(interpreted.into_iter().map(|(_, css)| css))
            .collect();

        info!(
            classes = names.len(),
            rules = rules.len(),
            diagnostics = diagnostics.len(),
            "CSS generation complete"
        );

        GenerationResult {
            css: rules.join("\n\n"),
            diagnostics,
        }
    }

    /// `:root` blocks for every theme variable `result` uses, directly or
    /// through other variables
    pub fn generate_theme(
        &self,
        result: &GenerationResult,
        graph: &VariableGraph,
    ) -> (ThemeCss, VariableResolution) {
        let resolution = graph.resolve_transitive(result.referenced_variables());
        let css = graph.generate_theme_css(&resolution.resolved, self.config.theme_specificity);
        (css, resolution)
    }

    fn generate_definition(&self, name: &str, definition: &ClassDefinition) -> ClassOutput {
        debug!(class = %name, source = "definition", kind = %definition.kind, "Resolving class");

        let mut diagnostics = Vec::new();
        let body = match &definition.kind {
            DefinitionKind::Ruleset(css) => self.check_ruleset(name, css, &mut diagnostics),
            DefinitionKind::Declaration(css) => {
                let css = css.trim();
                (!css.is_empty()).then(|| self.simple_rule(name, css))
            }
            DefinitionKind::Composes(_) | DefinitionKind::ComposesAndDeclaration { .. } => {
                match resolve_composite(self.registry, name) {
                    Ok(css) if css.is_empty() => None,
                    Ok(css) => Some(self.simple_rule(name, &css)),
                    Err(err) => {
                        diagnostics.push(
                            Diagnostic::error(name, err.to_string())
                                .with_optional_suggestion(err.suggestion()),
                        );
                        None
                    }
                }
            }
        };

        let css = body.map(|css| match &definition.comment {
            Some(comment) if self.config.emit_comments => {
                format!("{}\n{}", comment_block(comment), css)
            }
            _ => css,
        });

        ClassOutput { css, diagnostics }
    }

    fn simple_rule(&self, name: &str, declarations: &str) -> String {
        wrap_block(&format!(".{}", escape_css_selector(name)), declarations)
    }

    /// Validate a static ruleset and return it for output if usable
    fn check_ruleset(
        &self,
        name: &str,
        css: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<String> {
        match validate_ruleset(name, name, css) {
            Ok(parsed) => {
                diagnostics.extend(single_selector_warning(name, &parsed));
                Some(css.trim().to_string())
            }
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                None
            }
        }
    }

    fn interpret(&self, name: &str) -> ClassOutput {
        let explicit = self.explicit_classes.contains(name);
        let context = InterpretContext {
            registry: self.registry,
            known_properties: self.known_properties,
            config: &self.config,
            explicit,
        };

        let mut diagnostics = Vec::new();
        for interpreter in self.interpreters.interpreters() {
            if !interpreter.pattern().is_match(name) {
                continue;
            }
            let interpretation = interpreter.interpret(name, &context);
            diagnostics.extend(interpretation.diagnostics);
            if let Some(css) = interpretation.css {
                debug!(class = %name, source = interpreter.name(), "Resolving class");
                return ClassOutput {
                    css: Some(css),
                    diagnostics,
                };
            }
        }

        debug!(class = %name, "No interpreter matched");
        if explicit && !diagnostics.iter().any(Diagnostic::is_error) {
            diagnostics.push(
                Diagnostic::error(name, "No matching class definition").with_optional_suggestion(
                    find_closest(name, self.registry.names())
                        .map(|closest| format!("Did you mean '{}'?", closest)),
                ),
            );
        }

        ClassOutput {
            css: None,
            diagnostics,
        }
    }
}

/// Generate CSS with default configuration and no explicit classes
pub fn generate<I, S>(
    class_names: I,
    registry: &ClassRegistry,
    interpreters: &InterpreterRegistry,
    known_properties: &KnownProperties,
) -> GenerationResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    CssGenerator::new(registry, interpreters, known_properties).generate(class_names)
}

impl std::fmt::Debug for CssGenerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CssGenerator")
            .field("definitions", &self.registry.len())
            .field("interpreters", self.interpreters)
            .field("config", &self.config)
            .field("explicit_classes", &self.explicit_classes.len())
            .finish()
    }
}
