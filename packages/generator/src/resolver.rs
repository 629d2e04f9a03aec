//! Flattening composite classes into a single declaration block

use crate::registry::{ClassRegistry, DefinitionKind};
use std::collections::HashSet;
use stylesmith_common::{find_closest, ErrorCategory};
use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown class '{name}' in composes array of '{referenced_by}'")]
    UnknownReference {
        name: String,
        referenced_by: String,
        suggestion: Option<String>,
    },

    #[error("Unknown class '{name}'")]
    UnknownClass { name: String },

    #[error("Circular reference: {}", path.join(" → "))]
    Circular { path: Vec<String> },

    #[error("'{referenced_by}' composes ruleset class '{name}'; rulesets own their selectors and cannot be composed")]
    RulesetReference { name: String, referenced_by: String },

    #[error("Ruleset class '{name}' cannot be flattened into declarations")]
    NotComposable { name: String },
}

impl ResolveError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Structural
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownReference {
                suggestion: Some(name),
                ..
            } => Some(format!("Did you mean '{}'?", name)),
            Self::RulesetReference { name, .. } => Some(format!(
                "Apply '{}' as its own class instead of composing it",
                name
            )),
            _ => None,
        }
    }
}

/// Depth-first walk over `composes` references.
///
/// `visiting` is the current path and catches cycles. `visited` holds every
/// finished class so a class reached through two branches is emitted once.
struct CompositeResolver<'a> {
    registry: &'a ClassRegistry,
    visiting: Vec<&'a str>,
    visited: HashSet<&'a str>,
    declarations: Vec<&'a str>,
}

impl<'a> CompositeResolver<'a> {
    fn new(registry: &'a ClassRegistry) -> Self {
        Self {
            registry,
            visiting: Vec::new(),
            visited: HashSet::new(),
            declarations: Vec::new(),
        }
    }

    fn visit(&mut self, name: &'a str, referenced_by: Option<&'a str>) -> ResolveResult<()> {
        if let Some(start) = self.visiting.iter().position(|n| *n == name) {
            let mut path: Vec<String> = self.visiting[start..].iter().map(|n| n.to_string()).collect();
            path.push(name.to_string());
            return Err(ResolveError::Circular { path });
        }
        if self.visited.contains(name) {
            return Ok(());
        }

        let registry = self.registry;
        let Some(definition) = registry.get(name) else {
            return Err(match referenced_by {
                Some(parent) => ResolveError::UnknownReference {
                    name: name.to_string(),
                    referenced_by: parent.to_string(),
                    suggestion: find_closest(name, registry.names()),
                },
                None => ResolveError::UnknownClass {
                    name: name.to_string(),
                },
            });
        };

        self.visiting.push(name);
        match &definition.kind {
            DefinitionKind::Declaration(css) => self.declarations.push(css),
            DefinitionKind::Composes(refs) => self.visit_all(name, refs)?,
            DefinitionKind::ComposesAndDeclaration {
                composes,
                declaration,
            } => {
                self.visit_all(name, composes)?;
                self.declarations.push(declaration);
            }
            DefinitionKind::Ruleset(_) => {
                return Err(match referenced_by {
                    Some(parent) => ResolveError::RulesetReference {
                        name: name.to_string(),
                        referenced_by: parent.to_string(),
                    },
                    None => ResolveError::NotComposable {
                        name: name.to_string(),
                    },
                });
            }
        }
        self.visiting.pop();
        self.visited.insert(name);

        Ok(())
    }

    fn visit_all(&mut self, parent: &'a str, refs: &'a [String]) -> ResolveResult<()> {
        for reference in refs {
            self.visit(reference, Some(parent))?;
        }
        Ok(())
    }

    fn finish(self) -> String {
        self.declarations
            .iter()
            .map(|css| css.trim())
            .filter(|css| !css.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Flatten `name` and everything it composes into one declaration block.
///
/// Composed declarations come first, in `composes` order, and a
/// definition's own declaration comes last. An empty result is valid.
pub fn resolve_composite(registry: &ClassRegistry, name: &str) -> ResolveResult<String> {
    let Some((key, _)) = registry.entry(name) else {
        return Err(ResolveError::UnknownClass {
            name: name.to_string(),
        });
    };

    let mut resolver = CompositeResolver::new(registry);
    resolver.visit(key, None)?;
    Ok(resolver.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClassDefinition;

    #[test]
    fn test_declaration_passthrough() {
        let registry = ClassRegistry::new().with("p_md", ClassDefinition::declaration("padding: 1rem;"));
        assert_eq!(resolve_composite(&registry, "p_md").unwrap(), "padding: 1rem;");
    }

    #[test]
    fn test_composes_then_own_declaration() {
        let registry = ClassRegistry::new()
            .with("flex", ClassDefinition::declaration("display: flex;"))
            .with("gap_sm", ClassDefinition::declaration("gap: 0.5rem;"))
            .with(
                "toolbar",
                ClassDefinition::composes_and_declaration(["flex", "gap_sm"], "gap: 1rem;"),
            );

        assert_eq!(
            resolve_composite(&registry, "toolbar").unwrap(),
            "display: flex;\ngap: 0.5rem;\ngap: 1rem;"
        );
    }

    #[test]
    fn test_diamond_emits_shared_once() {
        let registry = ClassRegistry::new()
            .with("base", ClassDefinition::declaration("box-sizing: border-box;"))
            .with("left", ClassDefinition::composes_and_declaration(["base"], "float: left;"))
            .with("right", ClassDefinition::composes_and_declaration(["base"], "text-align: right;"))
            .with("both", ClassDefinition::composes(["left", "right"]));

        let css = resolve_composite(&registry, "both").unwrap();
        assert_eq!(css.matches("box-sizing").count(), 1);
        assert_eq!(css, "box-sizing: border-box;\nfloat: left;\ntext-align: right;");
    }

    #[test]
    fn test_cycle_lists_full_path() {
        let registry = ClassRegistry::new()
            .with("a", ClassDefinition::composes(["b"]))
            .with("b", ClassDefinition::composes(["c"]))
            .with("c", ClassDefinition::composes(["a"]));

        let err = resolve_composite(&registry, "a").unwrap_err();
        assert_eq!(err.to_string(), "Circular reference: a → b → c → a");
        assert_eq!(err.category(), ErrorCategory::Structural);
    }

    #[test]
    fn test_self_reference() {
        let registry = ClassRegistry::new().with("loop", ClassDefinition::composes(["loop"]));
        let err = resolve_composite(&registry, "loop").unwrap_err();
        assert_eq!(err, ResolveError::Circular { path: vec!["loop".into(), "loop".into()] });
    }

    #[test]
    fn test_unknown_reference_suggests() {
        let registry = ClassRegistry::new()
            .with("rounded", ClassDefinition::declaration("border-radius: 4px;"))
            .with("card", ClassDefinition::composes(["roundd"]));

        let err = resolve_composite(&registry, "card").unwrap_err();
        assert!(err.to_string().contains("Unknown class 'roundd' in composes array"));
        assert_eq!(err.suggestion().as_deref(), Some("Did you mean 'rounded'?"));
    }

    #[test]
    fn test_ruleset_reference_rejected() {
        let registry = ClassRegistry::new()
            .with("panel", ClassDefinition::ruleset(".panel { padding: 1rem; }"))
            .with("card", ClassDefinition::composes(["panel"]));

        assert!(matches!(
            resolve_composite(&registry, "card"),
            Err(ResolveError::RulesetReference { .. })
        ));
        assert!(matches!(
            resolve_composite(&registry, "panel"),
            Err(ResolveError::NotComposable { .. })
        ));
    }

    #[test]
    fn test_empty_composes_is_valid() {
        let registry = ClassRegistry::new().with("nothing", ClassDefinition::composes(Vec::<String>::new()));
        assert_eq!(resolve_composite(&registry, "nothing").unwrap(), "");
    }
}
