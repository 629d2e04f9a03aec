//! Static class definitions, kept in the order they were declared

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Class '{name}' is defined more than once")]
    Duplicate { name: String },

    #[error("Class '{name}' must define 'declaration', 'composes' or 'ruleset'")]
    EmptyDefinition { name: String },

    #[error("Class '{name}' combines 'ruleset' with 'composes' or 'declaration'")]
    RulesetCombined { name: String },

    #[error("Invalid class registry: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a definition contributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionKind {
    /// Raw declarations, e.g. `padding: 1rem;`
    Declaration(String),
    /// Other definitions flattened in order
    Composes(Vec<String>),
    /// Composed declarations followed by the definition's own
    ComposesAndDeclaration {
        composes: Vec<String>,
        declaration: String,
    },
    /// A complete hand-written CSS block that owns its selectors
    Ruleset(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub kind: DefinitionKind,
    pub comment: Option<String>,
}

impl ClassDefinition {
    pub fn declaration(css: impl Into<String>) -> Self {
        Self::from_kind(DefinitionKind::Declaration(css.into()))
    }

    pub fn composes<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_kind(DefinitionKind::Composes(
            refs.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn composes_and_declaration<I, S>(refs: I, css: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_kind(DefinitionKind::ComposesAndDeclaration {
            composes: refs.into_iter().map(Into::into).collect(),
            declaration: css.into(),
        })
    }

    pub fn ruleset(css: impl Into<String>) -> Self {
        Self::from_kind(DefinitionKind::Ruleset(css.into()))
    }

    fn from_kind(kind: DefinitionKind) -> Self {
        Self {
            kind,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_ruleset(&self) -> bool {
        matches!(self.kind, DefinitionKind::Ruleset(_))
    }
}

/// Class name to definition, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    entries: Vec<(String, ClassDefinition)>,
    index: HashMap<String, usize>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition; redefining a name replaces it in place
    pub fn insert(&mut self, name: impl Into<String>, definition: ClassDefinition) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => self.entries[position].1 = definition,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, definition));
            }
        }
    }

    pub fn with(mut self, name: impl Into<String>, definition: ClassDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ClassDefinition> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    /// The stored name and definition for `name`
    pub fn entry(&self, name: &str) -> Option<(&str, &ClassDefinition)> {
        self.index.get(name).map(|&position| {
            let (key, definition) = &self.entries[position];
            (key.as_str(), definition)
        })
    }

    /// Declaration order of `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassDefinition)> {
        self.entries
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    /// Read `{ "name": { "declaration"?, "composes"?, "ruleset"?, "comment"? } }`,
    /// keeping the object's key order
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let OrderedEntries(raw_entries) = serde_json::from_str(json)?;

        let mut registry = Self::new();
        for (name, raw) in raw_entries {
            if registry.contains(&name) {
                return Err(RegistryError::Duplicate { name });
            }
            let definition = raw.into_definition(&name)?;
            registry.insert(name, definition);
        }
        Ok(registry)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefinition {
    declaration: Option<String>,
    composes: Option<Vec<String>>,
    ruleset: Option<String>,
    comment: Option<String>,
}

impl RawDefinition {
    fn into_definition(self, name: &str) -> Result<ClassDefinition, RegistryError> {
        let kind = match (self.ruleset, self.composes, self.declaration) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(RegistryError::RulesetCombined {
                    name: name.to_string(),
                })
            }
            (Some(ruleset), None, None) => DefinitionKind::Ruleset(ruleset),
            (None, Some(composes), Some(declaration)) => {
                DefinitionKind::ComposesAndDeclaration {
                    composes,
                    declaration,
                }
            }
            (None, Some(composes), None) => DefinitionKind::Composes(composes),
            (None, None, Some(declaration)) => DefinitionKind::Declaration(declaration),
            (None, None, None) => {
                return Err(RegistryError::EmptyDefinition {
                    name: name.to_string(),
                })
            }
        };

        Ok(ClassDefinition {
            kind,
            comment: self.comment,
        })
    }
}

/// A JSON object read as a list of pairs so key order survives
struct OrderedEntries(Vec<(String, RawDefinition)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of class definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawDefinition>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Declaration(_) => "declaration",
            Self::Composes(_) => "composes",
            Self::ComposesAndDeclaration { .. } => "composes+declaration",
            Self::Ruleset(_) => "ruleset",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut registry = ClassRegistry::new();
        registry.insert("b", ClassDefinition::declaration("color: blue;"));
        registry.insert("a", ClassDefinition::declaration("color: red;"));
        registry.insert("b", ClassDefinition::declaration("color: green;"));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(
            registry.get("b").unwrap().kind,
            DefinitionKind::Declaration("color: green;".to_string())
        );
        assert_eq!(registry.position("a"), Some(1));
    }

    #[test]
    fn test_from_json_preserves_key_order() {
        let json = r#"{
            "stack": { "declaration": "display: flex; flex-direction: column;" },
            "card": { "composes": ["stack"], "declaration": "padding: 1rem;", "comment": "Card" },
            "center": { "composes": ["stack"] },
            "panel": { "ruleset": ".panel { padding: 2rem; }" }
        }"#;
        let registry = ClassRegistry::from_json(json).unwrap();

        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["stack", "card", "center", "panel"]
        );
        assert_eq!(registry.get("card").unwrap().comment.as_deref(), Some("Card"));
        assert!(registry.get("panel").unwrap().is_ruleset());
        assert!(matches!(
            registry.get("center").unwrap().kind,
            DefinitionKind::Composes(_)
        ));
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        let err = ClassRegistry::from_json(r#"{ "x": { "ruleset": ".x {}", "composes": [] } }"#)
            .unwrap_err();
        assert!(matches!(err, RegistryError::RulesetCombined { .. }));

        let err = ClassRegistry::from_json(r#"{ "x": { "comment": "nothing" } }"#).unwrap_err();
        assert!(matches!(err, RegistryError::EmptyDefinition { .. }));

        let err = ClassRegistry::from_json(r#"{ "x": { "declartion": "a: b;" } }"#).unwrap_err();
        assert!(matches!(err, RegistryError::Json(_)));

        let err = ClassRegistry::from_json(
            r#"{ "x": { "declaration": "a: b;" }, "x": { "declaration": "c: d;" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
    }
}
