use crate::error::{ThemeError, ThemeResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid variable name pattern"))
}

/// One row of the theme table, emitted as `--{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeVariable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ThemeVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            light: None,
            dark: None,
            summary: None,
        }
    }

    pub fn with_light(mut self, value: impl Into<String>) -> Self {
        self.light = Some(value.into());
        self
    }

    pub fn with_dark(mut self, value: impl Into<String>) -> Self {
        self.dark = Some(value.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn validate(&self) -> ThemeResult<()> {
        if !name_pattern().is_match(&self.name) || self.name.ends_with('_') {
            return Err(ThemeError::InvalidName {
                name: self.name.clone(),
            });
        }

        match (&self.light, &self.dark) {
            (None, None) => Err(ThemeError::MissingValue {
                name: self.name.clone(),
            }),
            (Some(light), Some(dark)) if light == dark => Err(ThemeError::IdenticalValues {
                name: self.name.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// Validate a whole table, rejecting duplicate names
pub fn validate_theme_variables(variables: &[ThemeVariable]) -> ThemeResult<()> {
    let mut seen = HashSet::new();
    for variable in variables {
        variable.validate()?;
        if !seen.insert(variable.name.as_str()) {
            return Err(ThemeError::Duplicate {
                name: variable.name.clone(),
            });
        }
    }
    Ok(())
}

/// Read a theme table from a JSON array of `{ name, light?, dark?, summary? }`
pub fn load_theme_variables(json: &str) -> ThemeResult<Vec<ThemeVariable>> {
    let variables: Vec<ThemeVariable> = serde_json::from_str(json)?;
    validate_theme_variables(&variables)?;
    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["bg", "color_a_5", "shadow2"] {
            assert!(ThemeVariable::new(name).with_light("red").validate().is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "Bg", "2bg", "bg_", "bg-main", "_bg"] {
            let result = ThemeVariable::new(name).with_light("red").validate();
            assert!(matches!(result, Err(ThemeError::InvalidName { .. })), "{}", name);
        }
    }

    #[test]
    fn test_value_rules() {
        assert!(matches!(
            ThemeVariable::new("bg").validate(),
            Err(ThemeError::MissingValue { .. })
        ));
        assert!(matches!(
            ThemeVariable::new("bg").with_light("#fff").with_dark("#fff").validate(),
            Err(ThemeError::IdenticalValues { .. })
        ));
        assert!(ThemeVariable::new("bg").with_dark("#000").validate().is_ok());
    }

    #[test]
    fn test_load_theme_variables() {
        let json = r##"[
            { "name": "bg", "light": "#fff", "dark": "#111", "summary": "Page background" },
            { "name": "fg", "light": "var(--bg)" }
        ]"##;
        let variables = load_theme_variables(json).unwrap();

        assert_eq!(variables.len(), 2);
        assert_eq!(variables[0].summary.as_deref(), Some("Page background"));
        assert_eq!(variables[1].dark, None);
    }

    #[test]
    fn test_load_rejects_duplicates_and_bad_json() {
        let json = r#"[{ "name": "bg", "light": "red" }, { "name": "bg", "light": "blue" }]"#;
        let err = load_theme_variables(json).unwrap_err();
        assert!(matches!(err, ThemeError::Duplicate { .. }));
        assert_eq!(err.name(), Some("bg"));

        assert!(matches!(load_theme_variables("{"), Err(ThemeError::Json(_))));
    }
}
