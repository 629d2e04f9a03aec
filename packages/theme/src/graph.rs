use crate::css::ThemeCss;
use crate::error::ThemeResult;
use crate::variable::{validate_theme_variables, ThemeVariable};
use crc32fast::Hasher;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use stylesmith_common::css::wrap_block;
use stylesmith_common::find_closest;
use tracing::{debug, instrument, warn};

/// Bumped whenever the graph layout changes
pub const GRAPH_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNode {
    pub name: String,
    pub light_css: Option<String>,
    pub dark_css: Option<String>,
    pub light_deps: BTreeSet<String>,
    pub dark_deps: BTreeSet<String>,
}

impl VariableNode {
    fn from_variable(variable: &ThemeVariable) -> Self {
        let deps = |value: &Option<String>| {
            value
                .as_deref()
                .map(extract_var_references)
                .unwrap_or_default()
        };

        Self {
            name: variable.name.clone(),
            light_deps: deps(&variable.light),
            dark_deps: deps(&variable.dark),
            light_css: variable.light.clone(),
            dark_css: variable.dark.clone(),
        }
    }

    /// Light and dark dependencies together
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.light_deps
            .union(&self.dark_deps)
            .map(String::as_str)
    }
}

/// Outcome of [`VariableGraph::resolve_transitive`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableResolution {
    /// Every variable reachable from the roots, including missing ones
    pub resolved: BTreeSet<String>,
    /// Reachable names with no entry in the graph
    pub missing: BTreeSet<String>,
    pub warnings: Vec<String>,
}

/// Immutable dependency graph over a theme table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableGraph {
    variables: BTreeMap<String, VariableNode>,
    version: u32,
    content_hash: String,
}

impl VariableGraph {
    #[instrument(skip(variables), fields(variables = variables.len()))]
    pub fn build(variables: &[ThemeVariable]) -> ThemeResult<Self> {
        validate_theme_variables(variables)?;

        let variables: BTreeMap<String, VariableNode> = variables
            .iter()
            .map(|variable| (variable.name.clone(), VariableNode::from_variable(variable)))
            .collect();
        let content_hash = hash_variables(&variables);

        debug!(hash = %content_hash, "Built variable graph");

        Ok(Self {
            variables,
            version: GRAPH_VERSION,
            content_hash,
        })
    }

    pub fn get(&self, name: &str) -> Option<&VariableNode> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// CRC32 of the sorted table, as lowercase hex
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Every variable reachable from `roots` through light or dark values.
    ///
    /// Cycles produce a warning and do not stop the walk.
    pub fn resolve_transitive<I, S>(&self, roots: I) -> VariableResolution
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolution = VariableResolution::default();
        let mut path = Vec::new();
        let mut on_path = HashSet::new();

        for root in roots {
            let root = root.as_ref().trim_start_matches("--");
            match self.variables.get_key_value(root) {
                Some((name, _)) => self.visit(name, &mut path, &mut on_path, &mut resolution),
                None => {
                    resolution.resolved.insert(root.to_string());
                    resolution.missing.insert(root.to_string());
                }
            }
        }

        debug!(
            resolved = resolution.resolved.len(),
            missing = resolution.missing.len(),
            "Resolved theme variables"
        );
        resolution
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        path: &mut Vec<&'a str>,
        on_path: &mut HashSet<&'a str>,
        resolution: &mut VariableResolution,
    ) {
        if on_path.contains(name) {
            let start = path.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<&str> = path[start..].to_vec();
            cycle.push(name);
            let message = format!("Circular variable reference: {}", cycle.join(" → "));
            warn!(cycle = %cycle.join(" → "), "Theme variable cycle");
            resolution.warnings.push(message);
            return;
        }
        if !resolution.resolved.insert(name.to_string()) {
            return;
        }

        let Some(node) = self.variables.get(name) else {
            resolution.missing.insert(name.to_string());
            return;
        };

        path.push(name);
        on_path.insert(name);
        for dep in node.dependencies() {
            self.visit(dep, path, on_path, resolution);
        }
        on_path.remove(name);
        path.pop();
    }

    /// Emit the light and dark `:root` blocks for `names`.
    ///
    /// Names without an entry, or without a value for a mode, contribute
    /// nothing to that mode. A multiplier of zero is treated as one.
    pub fn generate_theme_css<I, S>(&self, names: I, specificity_multiplier: usize) -> ThemeCss
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim_start_matches("--").to_string())
            .collect();
        let repeat = specificity_multiplier.max(1);

        let mut light = Vec::new();
        let mut dark = Vec::new();
        for node in names.iter().filter_map(|name| self.variables.get(name)) {
            if let Some(value) = &node.light_css {
                light.push(format!("--{}: {};", node.name, value));
            }
            if let Some(value) = &node.dark_css {
                dark.push(format!("--{}: {};", node.name, value));
            }
        }

        let block = |selector: &str, declarations: Vec<String>| {
            if declarations.is_empty() {
                String::new()
            } else {
                wrap_block(&selector.repeat(repeat), &declarations.join("\n"))
            }
        };

        ThemeCss {
            light: block(":root", light),
            dark: block(":root.dark", dark),
        }
    }

    /// Closest existing variable name, if any is similar enough
    pub fn find_similar_variable(&self, typo: &str) -> Option<String> {
        find_closest(typo.trim_start_matches("--"), self.names())
    }
}

fn hash_variables(variables: &BTreeMap<String, VariableNode>) -> String {
    let mut hasher = Hasher::new();
    for node in variables.values() {
        hasher.update(node.name.as_bytes());
        for value in [&node.light_css, &node.dark_css] {
            hasher.update(&[0]);
            hasher.update(value.as_deref().unwrap_or_default().as_bytes());
        }
        hasher.update(b"\n");
    }
    format!("{:08x}", hasher.finalize())
}

/// Names referenced through `var(--name ...)` anywhere in `value`,
/// including nested fallbacks and every operand of `calc()`.
/// Returned without the leading `--`.
pub fn extract_var_references(value: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = value;

    while let Some(offset) = rest.find("var(") {
        rest = rest[offset + "var(".len()..].trim_start();
        if let Some(after) = rest.strip_prefix("--") {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
                .unwrap_or(after.len());
            if end > 0 {
                names.insert(after[..end].to_string());
            }
            rest = &after[end..];
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, light: &str) -> ThemeVariable {
        ThemeVariable::new(name).with_light(light)
    }

    #[test]
    fn test_extract_nested_fallbacks() {
        let refs = extract_var_references("var(--a, var(--b, var(--c)))");
        let expected: BTreeSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(refs, expected);
    }

    #[test]
    fn test_extract_calc_operands() {
        let refs = extract_var_references("calc(var(--space_md) * 2 + var( --gap))");
        assert_eq!(refs.len(), 2);
        assert!(refs.contains("space_md"));
        assert!(refs.contains("gap"));
    }

    #[test]
    fn test_extract_ignores_plain_values() {
        assert!(extract_var_references("#fff").is_empty());
        assert!(extract_var_references("var(--)").is_empty());
    }

    #[test]
    fn test_build_records_deps_per_mode() {
        let graph = VariableGraph::build(&[
            ThemeVariable::new("fg")
                .with_light("var(--ink)")
                .with_dark("var(--paper)"),
            var("ink", "#111"),
            var("paper", "#fafafa"),
        ])
        .unwrap();

        let fg = graph.get("fg").unwrap();
        assert!(fg.light_deps.contains("ink"));
        assert!(fg.dark_deps.contains("paper"));
        assert_eq!(graph.version(), GRAPH_VERSION);
        assert_eq!(graph.content_hash().len(), 8);
    }

    #[test]
    fn test_content_hash_tracks_values() {
        let a = VariableGraph::build(&[var("bg", "#fff")]).unwrap();
        let b = VariableGraph::build(&[var("bg", "#fff")]).unwrap();
        let c = VariableGraph::build(&[var("bg", "#000")]).unwrap();

        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn test_resolve_diamond() {
        let graph = VariableGraph::build(&[
            var("root", "var(--a) var(--b)"),
            var("a", "var(--d) var(--c)"),
            var("b", "var(--d) var(--e)"),
            var("c", "1px"),
            var("d", "2px"),
            var("e", "3px"),
        ])
        .unwrap();

        let resolution = graph.resolve_transitive(["root"]);
        assert_eq!(resolution.resolved.len(), 6);
        assert!(resolution.missing.is_empty());
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_resolve_missing_dependency() {
        let graph = VariableGraph::build(&[var("bg", "var(--nope, white)")]).unwrap();
        let resolution = graph.resolve_transitive(["--bg"]);

        assert!(resolution.resolved.contains("nope"));
        assert!(resolution.missing.contains("nope"));
    }

    #[test]
    fn test_resolve_cycle_is_warning() {
        let graph = VariableGraph::build(&[
            var("a", "var(--b)"),
            var("b", "var(--a)"),
        ])
        .unwrap();

        let resolution = graph.resolve_transitive(["a"]);
        assert_eq!(resolution.resolved.len(), 2);
        assert_eq!(resolution.warnings, vec!["Circular variable reference: a → b → a".to_string()]);
    }

    #[test]
    fn test_generate_theme_css() {
        let graph = VariableGraph::build(&[
            ThemeVariable::new("bg").with_light("#fff").with_dark("#111"),
            var("accent", "blue"),
        ])
        .unwrap();

        let css = graph.generate_theme_css(["bg", "accent", "unknown"], 1);
        assert_eq!(css.light, ":root {\n  --accent: blue;\n  --bg: #fff;\n}");
        assert_eq!(css.dark, ":root.dark {\n  --bg: #111;\n}");

        let css = graph.generate_theme_css(["bg"], 2);
        assert!(css.light.starts_with(":root:root {"));
        assert!(css.dark.starts_with(":root.dark:root.dark {"));
    }

    #[test]
    fn test_generate_theme_css_empty_modes() {
        let graph = VariableGraph::build(&[var("accent", "blue")]).unwrap();
        let css = graph.generate_theme_css(["accent"], 0);

        assert_eq!(css.light, ":root {\n  --accent: blue;\n}");
        assert!(css.dark.is_empty());
    }

    #[test]
    fn test_find_similar_variable() {
        let graph = VariableGraph::build(&[var("color_primary", "blue"), var("space_md", "1rem")]).unwrap();

        assert_eq!(graph.find_similar_variable("--color_primry").as_deref(), Some("color_primary"));
        assert_eq!(graph.find_similar_variable("zzz"), None);
    }
}
