use stylesmith_theme::{load_theme_variables, VariableGraph};

const THEME: &str = r##"[
    { "name": "surface", "light": "#ffffff", "dark": "#101014", "summary": "Card and panel background" },
    { "name": "ink", "light": "#15151a", "dark": "#f2f2f5" },
    { "name": "border", "light": "color-mix(in srgb, var(--ink) 12%, var(--surface))" },
    { "name": "shadow_md", "light": "0 4px 8px var(--shadow_color, rgba(0, 0, 0, 0.15))" },
    { "name": "ring", "light": "var(--accent, var(--ink))", "dark": "var(--accent)" },
    { "name": "unused", "light": "1px" }
]"##;

#[test]
fn test_only_referenced_variables_are_emitted() {
    let variables = load_theme_variables(THEME).unwrap();
    let graph = VariableGraph::build(&variables).unwrap();

    let resolution = graph.resolve_transitive(["border", "ring"]);
    let names: Vec<&str> = resolution.resolved.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["accent", "border", "ink", "ring", "surface"]);
    assert_eq!(resolution.missing.len(), 1);
    assert!(resolution.missing.contains("accent"));

    let css = graph.generate_theme_css(&resolution.resolved, 1).to_css();
    assert!(css.contains("--border: color-mix(in srgb, var(--ink) 12%, var(--surface));"));
    assert!(css.contains(":root.dark {\n  --ink: #f2f2f5;"));
    assert!(!css.contains("--unused"));
    assert!(!css.contains("--accent:"));
}

#[test]
fn test_missing_fallback_variable_is_reported() {
    let variables = load_theme_variables(THEME).unwrap();
    let graph = VariableGraph::build(&variables).unwrap();

    let resolution = graph.resolve_transitive(["shadow_md"]);
    assert!(resolution.missing.contains("shadow_color"));
    assert_eq!(
        graph.find_similar_variable("shadow_mdd").as_deref(),
        Some("shadow_md")
    );
}
