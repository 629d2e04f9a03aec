use stylesmith_parser::{
    generate_modified_ruleset, is_single_selector_ruleset, modify_single_selector, parse_ruleset,
    ruleset_contains_class, ModifierOutput, SkipReason,
};

#[test]
fn test_no_doubled_state() {
    let rewrite = modify_single_selector(".plain:hover", "plain", "hover\\:plain", ":hover", "");

    assert!(!rewrite.selector.contains(":hover:hover"));
    assert_eq!(rewrite.selector, ".hover\\:plain:hover");
    assert_eq!(rewrite.skipped.len(), 1);
}

#[test]
fn test_unmatched_selector_is_unchanged() {
    let rewrite = modify_single_selector(".other > p", "plain", "hover\\:plain", ":hover", "");

    assert!(!rewrite.matched);
    assert_eq!(rewrite.selector, ".other > p");
}

#[test]
fn test_state_precedes_pseudo_element() {
    let rewrite = modify_single_selector(".tip .label", "tip", "focus\\:after\\:tip", ":focus", "::after");
    assert_eq!(rewrite.selector, ".focus\\:after\\:tip:focus::after .label");
}

#[test]
fn test_multi_selector_ruleset_roundtrip() {
    let css = r#"
/* Elevated surface */
.panel, .panel-group > .panel {
  padding: 1rem;
}
.panel:hover {
  box-shadow: 0 4px 8px rgba(0, 0, 0, 0.15);
}
@media (width >= 64rem) {
  .panel { padding: 2rem; }
}
"#;
    let parsed = parse_ruleset(css);
    assert_eq!(parsed.rules.len(), 3);
    assert_eq!(parsed.leading_comments, vec!["/* Elevated surface */".to_string()]);
    assert!(ruleset_contains_class(&parsed.rules, "panel"));
    assert!(!is_single_selector_ruleset(&parsed.rules, "panel"));

    let output = ModifierOutput {
        ancestor_wrapper: Some(":root.dark".to_string()),
        state_suffix: ":hover".to_string(),
        ..Default::default()
    };
    let result = generate_modified_ruleset(css, "panel", "dark\\:hover\\:panel", &output);

    assert!(result.css.starts_with(":root.dark {"));
    assert!(result.css.contains(".dark\\:hover\\:panel:hover,\n"));
    assert!(result.css.contains(".panel-group > .dark\\:hover\\:panel:hover"));
    assert!(!result.css.contains(":hover:hover"));
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, SkipReason::StateConflict);
    assert_eq!(result.skipped[0].reason.as_str(), "state_conflict");
}
