pub mod error;
pub mod literal;
pub mod modifier;
pub mod properties;
pub mod rewrite;
pub mod ruleset;
pub mod segment;
pub mod selector;

pub use error::{LiteralError, LiteralResult};
pub use literal::{
    format_value, has_ambiguous_calc, interpret_literal, is_possible_css_literal, parse_literal,
    LiteralOutput, ParsedLiteral,
};
pub use modifier::{lookup_modifier, modifier_names, Modifier, ModifierKind, ModifierOutput, ModifierSet};
pub use properties::KnownProperties;
pub use rewrite::{generate_modified_ruleset, modify_selector_group, ModifiedRuleset, SelectorGroupRewrite};
pub use ruleset::{is_single_selector_ruleset, parse_ruleset, ruleset_contains_class, ParsedRuleset, Rule};
pub use segment::split_segments;
pub use selector::{modify_single_selector, SelectorRewrite, SkipReason, SkippedModifier};
