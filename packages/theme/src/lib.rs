//! Theme variables and the dependency graph between them
//!
//! A theme is a table of custom properties with optional light and dark
//! values. [`VariableGraph`] records which variables each value refers to so
//! a build can emit only the `:root` entries that the generated CSS needs,
//! along with everything those entries depend on.

pub mod css;
pub mod error;
pub mod graph;
pub mod variable;

pub use css::ThemeCss;
pub use error::{ThemeError, ThemeResult};
pub use graph::{extract_var_references, VariableGraph, VariableNode, VariableResolution, GRAPH_VERSION};
pub use variable::{load_theme_variables, validate_theme_variables, ThemeVariable};
