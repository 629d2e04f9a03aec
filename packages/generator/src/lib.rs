//! Class-name driven CSS generation
//!
//! Given the class names found in a project, [`CssGenerator`] emits CSS
//! for each one from, in priority order:
//!
//! 1. a static [`ClassDefinition`] in the [`ClassRegistry`]
//! 2. the first [`ClassInterpreter`] that claims the name: CSS literals
//!    such as `md:hover:color:red`, then modifiers applied to registered
//!    classes such as `dark:card`
//!
//! Problems are returned as [`Diagnostic`]s; one bad class never stops the
//! rest of the batch.
//!
//! ```rust,ignore
//! use stylesmith_generator::{generate, ClassDefinition, ClassRegistry, InterpreterRegistry};
//! use stylesmith_parser::KnownProperties;
//!
//! let registry = ClassRegistry::new().with("box", ClassDefinition::declaration("padding: 1rem;"));
//! let result = generate(
//!     ["hover:box", "display:flex"],
//!     &registry,
//!     &InterpreterRegistry::new(),
//!     &KnownProperties::bundled(),
//! );
//! assert!(!result.has_errors());
//! ```

pub mod config;
pub mod generator;
pub mod interpreters;
pub mod ordering;
pub mod registry;
pub mod resolver;
mod ruleset;

pub use config::{GeneratorConfig, UnknownPropertyPolicy, DEFAULT_CONFIG_NAME};
pub use generator::{generate, CssGenerator, GenerationResult};
pub use interpreters::{
    render_rule, ClassInterpreter, CssLiteralInterpreter, InterpretContext, Interpretation,
    InterpreterRegistry, ModifiedClassInterpreter,
};
pub use registry::{ClassDefinition, ClassRegistry, DefinitionKind, RegistryError};
pub use resolver::{resolve_composite, ResolveError, ResolveResult};
pub use stylesmith_common::{Diagnostic, DiagnosticLevel, DiagnosticPhase, SourceLocation};
