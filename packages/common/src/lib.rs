pub mod css;
pub mod diagnostic;
pub mod escape;
pub mod similarity;

pub use diagnostic::*;
pub use escape::escape_css_selector;
pub use similarity::{find_closest, similarity, SUGGESTION_THRESHOLD};
