use std::fmt;

/// The light and dark `:root` blocks for a set of theme variables.
///
/// Either block is empty when no requested variable has a value for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeCss {
    pub light: String,
    pub dark: String,
}

impl ThemeCss {
    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }

    /// Both blocks, light first, skipping empty ones
    pub fn to_css(&self) -> String {
        [self.light.as_str(), self.dark.as_str()]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for ThemeCss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
