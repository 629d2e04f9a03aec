use std::collections::BTreeSet;
use stylesmith_common::find_closest;

const BUNDLED_PROPERTIES: &str = include_str!("css_properties.txt");

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// Set of CSS property names accepted in literal classes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownProperties {
    properties: BTreeSet<String>,
}

impl KnownProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard property list shipped with the crate
    pub fn bundled() -> Self {
        Self::from_list(BUNDLED_PROPERTIES)
    }

    /// Build from newline-separated names; blank lines and `#` comments are skipped
    pub fn from_list(list: &str) -> Self {
        list.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    pub fn insert(&mut self, property: impl Into<String>) {
        self.properties.insert(property.into());
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Custom properties are always known; vendor-prefixed names are known
    /// when their unprefixed form is
    pub fn is_known(&self, property: &str) -> bool {
        if property.starts_with("--") && property.len() > 2 {
            return true;
        }
        if self.properties.contains(property) {
            return true;
        }
        VENDOR_PREFIXES
            .iter()
            .filter_map(|prefix| property.strip_prefix(prefix))
            .any(|unprefixed| self.properties.contains(unprefixed))
    }

    /// Closest known name, if any is similar enough
    pub fn suggest(&self, property: &str) -> Option<String> {
        find_closest(property, self.properties.iter().map(String::as_str))
    }
}

impl<S: Into<String>> FromIterator<S> for KnownProperties {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().map(Into::into).collect(),
        }
    }
}
