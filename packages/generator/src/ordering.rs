//! Emission order for interpreted classes

use stylesmith_parser::{lookup_modifier, split_segments, ModifierKind};

/// Interaction states in the order their rules must appear so later
/// states override earlier ones
const CASCADE_STATES: &[&str] = &["visited", "focus", "hover", "active"];

/// Sort key for an interpreted class.
///
/// Classes are grouped by their name with state prefixes removed, so all
/// variants of one base sit together. Inside a group, plain classes come
/// first, then `visited < focus < hover < active`, then any other state.
/// The full name breaks remaining ties alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CascadeKey {
    base: String,
    rank: usize,
    name: String,
}

impl CascadeKey {
    pub fn new(class_name: &str) -> Self {
        let segments = split_segments(class_name).unwrap_or_else(|_| vec![class_name]);
        let (last, prefixes) = match segments.split_last() {
            Some((last, prefixes)) => (*last, prefixes),
            None => (class_name, &[][..]),
        };

        let mut base = Vec::with_capacity(segments.len());
        let mut rank = 0;
        for prefix in prefixes {
            match lookup_modifier(prefix) {
                Some(modifier) if modifier.kind == ModifierKind::State => {
                    rank = rank.max(state_rank(&modifier.name));
                }
                _ => base.push(*prefix),
            }
        }
        base.push(last);

        Self {
            base: base.join(":"),
            rank,
            name: class_name.to_string(),
        }
    }
}

fn state_rank(state: &str) -> usize {
    CASCADE_STATES
        .iter()
        .position(|s| *s == state)
        .map_or(CASCADE_STATES.len() + 1, |position| position + 1)
}
