use crate::error::{LiteralError, LiteralResult};

/// Split a class name on `:` at depth zero.
///
/// Colons nested inside `()` or `[]`, inside quoted strings, or escaped with a
/// backslash do not split, so `nth-child(2n+1):color:red` yields
/// `["nth-child(2n+1)", "color", "red"]`.
pub fn split_segments(name: &str) -> LiteralResult<Vec<&str>> {
    let bytes = name.as_bytes();
    let mut segments = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<u8> = None;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'\\' {
            i += 2;
            continue;
        }

        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' | b'\'' => quote = Some(b),
            b'(' | b'[' => depth += 1,
            b')' | b']' => {
                depth = depth.checked_sub(1).ok_or_else(|| LiteralError::Unbalanced {
                    name: name.to_string(),
                })?;
            }
            b':' if depth == 0 => {
                segments.push(&name[start..i]);
                start = i + 1;
            }
            _ => {}
        }

        i += 1;
    }

    if depth != 0 || quote.is_some() {
        return Err(LiteralError::Unbalanced {
            name: name.to_string(),
        });
    }

    segments.push(&name[start.min(name.len())..]);
    Ok(segments)
}
