/// Escape a raw class name so it can be emitted as a CSS class selector.
///
/// Every character outside `[A-Za-z0-9_-]` is backslash-escaped. A leading
/// digit (or a digit right after a leading `-`) and control characters use
/// the hex form, because a plain backslash cannot make them valid there.
pub fn escape_css_selector(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 8);
    let leading_dash = name.starts_with('-');

    for (index, ch) in name.chars().enumerate() {
        let at_identifier_start = index == 0 || (index == 1 && leading_dash);

        if ch.is_ascii_digit() && at_identifier_start {
            push_hex_escape(&mut escaped, ch);
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            escaped.push(ch);
        } else if ch.is_control() {
            push_hex_escape(&mut escaped, ch);
        } else {
            escaped.push('\\');
            escaped.push(ch);
        }
    }

    escaped
}

fn push_hex_escape(out: &mut String, ch: char) {
    // The trailing space terminates the hex sequence.
    out.push_str(&format!("\\{:x} ", ch as u32));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_colons_and_percent() {
        assert_eq!(escape_css_selector("hover:opacity:80%"), r"hover\:opacity\:80\%");
    }

    #[test]
    fn test_leaves_plain_names_alone() {
        assert_eq!(escape_css_selector("p_md"), "p_md");
        assert_eq!(escape_css_selector("card-title"), "card-title");
    }

    #[test]
    fn test_escapes_leading_digit() {
        assert_eq!(escape_css_selector("2xl:p_md"), r"\32 xl\:p_md");
        assert_eq!(escape_css_selector("-1x"), r"-\31 x");
    }

    #[test]
    fn test_escapes_literal_punctuation() {
        assert_eq!(
            escape_css_selector("width:calc(100%~-~1rem)"),
            r"width\:calc\(100\%\~-\~1rem\)"
        );
        assert_eq!(
            escape_css_selector("color:red!important"),
            r"color\:red\!important"
        );
    }

    #[test]
    fn test_escapes_non_ascii() {
        assert_eq!(escape_css_selector("content:\"é\""), "content\\:\\\"\\é\\\"");
    }
}
