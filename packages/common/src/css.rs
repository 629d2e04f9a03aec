//! Small helpers for laying out generated CSS text

const INDENT: &str = "  ";

/// Indent every non-empty line of `text` by one level
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", INDENT, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap `body` in a block opened by `header` (a selector or an at-rule prelude)
pub fn wrap_block(header: &str, body: &str) -> String {
    format!("{} {{\n{}\n}}", header, indent(body.trim_end()))
}

/// Wrap `body` in each header in turn; the first header ends up outermost
pub fn wrap_blocks<'a, I>(headers: I, body: String) -> String
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: DoubleEndedIterator,
{
    headers
        .into_iter()
        .rev()
        .fold(body, |inner, header| wrap_block(header, &inner))
}

/// Render a comment above a rule
pub fn comment_block(comment: &str) -> String {
    format!("/* {} */", comment.trim().replace("*/", "* /"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_block_indents_body() {
        let css = wrap_block(".box", "padding: 1rem;\ncolor: red;");
        assert_eq!(css, ".box {\n  padding: 1rem;\n  color: red;\n}");
    }

    #[test]
    fn test_wrap_blocks_outermost_first() {
        let css = wrap_blocks(
            ["@media (width >= 48rem)", ":root.dark"],
            ".x {\n  color: red;\n}".to_string(),
        );
        assert_eq!(
            css,
            "@media (width >= 48rem) {\n  :root.dark {\n    .x {\n      color: red;\n    }\n  }\n}"
        );
    }

    #[test]
    fn test_comment_block_neutralizes_terminator() {
        assert_eq!(comment_block("a */ b"), "/* a * / b */");
    }
}
