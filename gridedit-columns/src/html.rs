//! Minimal HTML building helpers.

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render ` key="value"` with the value escaped.
pub(crate) fn attr(key: &str, value: &str) -> String {
    format!(" {}=\"{}\"", key, escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_attr() {
        assert_eq!(attr("name", "G[a]"), " name=\"G[a]\"");
        assert_eq!(attr("value", "\"q\""), " value=\"&quot;q&quot;\"");
    }
}
