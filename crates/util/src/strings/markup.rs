use std::sync::OnceLock;

fn tag_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"<[^>]*>").unwrap())
}

/// Removes markup tags, keeping the text between them.
///
/// # Examples
///
/// ```
/// use vactory_util::strings::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
/// ```
pub fn strip_tags(html: &str) -> String {
    tag_regex().replace_all(html, "").into_owned()
}

/// Length in characters of the visible text of an HTML fragment.
///
/// Tags and line breaks (`\n`, `\r`) do not count.
///
/// # Examples
///
/// ```
/// use vactory_util::strings::plain_text_len;
///
/// assert_eq!(plain_text_len("<p>abc</p>\r\n<p>de</p>"), 5);
/// ```
pub fn plain_text_len(html: &str) -> usize {
    strip_tags(html)
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_plain_text_untouched() {
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_strip_tags_attributes() {
        assert_eq!(strip_tags(r#"<a href="/x" class="btn">Go</a>"#), "Go");
    }

    #[test]
    fn test_plain_text_len_counts_chars_not_bytes() {
        assert_eq!(plain_text_len("<em>été</em>"), 3);
    }

    #[test]
    fn test_plain_text_len_empty() {
        assert_eq!(plain_text_len("<p></p>\n"), 0);
    }
}
