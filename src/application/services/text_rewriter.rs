use std::sync::LazyLock;

use regex::Regex;

/// Any inline image token, whatever its target.
static MD_IMAGE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[(.*?)\]\([^)]+\)").expect("image token pattern is valid")
});

/// Placeholder replaced with the processed image count.
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// Default notice appended after the rewritten text.
pub const DEFAULT_NOTICE_TEMPLATE: &str = "📷 已处理 {count} 张图片";

/// Turns Markdown image syntax into plain text for transports that cannot
/// render it.
#[derive(Debug, Clone)]
pub struct TextRewriter {
    notice_template: String,
}

impl Default for TextRewriter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TEMPLATE)
    }
}

impl TextRewriter {
    /// Creates a rewriter using `notice_template` for the trailing notice.
    #[must_use]
    pub fn new(notice_template: impl Into<String>) -> Self {
        Self {
            notice_template: notice_template.into(),
        }
    }

    /// Replaces every image token with its alt text and, when
    /// `processed_count > 0`, appends a blank line and the notice.
    #[must_use]
    pub fn rewrite(&self, text: &str, processed_count: usize) -> String {
        let mut result = MD_IMAGE_TOKEN_RE.replace_all(text, "${1}").into_owned();

        if processed_count > 0 {
            result.push_str("\n\n");
            result.push_str(&self.notice(processed_count));
        }

        result
    }

    /// Renders the notice line for `count` images.
    #[must_use]
    pub fn notice(&self, count: usize) -> String {
        self.notice_template.replace(COUNT_PLACEHOLDER, &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_single_image_with_notice() {
        let rewriter = TextRewriter::default();
        assert_eq!(
            rewriter.rewrite("Look ![cat](https://example.com/a.png)", 1),
            "Look cat\n\n📷 已处理 1 张图片"
        );
    }

    #[test]
    fn test_zero_count_strips_without_notice() {
        let rewriter = TextRewriter::default();
        assert_eq!(rewriter.rewrite("![](https://bad.example/x)", 0), "");
    }

    #[test]
    fn test_every_token_stripped_regardless_of_count() {
        let rewriter = TextRewriter::default();
        let text = "a ![one](https://x/1.png) b ![two](https://x/2.png)";
        assert_eq!(rewriter.rewrite(text, 1), "a one b two\n\n📷 已处理 1 张图片");
    }

    #[test]
    fn test_non_http_tokens_are_stripped_too() {
        let rewriter = TextRewriter::default();
        assert_eq!(rewriter.rewrite("![rel](images/a.png)!", 0), "rel!");
    }

    #[test_case("plain text" ; "plain")]
    #[test_case("" ; "empty")]
    #[test_case("[link](https://example.com)" ; "link")]
    #[test_case("Look cat\n\n📷 已处理 1 张图片" ; "already_rewritten")]
    fn test_idempotent_on_text_without_tokens(text: &str) {
        let rewriter = TextRewriter::default();
        assert_eq!(rewriter.rewrite(text, 0), text);
    }

    #[test]
    fn test_custom_template() {
        let rewriter = TextRewriter::new("processed {count} image(s)");
        assert_eq!(
            rewriter.rewrite("![a](https://x/a.png)", 3),
            "a\n\nprocessed 3 image(s)"
        );
    }

    #[test]
    fn test_alt_with_dollar_sign_is_literal() {
        let rewriter = TextRewriter::default();
        assert_eq!(rewriter.rewrite("![$5 deal](https://x/a.png)", 0), "$5 deal");
    }
}
