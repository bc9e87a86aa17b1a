use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::ImageReference;

/// Inline image token: `![alt](http(s)://url)`. The URL stops at the first
/// whitespace or `)`.
static MD_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[(.*?)\]\((https?://[^\s)]+)\)").expect("inline image pattern is valid")
});

/// Finds Markdown inline images in free-form message text.
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    /// Returns every image reference in order of appearance.
    ///
    /// Duplicates are kept; each occurrence is its own reference.
    #[must_use]
    pub fn extract(content: &str) -> Vec<ImageReference> {
        if !content.contains("![") {
            return Vec::new();
        }

        MD_IMAGE_RE
            .captures_iter(content)
            .filter_map(|cap| {
                let url = cap.get(2)?.as_str();
                let alt = cap.get(1).map_or("", |m| m.as_str());
                Some(ImageReference::new(url, alt))
            })
            .collect()
    }

    /// Returns true if the text holds at least one image reference.
    #[must_use]
    pub fn contains_images(content: &str) -> bool {
        content.contains("![") && MD_IMAGE_RE.is_match(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn urls(content: &str) -> Vec<String> {
        ReferenceExtractor::extract(content)
            .iter()
            .map(|r| r.url().to_string())
            .collect()
    }

    #[test]
    fn test_extract_markdown_image() {
        let refs = ReferenceExtractor::extract("Look ![cat](https://example.com/a.png)");
        assert_eq!(refs, vec![ImageReference::new("https://example.com/a.png", "cat")]);
    }

    #[test]
    fn test_extract_empty_alt() {
        let refs = ReferenceExtractor::extract("![](https://bad.example/x)");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].alt(), None);
        assert_eq!(refs[0].url(), "https://bad.example/x");
    }

    #[test]
    fn test_preserves_order() {
        let content = "![b](https://b.com/2.jpg) text ![a](http://a.com/1.png)";
        assert_eq!(urls(content), vec!["https://b.com/2.jpg", "http://a.com/1.png"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let content = "![x](https://a.com/1.png) and again ![x](https://a.com/1.png)";
        assert_eq!(urls(content), vec!["https://a.com/1.png", "https://a.com/1.png"]);
    }

    #[test]
    fn test_query_string_kept() {
        let content = "![](https://host/api/file/read/abc.svg?token=test)";
        assert_eq!(urls(content), vec!["https://host/api/file/read/abc.svg?token=test"]);
    }

    #[test_case("Just some text with no images." ; "plain_text")]
    #[test_case("" ; "empty")]
    #[test_case("[link](https://example.com/a.png)" ; "link_not_image")]
    #[test_case("![rel](images/a.png)" ; "relative_url")]
    #[test_case("![ftp](ftp://example.com/a.png)" ; "unsupported_scheme")]
    #[test_case("https://example.com/pic.jpg" ; "bare_url")]
    #[test_case("![spaced]( https://example.com/a.png)" ; "leading_space")]
    #[test_case("![broken](https://example.com/a b.png)" ; "whitespace_in_url")]
    fn test_no_matches(content: &str) {
        assert!(ReferenceExtractor::extract(content).is_empty());
        assert!(!ReferenceExtractor::contains_images(content));
    }

    #[test]
    fn test_malformed_url_passes_through() {
        assert_eq!(urls("![](https://)"), Vec::<String>::new());
        assert_eq!(urls("![](https://not a url)"), Vec::<String>::new());
        assert_eq!(urls("![](http://%%%)"), vec!["http://%%%"]);
    }

    #[test]
    fn test_multiline_content() {
        let content = "### Title\n![](https://example.com/a.svg?token=test)\nmore\n![two](https://example.com/b.png)";
        assert_eq!(
            urls(content),
            vec!["https://example.com/a.svg?token=test", "https://example.com/b.png"]
        );
    }
}
