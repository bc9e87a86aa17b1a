//! Image reference value object.

use std::fmt;

/// One Markdown inline image (`![alt](url)`) found in a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference {
    url: String,
    alt: Option<String>,
}

impl ImageReference {
    /// Creates a reference. An empty alt text is stored as `None`.
    #[must_use]
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        let alt = alt.into();
        Self {
            url: url.into(),
            alt: (!alt.is_empty()).then_some(alt),
        }
    }

    /// Returns the source URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the alt text, if any was written.
    #[must_use]
    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    /// Returns the file extension implied by the URL path, including the dot.
    ///
    /// Falls back to `.jpg` when the last path segment has no extension or the
    /// URL cannot be parsed. Query string, fragment and `;` path parameters
    /// are ignored.
    #[must_use]
    pub fn file_extension(&self) -> String {
        const DEFAULT_EXTENSION: &str = ".jpg";

        let Ok(parsed) = url::Url::parse(&self.url) else {
            return DEFAULT_EXTENSION.to_string();
        };

        let last_segment = parsed.path().rsplit('/').next().unwrap_or_default();
        let last_segment = last_segment.split(';').next().unwrap_or_default();
        match last_segment.rfind('.') {
            Some(idx) if idx > 0 && idx + 1 < last_segment.len() => {
                last_segment[idx..].to_string()
            }
            _ => DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_empty_alt_is_none() {
        let reference = ImageReference::new("https://example.com/a.png", "");
        assert_eq!(reference.alt(), None);
        assert_eq!(reference.url(), "https://example.com/a.png");
    }

    #[test]
    fn test_alt_preserved() {
        let reference = ImageReference::new("https://example.com/a.png", "cat");
        assert_eq!(reference.alt(), Some("cat"));
    }

    #[test_case("https://example.com/a.png", ".png" ; "simple_png")]
    #[test_case("https://example.com/dir/photo.JPEG", ".JPEG" ; "keeps_case")]
    #[test_case("https://example.com/a.svg?token=test", ".svg" ; "ignores_query")]
    #[test_case("https://example.com/a.png;v=1", ".png" ; "ignores_path_params")]
    #[test_case("https://example.com/image;type=png", ".jpg" ; "params_without_extension")]
    #[test_case("https://example.com/image", ".jpg" ; "no_extension")]
    #[test_case("https://example.com/", ".jpg" ; "empty_path")]
    #[test_case("https://example.com/v1.2/image", ".jpg" ; "dot_in_directory_only")]
    #[test_case("https://example.com/.hidden", ".jpg" ; "leading_dot")]
    #[test_case("https://exa mple.com/a.png", ".jpg" ; "unparseable")]
    fn test_file_extension(url: &str, expected: &str) {
        assert_eq!(ImageReference::new(url, "").file_extension(), expected);
    }
}
