//! Link and image fragments, plus the save-time href normalization pass.

use std::borrow::Cow;
use std::sync::LazyLock;

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
use regex::{Captures, Regex};
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
use regex_lite::{Captures, Regex};

use crate::error::PreconditionError;

pub const DEFAULT_IMAGE_ALT: &str = "Image";

const LINK_STYLE: &str = "color: #ff6b35; text-decoration: underline;";
const IMAGE_STYLE: &str = "max-width: 100%; height: auto; border-radius: 8px; margin: 16px 0;";

/// Matches a double-quoted href attribute. Captures: 1=target
static HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"href="([^"]+)""#).unwrap());

/// Prefix `https://` unless the URL already names an http(s) scheme.
pub fn normalize_url(url: &str) -> Cow<'_, str> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("https://{url}"))
    }
}

/// Anchor that opens in a new browsing context.
///
/// An empty `text` falls back to `url` exactly as given, before
/// normalization.
pub fn link_fragment(url: &str, text: &str) -> Result<String, PreconditionError> {
    if url.is_empty() {
        return Err(PreconditionError::EmptyUrl);
    }
    let href = normalize_url(url);
    let label = if text.is_empty() { url } else { text };
    Ok(format!(
        r#"<a href="{href}" target="_blank" rel="noopener noreferrer" style="{LINK_STYLE}">{label}</a>"#
    ))
}

/// Inline-styled `<img>`. The source is used verbatim.
pub fn image_fragment(src: &str, alt: &str) -> Result<String, PreconditionError> {
    if src.is_empty() {
        return Err(PreconditionError::EmptyUrl);
    }
    let alt = if alt.is_empty() { DEFAULT_IMAGE_ALT } else { alt };
    Ok(format!(r#"<img src="{src}" alt="{alt}" style="{IMAGE_STYLE}" />"#))
}

/// Whether an href is left alone by [`normalize_links`].
fn is_rooted_href(href: &str) -> bool {
    href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with('/')
        || href.starts_with('#')
}

/// Prefix `https://` onto every `href="..."` that is not absolute, root
/// relative, or a fragment.
///
/// This is a textual pass: it also rewrites matches inside comments or code
/// samples. Running it twice gives the same result as running it once.
pub fn normalize_links(html: &str) -> String {
    HREF_REGEX
        .replace_all(html, |caps: &Captures| {
            let href = &caps[1];
            if is_rooted_href(href) {
                caps[0].to_string()
            } else {
                format!(r#"href="https://{href}""#)
            }
        })
        .into_owned()
}

/// Transient link form fields, cleared after a successful insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkForm {
    pub url: String,
    pub text: String,
}

impl LinkForm {
    pub fn clear(&mut self) {
        self.url.clear();
        self.text.clear();
    }

    /// The insert button is disabled while the url is empty.
    pub fn can_submit(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Transient image-by-url form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageForm {
    pub url: String,
    pub alt: String,
}

impl ImageForm {
    pub fn clear(&mut self) {
        self.url.clear();
        self.alt.clear();
    }

    pub fn can_submit(&self) -> bool {
        !self.url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn test_link_fragment_falls_back_to_typed_url() {
        let html = link_fragment("example.com", "").unwrap();
        insta::assert_snapshot!(html, @r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer" style="color: #ff6b35; text-decoration: underline;">example.com</a>"#);
    }

    #[test]
    fn test_link_fragment_with_text() {
        let html = link_fragment("http://wiki.local/rules", "Rules").unwrap();
        assert!(html.starts_with(r#"<a href="http://wiki.local/rules" "#));
        assert!(html.ends_with(">Rules</a>"));
    }

    #[test]
    fn test_empty_url_rejected() {
        assert_eq!(link_fragment("", "x"), Err(PreconditionError::EmptyUrl));
        assert_eq!(image_fragment("", "x"), Err(PreconditionError::EmptyUrl));
    }

    #[test]
    fn test_image_fragment_default_alt() {
        let html = image_fragment("https://cdn.example/a.png", "").unwrap();
        insta::assert_snapshot!(html, @r#"<img src="https://cdn.example/a.png" alt="Image" style="max-width: 100%; height: auto; border-radius: 8px; margin: 16px 0;" />"#);
        let html = image_fragment("/a.png", "Map").unwrap();
        assert!(html.contains(r#"alt="Map""#));
    }

    #[test]
    fn test_normalize_links_prefixes_bare_hosts() {
        let html = r#"<a href="mysite.com">x</a> <a href="https://other.com">y</a>"#;
        assert_eq!(
            normalize_links(html),
            r#"<a href="https://mysite.com">x</a> <a href="https://other.com">y</a>"#
        );
    }

    #[test]
    fn test_normalize_links_preserves_rooted_hrefs() {
        let html = concat!(
            r#"<a href="http://a.com">1</a>"#,
            r#"<a href="https://b.com">2</a>"#,
            r#"<a href="/wiki/rules">3</a>"#,
            r##"<a href="#top">4</a>"##,
        );
        assert_eq!(normalize_links(html), html);
    }

    #[test]
    fn test_normalize_links_is_idempotent() {
        let inputs = [
            r#"<a href="example.com">a</a>"#,
            r#"<a href="www.x.org/p?q=1">b</a><a href="/local">c</a>"#,
            r#"<p>no links</p>"#,
            r#"<a href="">empty</a><a href="mailto:ops@example.com">m</a>"#,
        ];
        for input in inputs {
            let once = normalize_links(input);
            assert_eq!(normalize_links(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_normalize_links_is_textual() {
        // Empty hrefs do not match `[^"]+`; single-quoted ones are ignored.
        let html = r#"<a href="">e</a><a href='bare.com'>s</a><code>href="bare.com"</code>"#;
        assert_eq!(
            normalize_links(html),
            r#"<a href="">e</a><a href='bare.com'>s</a><code>href="https://bare.com"</code>"#
        );
    }

    #[test]
    fn test_forms_clear() {
        let mut link = LinkForm {
            url: "example.com".into(),
            text: "Example".into(),
        };
        assert!(link.can_submit());
        link.clear();
        assert_eq!(link, LinkForm::default());
        assert!(!link.can_submit());

        let mut image = ImageForm {
            url: "a.png".into(),
            alt: "A".into(),
        };
        image.clear();
        assert_eq!(image, ImageForm::default());
    }
}
