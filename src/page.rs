//! Turns one Markdown document into one finished HTML page: the document
//! is converted ([`crate::block`]) and rendered, its title is extracted
//! from the first top-level heading line, and both are substituted into
//! the page template. Root-relative link targets in the result are
//! rewritten for the site's base path so the site can deploy under a
//! non-root prefix.

use crate::block;
use crate::html;
use crate::inline;
use std::fmt;

/// The template placeholder replaced by the extracted page title.
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";

/// The template placeholder replaced by the rendered document body.
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Renders a full page from a Markdown `document`, an HTML `template`
/// containing the two placeholders, and the site `base_path`.
pub fn render_page(
    document: &str,
    template: &str,
    base_path: &str,
) -> Result<String> {
    let title = extract_title(document)?;
    let content = block::document_to_html(document)?.render()?;
    let page = template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content);
    Ok(rewrite_root_links(&page, base_path))
}

/// Extracts the page title: the first line beginning with `# `, marker
/// stripped and surrounding whitespace trimmed. A document without such a
/// line cannot become a page.
pub fn extract_title(document: &str) -> Result<String> {
    for line in document.lines() {
        if let Some(title) = line.strip_prefix("# ") {
            return Ok(title.trim().to_owned());
        }
    }
    Err(Error::MissingTitle)
}

/// Rewrites root-relative `href`/`src` targets to start with `base_path`
/// instead of `/`.
pub fn rewrite_root_links(page: &str, base_path: &str) -> String {
    page.replace("href=\"/", &format!("href=\"{}", base_path))
        .replace("src=\"/", &format!("src=\"{}", base_path))
}

/// The result of a fallible page-rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rendering a single page.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Returned when no line of the document supplies a title.
    MissingTitle,

    /// Returned for errors splitting inline text.
    Inline(inline::Error),

    /// Returned for errors rendering the HTML node tree.
    Render(html::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingTitle => write!(f, "no title line found"),
            Error::Inline(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingTitle => None,
            Error::Inline(err) => Some(err),
            Error::Render(err) => Some(err),
        }
    }
}

impl From<inline::Error> for Error {
    /// Converts [`inline::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: inline::Error) -> Error {
        Error::Inline(err)
    }
}

impl From<html::Error> for Error {
    /// Converts [`html::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: html::Error) -> Error {
        Error::Render(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_title() -> Result<()> {
        assert_eq!(extract_title("# Hello\n\nSome text")?, "Hello");
        Ok(())
    }

    #[test]
    fn test_extract_title_skips_earlier_lines() -> Result<()> {
        assert_eq!(
            extract_title("some preamble\n\n#  Padded Title  \n\nbody")?,
            "Padded Title",
        );
        Ok(())
    }

    #[test]
    fn test_extract_title_ignores_deeper_headings() {
        assert_eq!(
            extract_title("## Subsection\n\n### Deeper"),
            Err(Error::MissingTitle),
        );
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title("no heading here"), Err(Error::MissingTitle));
    }

    #[test]
    fn test_render_page_substitutes_placeholders() -> Result<()> {
        let template = "<html><head><title>{{ Title }}</title></head>\
                        <body>{{ Content }}</body></html>";
        let page = render_page("# Greetings\n\nHello **world**", template, "/")?;
        assert_eq!(
            page,
            "<html><head><title>Greetings</title></head>\
             <body><div><h1>Greetings</h1><p>Hello <b>world</b></p></div></body></html>",
        );
        Ok(())
    }

    #[test]
    fn test_render_page_requires_title() {
        let result = render_page("just a paragraph", "{{ Content }}", "/");
        assert_eq!(result, Err(Error::MissingTitle));
    }

    #[test]
    fn test_rewrite_root_links() {
        let page = "<a href=\"/blog/post.html\">post</a>\
                    <img src=\"/images/owl.png\" alt=\"owl\"></img>\
                    <a href=\"https://example.org/\">external</a>";
        assert_eq!(
            rewrite_root_links(page, "/mearc/"),
            "<a href=\"/mearc/blog/post.html\">post</a>\
             <img src=\"/mearc/images/owl.png\" alt=\"owl\"></img>\
             <a href=\"https://example.org/\">external</a>",
        );
    }

    #[test]
    fn test_rewrite_root_links_default_base_path() {
        let page = "<a href=\"/blog/post.html\">post</a>";
        assert_eq!(rewrite_root_links(page, "/"), page);
    }

    #[test]
    fn test_render_page_rewrites_for_base_path() -> Result<()> {
        let page = render_page(
            "# Home\n\n[a post](/blog/post.html)",
            "{{ Content }}",
            "/site/",
        )?;
        assert_eq!(
            page,
            "<div><h1>Home</h1><p><a href=\"/site/blog/post.html\">a post</a></p></div>",
        );
        Ok(())
    }
}
