//! Defines the [`TextNode`] type, a typed fragment of inline text produced
//! by [`crate::inline`], and its conversion into a single [`HtmlNode`]
//! leaf.

use crate::html::HtmlNode;

/// The style of one inline fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// One typed, contiguous piece of inline text. For [`TextKind::Link`] and
/// [`TextKind::Image`] fragments, `text` holds the display/alt text and
/// `url` the destination; for every other kind `url` is `None`. Equality
/// is structural across all three fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextNode {
    pub text: String,
    pub kind: TextKind,
    pub url: Option<String>,
}

impl TextNode {
    /// Constructs a fragment without a URL.
    pub fn new(text: impl Into<String>, kind: TextKind) -> TextNode {
        TextNode {
            text: text.into(),
            kind,
            url: None,
        }
    }

    /// Constructs a [`TextKind::Link`] fragment from its display text and
    /// destination.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> TextNode {
        TextNode {
            text: text.into(),
            kind: TextKind::Link,
            url: Some(url.into()),
        }
    }

    /// Constructs a [`TextKind::Image`] fragment from its alt text and
    /// source.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> TextNode {
        TextNode {
            text: alt.into(),
            kind: TextKind::Image,
            url: Some(url.into()),
        }
    }

    /// Maps this fragment onto exactly one [`HtmlNode`] leaf: plain text
    /// becomes a tagless leaf, styled text a `b`/`i`/`code` leaf, links an
    /// `a` leaf with an `href` attribute, and images an empty `img` leaf
    /// with `src` and `alt` attributes.
    pub fn to_html(&self) -> HtmlNode {
        match self.kind {
            TextKind::Plain => HtmlNode::raw(&self.text),
            TextKind::Bold => HtmlNode::leaf("b", &self.text),
            TextKind::Italic => HtmlNode::leaf("i", &self.text),
            TextKind::Code => HtmlNode::leaf("code", &self.text),
            TextKind::Link => HtmlNode::leaf_with_attrs(
                "a",
                &self.text,
                vec![("href".to_owned(), self.url_or_empty())],
            ),
            TextKind::Image => HtmlNode::leaf_with_attrs(
                "img",
                "",
                vec![
                    ("src".to_owned(), self.url_or_empty()),
                    ("alt".to_owned(), self.text.clone()),
                ],
            ),
        }
    }

    fn url_or_empty(&self) -> String {
        self.url.clone().unwrap_or_default()
    }
}
