//! Defines the [`HtmlNode`] tree that the block and inline converters build
//! bottom-up, and the logic for rendering that tree to markup text. A node
//! is either a [`HtmlNode::Leaf`] holding direct text content or a
//! [`HtmlNode::Parent`] holding only children; rendering walks the tree and
//! concatenates the markup for each node with no whitespace between
//! siblings.

use std::fmt;

/// An ordered list of HTML attributes. Attributes render in insertion
/// order, and values are emitted verbatim between double quotes--no
/// escaping is performed, so values are trusted.
pub type Attrs = Vec<(String, String)>;

/// A single node in the HTML output tree. Leaves carry text, parents carry
/// children; no node carries both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlNode {
    /// A node with direct text content and no children. A leaf without a
    /// tag renders as its raw value with no wrapping element.
    Leaf {
        tag: Option<String>,
        value: String,
        attrs: Attrs,
    },

    /// A node with children and no direct text content.
    Parent {
        tag: String,
        children: Vec<HtmlNode>,
        attrs: Attrs,
    },
}

impl HtmlNode {
    /// Constructs a tagless leaf which renders as its raw text.
    pub fn raw(value: impl Into<String>) -> HtmlNode {
        HtmlNode::Leaf {
            tag: None,
            value: value.into(),
            attrs: Attrs::new(),
        }
    }

    /// Constructs a tagged leaf with no attributes.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> HtmlNode {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attrs: Attrs::new(),
        }
    }

    /// Constructs a tagged leaf carrying attributes.
    pub fn leaf_with_attrs(
        tag: impl Into<String>,
        value: impl Into<String>,
        attrs: Attrs,
    ) -> HtmlNode {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attrs,
        }
    }

    /// Constructs a parent node with no attributes.
    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> HtmlNode {
        HtmlNode::Parent {
            tag: tag.into(),
            children,
            attrs: Attrs::new(),
        }
    }

    /// Renders the subtree rooted at this node to markup text. Rendering a
    /// [`HtmlNode::Parent`] fails if its tag is empty or it has no
    /// children; children render in order with nothing inserted between
    /// them.
    pub fn render(&self) -> Result<String> {
        match self {
            HtmlNode::Leaf {
                tag: None, value, ..
            } => Ok(value.clone()),
            HtmlNode::Leaf {
                tag: Some(tag),
                value,
                attrs,
            } => Ok(format!(
                "<{}{}>{}</{}>",
                tag,
                render_attributes(attrs),
                value,
                tag
            )),
            HtmlNode::Parent {
                tag,
                children,
                attrs,
            } => {
                if tag.is_empty() {
                    return Err(Error::MissingTag);
                }
                if children.is_empty() {
                    return Err(Error::NoChildren {
                        tag: tag.to_owned(),
                    });
                }
                let mut out = format!("<{}{}>", tag, render_attributes(attrs));
                for child in children {
                    out.push_str(&child.render()?);
                }
                out.push_str(&format!("</{}>", tag));
                Ok(out)
            }
        }
    }
}

/// Renders an attribute list as ` name="value"` pairs in insertion order,
/// or the empty string for an empty list.
pub fn render_attributes(attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (name, value) in attrs {
        out.push_str(&format!(r#" {}="{}""#, name, value));
    }
    out
}

/// The result of a fallible rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a violation of the node-shape invariants detected at render
/// time.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Returned when a parent node has an empty tag.
    MissingTag,

    /// Returned when a parent node has no children.
    NoChildren { tag: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingTag => write!(f, "parent node has no tag"),
            Error::NoChildren { tag } => {
                write!(f, "parent node <{}> has no children", tag)
            }
        }
    }
}

impl std::error::Error for Error {}
