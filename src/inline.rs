//! Splits one span of raw inline text into an ordered sequence of
//! [`TextNode`] fragments. The passes run in a fixed order--images, links,
//! then `` ` ``, `**`, and `_` delimiters--and every pass only operates on
//! fragments that are still [`TextKind::Plain`]. The order is significant:
//! link extraction relies on image extraction having already consumed
//! every `![...](...)` form, and delimiter splitting relies on link and
//! image labels no longer being plain text. A consequence is that styling
//! does not nest; the inner markers of a bold span inside an italic span
//! are literal characters.

use crate::text::{TextKind, TextNode};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^()]*)\)").unwrap());

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^()]*)\)").unwrap());

/// Converts one span of raw inline text into typed fragments.
pub fn parse(text: &str) -> Result<Vec<TextNode>> {
    let nodes = vec![TextNode::new(text, TextKind::Plain)];
    let nodes = split_images(nodes);
    let nodes = split_links(nodes);
    let nodes = split_delimiter(nodes, "`", TextKind::Code)?;
    let nodes = split_delimiter(nodes, "**", TextKind::Bold)?;
    split_delimiter(nodes, "_", TextKind::Italic)
}

/// Extracts every `![alt](url)` occurrence from `text` as `(alt, url)`
/// pairs, left to right. The alt text may not contain square brackets and
/// the URL may not contain parentheses.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    IMAGE_PATTERN
        .captures_iter(text)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .collect()
}

/// Extracts every `[text](url)` occurrence from `text` as `(text, url)`
/// pairs, left to right, skipping occurrences immediately preceded by `!`
/// (those are images, not links).
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    // The regex crate has no lookbehind, so the not-preceded-by-`!` rule
    // is checked against the match position instead.
    LINK_PATTERN
        .captures_iter(text)
        .filter(|caps| match caps.get(0) {
            Some(whole) => !text[..whole.start()].ends_with('!'),
            None => false,
        })
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .collect()
}

/// Replaces every image occurrence inside plain fragments with a
/// [`TextKind::Image`] fragment, splitting the surrounding text into plain
/// fragments. Non-plain fragments pass through unchanged.
pub fn split_images(nodes: Vec<TextNode>) -> Vec<TextNode> {
    split_spans(nodes, extract_images, |alt, url| {
        (format!("![{}]({})", alt, url), TextNode::image(alt, url))
    })
}

/// Replaces every link occurrence inside plain fragments with a
/// [`TextKind::Link`] fragment. Must run after [`split_images`] so that
/// `!` markers have already been consumed.
pub fn split_links(nodes: Vec<TextNode>) -> Vec<TextNode> {
    split_spans(nodes, extract_links, |text, url| {
        (format!("[{}]({})", text, url), TextNode::link(text, url))
    })
}

/// The shared splitting loop behind [`split_images`] and [`split_links`]:
/// for each plain fragment, walk its extracted spans left to right,
/// emitting a plain fragment for any non-empty text before the span, the
/// span's own fragment, and finally a plain fragment for any non-empty
/// trailing text.
fn split_spans<F>(
    nodes: Vec<TextNode>,
    extract: fn(&str) -> Vec<(String, String)>,
    span: F,
) -> Vec<TextNode>
where
    F: Fn(&str, &str) -> (String, TextNode),
{
    let mut result = Vec::new();
    for node in nodes {
        if node.kind != TextKind::Plain {
            result.push(node);
            continue;
        }

        let spans = extract(&node.text);
        if spans.is_empty() {
            result.push(node);
            continue;
        }

        let mut remaining = node.text.as_str();
        for (label, url) in &spans {
            let (source, span_node) = span(label, url);
            let mut split = remaining.splitn(2, source.as_str());
            let before = split.next().unwrap_or("");
            if !before.is_empty() {
                result.push(TextNode::new(before, TextKind::Plain));
            }
            result.push(span_node);
            remaining = split.next().unwrap_or("");
        }
        if !remaining.is_empty() {
            result.push(TextNode::new(remaining, TextKind::Plain));
        }
    }
    result
}

/// Splits the plain fragments of `nodes` on `delimiter`, wrapping every
/// other field as `kind`. The delimiter must occur an even number of times
/// within each fragment; an odd count is an [`Error::UnmatchedDelimiter`].
/// Empty fields are dropped, and non-plain fragments pass through
/// unchanged.
pub fn split_delimiter(
    nodes: Vec<TextNode>,
    delimiter: &str,
    kind: TextKind,
) -> Result<Vec<TextNode>> {
    let mut result = Vec::new();
    for node in nodes {
        if node.kind != TextKind::Plain {
            result.push(node);
            continue;
        }

        let fields: Vec<&str> = node.text.split(delimiter).collect();
        // An even delimiter count splits the text into an odd number of
        // fields; anything else means a delimiter was left unclosed.
        if fields.len() % 2 == 0 {
            return Err(Error::UnmatchedDelimiter {
                delimiter: delimiter.to_owned(),
                text: node.text.clone(),
            });
        }

        for (i, field) in fields.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            let field_kind = if i % 2 == 1 { kind } else { TextKind::Plain };
            result.push(TextNode::new(*field, field_kind));
        }
    }
    Ok(result)
}

/// The result of a fallible inline-parsing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error splitting inline text into fragments.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Returned when a styling delimiter occurs an odd number of times in
    /// one fragment.
    UnmatchedDelimiter { delimiter: String, text: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnmatchedDelimiter { delimiter, text } => write!(
                f,
                "no matching closing delimiter '{}' in text '{}'",
                delimiter, text
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;

    fn plain(text: &str) -> TextNode {
        TextNode::new(text, TextKind::Plain)
    }

    #[test]
    fn test_split_delimiter_unmatched() {
        let nodes = vec![plain("**bold text** normal **unclosed")];
        assert_eq!(
            split_delimiter(nodes, "**", TextKind::Bold),
            Err(Error::UnmatchedDelimiter {
                delimiter: "**".to_owned(),
                text: "**bold text** normal **unclosed".to_owned(),
            }),
        );
    }

    #[test]
    fn test_split_delimiter_none() -> Result<()> {
        let nodes = vec![plain("no styling here.")];
        assert_eq!(
            split_delimiter(nodes, "**", TextKind::Bold)?,
            vec![plain("no styling here.")],
        );
        Ok(())
    }

    #[test]
    fn test_split_delimiter_code() -> Result<()> {
        let nodes = vec![plain("text with a `code block` word")];
        assert_eq!(
            split_delimiter(nodes, "`", TextKind::Code)?,
            vec![
                plain("text with a "),
                TextNode::new("code block", TextKind::Code),
                plain(" word"),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_split_delimiter_at_start() -> Result<()> {
        let nodes = vec![plain("**bold text** normal text")];
        assert_eq!(
            split_delimiter(nodes, "**", TextKind::Bold)?,
            vec![
                TextNode::new("bold text", TextKind::Bold),
                plain(" normal text"),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_split_delimiter_at_end() -> Result<()> {
        let nodes = vec![plain("normal text **bold text**")];
        assert_eq!(
            split_delimiter(nodes, "**", TextKind::Bold)?,
            vec![
                plain("normal text "),
                TextNode::new("bold text", TextKind::Bold),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_split_delimiter_leaves_other_markers() -> Result<()> {
        // A single pass only handles its own delimiter.
        let nodes = vec![plain("some **bold text** _italic text_")];
        assert_eq!(
            split_delimiter(nodes, "**", TextKind::Bold)?,
            vec![
                plain("some "),
                TextNode::new("bold text", TextKind::Bold),
                plain(" _italic text_"),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_split_delimiter_two_passes() -> Result<()> {
        let nodes = vec![plain("a **bold** then _italic_ end")];
        let nodes = split_delimiter(nodes, "**", TextKind::Bold)?;
        let nodes = split_delimiter(nodes, "_", TextKind::Italic)?;
        assert_eq!(
            nodes,
            vec![
                plain("a "),
                TextNode::new("bold", TextKind::Bold),
                plain(" then "),
                TextNode::new("italic", TextKind::Italic),
                plain(" end"),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_extract_images_none() {
        assert!(extract_images("just normal text").is_empty());
    }

    #[test]
    fn test_extract_images() {
        assert_eq!(
            extract_images("an ![owl](images/owl.png) and an ![ash tree](images/ash.png)"),
            vec![
                ("owl".to_owned(), "images/owl.png".to_owned()),
                ("ash tree".to_owned(), "images/ash.png".to_owned()),
            ],
        );
    }

    #[test]
    fn test_extract_images_ignores_links() {
        assert!(extract_images("a [link](https://example.org)").is_empty());
    }

    #[test]
    fn test_extract_links_none() {
        assert!(extract_links("just normal text").is_empty());
    }

    #[test]
    fn test_extract_links() {
        assert_eq!(
            extract_links("a [first](https://example.org) and a [second](https://example.net)"),
            vec![
                ("first".to_owned(), "https://example.org".to_owned()),
                ("second".to_owned(), "https://example.net".to_owned()),
            ],
        );
    }

    #[test]
    fn test_extract_links_preserves_whitespace() {
        assert_eq!(
            extract_links("a [  padded  ](  https://example.org  )"),
            vec![("  padded  ".to_owned(), "  https://example.org  ".to_owned())],
        );
    }

    #[test]
    fn test_extract_links_ignores_images() {
        assert!(extract_links("an ![owl](images/owl.png)").is_empty());
    }

    #[test]
    fn test_split_images_no_image() {
        let nodes = vec![plain("just some normal text")];
        assert_eq!(split_images(nodes), vec![plain("just some normal text")]);
    }

    #[test]
    fn test_split_images_at_start() {
        let nodes = vec![plain("![owl](images/owl.png) and some text")];
        assert_eq!(
            split_images(nodes),
            vec![
                TextNode::image("owl", "images/owl.png"),
                plain(" and some text"),
            ],
        );
    }

    #[test]
    fn test_split_images_in_middle() {
        let nodes = vec![plain("look: ![owl](images/owl.png) and some text")];
        assert_eq!(
            split_images(nodes),
            vec![
                plain("look: "),
                TextNode::image("owl", "images/owl.png"),
                plain(" and some text"),
            ],
        );
    }

    #[test]
    fn test_split_images_at_end() {
        let nodes = vec![plain("look: ![owl](images/owl.png)")];
        assert_eq!(
            split_images(nodes),
            vec![plain("look: "), TextNode::image("owl", "images/owl.png")],
        );
    }

    #[test]
    fn test_split_images_two() {
        let nodes =
            vec![plain("an ![owl](images/owl.png) and an ![ash tree](images/ash.png)")];
        assert_eq!(
            split_images(nodes),
            vec![
                plain("an "),
                TextNode::image("owl", "images/owl.png"),
                plain(" and an "),
                TextNode::image("ash tree", "images/ash.png"),
            ],
        );
    }

    #[test]
    fn test_split_links_two() {
        let nodes = vec![plain(
            "a [first](https://example.org) and a [second](https://example.net)",
        )];
        assert_eq!(
            split_links(nodes),
            vec![
                plain("a "),
                TextNode::link("first", "https://example.org"),
                plain(" and a "),
                TextNode::link("second", "https://example.net"),
            ],
        );
    }

    #[test]
    fn test_split_links_passes_non_plain_through() {
        let nodes = vec![TextNode::image("owl", "images/owl.png")];
        assert_eq!(
            split_links(nodes),
            vec![TextNode::image("owl", "images/owl.png")],
        );
    }

    #[test]
    fn test_image_never_parses_as_link() -> Result<()> {
        // Image extraction runs first; the leading `!` must never leak a
        // `[` into a link match.
        assert_eq!(
            parse("![owl](images/owl.png)")?,
            vec![TextNode::image("owl", "images/owl.png")],
        );
        Ok(())
    }

    #[test]
    fn test_parse_full_pipeline() -> Result<()> {
        let text = "This is **text** with an _italic_ word and a `code block` \
                    and an ![owl](images/owl.png) and a [link](https://example.org)";
        assert_eq!(
            parse(text)?,
            vec![
                plain("This is "),
                TextNode::new("text", TextKind::Bold),
                plain(" with an "),
                TextNode::new("italic", TextKind::Italic),
                plain(" word and a "),
                TextNode::new("code block", TextKind::Code),
                plain(" and an "),
                TextNode::image("owl", "images/owl.png"),
                plain(" and a "),
                TextNode::link("link", "https://example.org"),
            ],
        );
        Ok(())
    }

    #[test]
    fn test_parse_no_nested_styling() -> Result<()> {
        // Once the bold span is split out, the inner `_` markers belong to
        // a non-plain fragment and stay literal.
        assert_eq!(
            parse("**bold with _inner_ markers**")?,
            vec![TextNode::new("bold with _inner_ markers", TextKind::Bold)],
        );
        Ok(())
    }

    #[test]
    fn test_parse_unmatched_delimiter_propagates() {
        assert!(parse("an `unclosed code span").is_err());
    }
}
