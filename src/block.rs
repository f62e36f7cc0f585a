//! Structures a whole Markdown document into block-level HTML. A document
//! splits into blocks on blank-line boundaries; each block is classified
//! by its shape ([`BlockType`]) and converted into one [`HtmlNode`]
//! subtree, with inline text handed off to [`crate::inline`]. The
//! subtrees become the children of a single root `div` node.

use crate::html::HtmlNode;
use crate::inline;
use crate::text::TextNode;

/// The result of a fallible block-conversion operation. Conversion itself
/// cannot fail; only the inline parsing of a block's text can.
pub type Result<T> = std::result::Result<T, inline::Error>;

/// The structural classification of one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// Splits a document into trimmed, non-empty blocks on blank-line
/// boundaries. Runs of more than one blank line collapse into a single
/// boundary because the empty candidates between them are discarded.
pub fn split_blocks(document: &str) -> Vec<&str> {
    document
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classifies a block by its raw shape. The first matching rule wins:
/// heading, fenced code, quote, unordered list, ordered list, and finally
/// paragraph as the fallback.
pub fn classify(block: &str) -> BlockType {
    // Seven or more leading `#` characters disqualify a heading.
    if block.starts_with('#') && !block.starts_with("#######") {
        return BlockType::Heading;
    }
    if block.starts_with("```") && block.ends_with("```") {
        return BlockType::Code;
    }

    let lines: Vec<&str> = block.lines().collect();
    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }
    if lines.iter().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }
    if is_ordered_list(&lines) {
        return BlockType::OrderedList;
    }
    BlockType::Paragraph
}

/// An ordered list numbers its lines `1. `, `2. `, ... from 1 with no
/// gaps; any deviation disqualifies the whole block.
fn is_ordered_list(lines: &[&str]) -> bool {
    lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
}

/// Converts a whole document into a tree of HTML nodes rooted at a `div`,
/// one child subtree per block in document order.
pub fn document_to_html(document: &str) -> Result<HtmlNode> {
    let mut children = Vec::new();
    for block in split_blocks(document) {
        children.push(convert_block(block)?);
    }
    Ok(HtmlNode::parent("div", children))
}

fn convert_block(block: &str) -> Result<HtmlNode> {
    match classify(block) {
        BlockType::Paragraph => {
            Ok(HtmlNode::parent("p", inline_children(block)?))
        }
        BlockType::Heading => {
            let level = block.chars().take_while(|&c| c == '#').count();
            let text = block[level..].trim();
            Ok(HtmlNode::parent(
                format!("h{}", level),
                inline_children(text)?,
            ))
        }
        BlockType::UnorderedList => {
            Ok(HtmlNode::parent("ul", list_items(block)?))
        }
        BlockType::OrderedList => {
            Ok(HtmlNode::parent("ol", list_items(block)?))
        }
        BlockType::Quote => {
            let text = block
                .lines()
                .map(strip_marker)
                .collect::<Vec<&str>>()
                .join("\n");
            Ok(HtmlNode::parent("blockquote", inline_children(&text)?))
        }
        BlockType::Code => {
            // The fence is stripped literally from both ends; the body is
            // wrapped verbatim with no inline parsing.
            let mut text = block;
            while let Some(stripped) = text.strip_prefix("```") {
                text = stripped;
            }
            while let Some(stripped) = text.strip_suffix("```") {
                text = stripped;
            }
            Ok(HtmlNode::parent(
                "pre",
                vec![HtmlNode::leaf("code", text)],
            ))
        }
    }
}

/// Runs the inline parser over `text` and converts the fragments into
/// HTML leaves.
fn inline_children(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(inline::parse(text)?.iter().map(TextNode::to_html).collect())
}

/// Converts each line of a list block into an `li` node, dropping the
/// line's `- ` or `N. ` marker.
fn list_items(block: &str) -> Result<Vec<HtmlNode>> {
    block
        .lines()
        .map(|line| {
            Ok(HtmlNode::parent(
                "li",
                inline_children(strip_marker(line))?,
            ))
        })
        .collect()
}

/// Drops a line's block marker: everything up to and including the first
/// space, trimmed. A quote line may have no space at all, in which case
/// only its `>` marker run is dropped.
fn strip_marker(line: &str) -> &str {
    match line.find(' ') {
        Some(i) => line[i + 1..].trim(),
        None => line.trim_start_matches('>').trim(),
    }
}
