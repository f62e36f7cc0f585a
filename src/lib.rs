//! The library code for the `mearc` static site generator. The
//! architecture can be generally broken down into two distinct steps:
//!
//! 1. Converting Markdown documents into HTML ([`crate::block`],
//!    [`crate::inline`], [`crate::text`], [`crate::html`])
//! 2. Assembling the output site on disk ([`crate::page`],
//!    [`crate::write`], [`crate::build`])
//!
//! The first step is the heart of the crate. A document is split into
//! blocks on blank-line boundaries and each block is classified by its
//! shape (paragraph, heading, list, quote, code fence). Each block's text
//! runs through the inline parser, which extracts images, links, and
//! delimiter-bounded styling spans into typed fragments; the fragments
//! become leaves of a generic HTML node tree, assembled under one root
//! node per document. Rendering that tree yields the page body.
//!
//! The second step is thin I/O glue: the page body and a title extracted
//! from the document's first top-level heading are substituted into a
//! single site template, root-relative links are rewritten for the
//! configured base path, and the result is written at the source file's
//! relative path within the output directory. Static assets are mirrored
//! alongside.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod block;
pub mod build;
pub mod config;
pub mod html;
pub mod inline;
pub mod page;
pub mod text;
pub mod write;
