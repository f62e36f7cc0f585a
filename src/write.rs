//! Writes the output site to disk: walks the content tree rendering every
//! Markdown source into an HTML page at the mirrored relative path, and
//! recursively copies the static-asset tree verbatim. The Markdown core
//! performs no I/O; everything filesystem-shaped lives here.

use crate::page;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = "md";
const HTML_EXTENSION: &str = "html";

/// Responsible for templating and writing HTML pages to disk from
/// Markdown sources.
pub struct Writer<'a> {
    /// The page template containing the `{{ Title }}` and `{{ Content }}`
    /// placeholders.
    pub template: &'a str,

    /// The prefix substituted for root-relative link targets. See
    /// [`page::rewrite_root_links`].
    pub base_path: &'a str,
}

impl Writer<'_> {
    /// Walks `content_directory` and converts every `*.md` file into a
    /// `*.html` file at the corresponding relative path under
    /// `output_directory`, preserving directory structure. Non-Markdown
    /// files are ignored. A document that fails to convert aborts the
    /// walk with an error naming its source file.
    pub fn write_pages(
        &self,
        content_directory: &Path,
        output_directory: &Path,
    ) -> Result<()> {
        for result in WalkDir::new(content_directory) {
            let entry = result?;
            if !entry.file_type().is_file() {
                continue;
            }
            let source = entry.path();
            if source.extension().and_then(|e| e.to_str())
                != Some(MARKDOWN_EXTENSION)
            {
                continue;
            }
            let relative = source
                .strip_prefix(content_directory)
                .unwrap_or(source);
            let target = output_directory
                .join(relative)
                .with_extension(HTML_EXTENSION);
            self.write_page(source, &target).map_err(|e| {
                Error::Annotated(
                    format!("generating page `{}`", source.display()),
                    Box::new(e),
                )
            })?;
        }
        Ok(())
    }

    /// Renders a single source document and writes it to `target`,
    /// creating intermediate directories as needed.
    fn write_page(&self, source: &Path, target: &Path) -> Result<()> {
        let document = fs::read_to_string(source)?;
        let rendered =
            page::render_page(&document, self.template, self.base_path)?;
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(target, rendered)?;
        tracing::info!(
            source = %source.display(),
            target = %target.display(),
            "generated page"
        );
        Ok(())
    }
}

/// Recursively mirrors the directory tree at `src` into `dst`, creating
/// `dst` and any intermediate directories.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for result in fs::read_dir(src)? {
        let entry = result?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            tracing::info!(target = %target.display(), "copied asset");
        }
    }
    Ok(())
}

/// The result of a fallible site-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error writing the output site.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors rendering a page from a source document.
    Page(page::Error),

    /// Returned for errors traversing the content directory.
    Walk(walkdir::Error),

    /// Returned for other I/O errors.
    Io(io::Error),

    /// Wraps another error with the context it occurred in.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Page(err) => err.fmt(f),
            Error::Walk(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::Annotated(context, err) => {
                write!(f, "{}: {}", context, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Page(err) => Some(err),
            Error::Walk(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<page::Error> for Error {
    /// Converts [`page::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: page::Error) -> Error {
        Error::Page(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::Walk(err)
    }
}

impl From<io::Error> for Error {
    /// Converts [`io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
