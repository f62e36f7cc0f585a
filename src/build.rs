//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the output site: cleaning the old output
//! directory, mirroring the static assets into it, and walking the
//! content tree to generate one HTML page per Markdown document
//! ([`crate::write`]).

use crate::config::Config;
use crate::write::{self, Writer};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Builds the site from a [`Config`] object. The output directory is
/// removed first so pages and assets deleted from the sources don't
/// survive a rebuild.
pub fn build_site(config: &Config) -> Result<()> {
    let template = fs::read_to_string(&config.template).map_err(|err| {
        Error::ReadTemplate {
            path: config.template.clone(),
            err,
        }
    })?;

    rmdir(&config.output_directory)?;

    // copy static directory
    write::copy_dir(&config.static_directory, &config.output_directory)?;

    // write the pages
    let writer = Writer {
        template: &template,
        base_path: &config.base_path,
    };
    writer.write_pages(&config.content_directory, &config.output_directory)?;

    Ok(())
}

fn rmdir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::info!(path = %dir.display(), "cleaned output directory");
            Ok(())
        }
        Err(e) => match e.kind() {
            io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

/// The result of a fallible site-building operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during cleaning the
/// output directory, reading the template file, or writing the output
/// pages and assets.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors writing pages and copying assets.
    Write(write::Error),

    /// Returned for I/O problems while cleaning the output directory.
    Clean { path: PathBuf, err: io::Error },

    /// Returned for I/O problems while reading the template file.
    ReadTemplate { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Write(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "cleaning directory `{}`: {}", path.display(), err)
            }
            Error::ReadTemplate { path, err } => {
                write!(f, "reading template file `{}`: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::ReadTemplate { path: _, err } => Some(err),
        }
    }
}

impl From<write::Error> for Error {
    /// Converts [`write::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: write::Error) -> Error {
        Error::Write(err)
    }
}
