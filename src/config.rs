//! Loads the `mearc.yaml` project file. The project file is searched for
//! in the given directory and its ancestors, so the generator can run
//! from anywhere inside a project tree. Every field is optional; paths
//! are resolved against the directory containing the project file.

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

const PROJECT_FILE: &str = "mearc.yaml";

/// The raw project file contents.
#[derive(Deserialize)]
struct Project {
    #[serde(default = "defaults::content_directory")]
    content_directory: PathBuf,

    #[serde(default = "defaults::static_directory")]
    static_directory: PathBuf,

    #[serde(default = "defaults::output_directory")]
    output_directory: PathBuf,

    #[serde(default = "defaults::template")]
    template: PathBuf,

    #[serde(default = "defaults::base_path")]
    base_path: String,
}

mod defaults {
    use std::path::PathBuf;

    pub fn content_directory() -> PathBuf {
        PathBuf::from("content")
    }

    pub fn static_directory() -> PathBuf {
        PathBuf::from("static")
    }

    pub fn output_directory() -> PathBuf {
        PathBuf::from("public")
    }

    pub fn template() -> PathBuf {
        PathBuf::from("template.html")
    }

    pub fn base_path() -> String {
        String::from("/")
    }
}

/// The fully-resolved build configuration.
pub struct Config {
    /// The directory containing the Markdown sources.
    pub content_directory: PathBuf,

    /// The directory of static assets mirrored into the output.
    pub static_directory: PathBuf,

    /// The directory the site is written into.
    pub output_directory: PathBuf,

    /// The page template file.
    pub template: PathBuf,

    /// The prefix substituted for root-relative links, e.g. `/` for a
    /// site served at the domain root or `/mearc/` for project pages.
    pub base_path: String,
}

impl Config {
    /// Searches `dir` and its ancestors for the project file and loads
    /// it. `output` and `base_path` override the corresponding project
    /// file fields when given (typically from the command line).
    pub fn from_directory(
        dir: &Path,
        output: Option<&Path>,
        base_path: Option<&str>,
    ) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path, output, base_path)
        } else {
            match dir.parent() {
                Some(parent) => {
                    Config::from_directory(parent, output, base_path)
                }
                None => Err(Error::NotFound),
            }
        }
    }

    /// Loads a specific project file, resolving relative paths against
    /// its parent directory.
    pub fn from_project_file(
        path: &Path,
        output: Option<&Path>,
        base_path: Option<&str>,
    ) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file)?;
        let root = match path.parent() {
            Some(root) => root,
            None => return Err(Error::NoParent(path.to_owned())),
        };
        Ok(Config {
            content_directory: root.join(project.content_directory),
            static_directory: root.join(project.static_directory),
            output_directory: match output {
                Some(output) => output.to_owned(),
                None => root.join(project.output_directory),
            },
            template: root.join(project.template),
            base_path: match base_path {
                Some(base_path) => base_path.to_owned(),
                None => project.base_path,
            },
        })
    }
}

/// The result of a fallible configuration-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the project configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no ancestor directory contains the project file.
    NotFound,

    /// Returned when the project file path has no parent directory to
    /// resolve other paths against.
    NoParent(PathBuf),

    /// Returned for I/O problems opening the project file.
    Open { path: PathBuf, err: io::Error },

    /// Returned for errors parsing the project file.
    Parse(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound => write!(
                f,
                "could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::NoParent(path) => write!(
                f,
                "project file `{}` has no parent directory",
                path.display()
            ),
            Error::Open { path, err } => {
                write!(f, "opening project file `{}`: {}", path.display(), err)
            }
            Error::Parse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound => None,
            Error::NoParent(_) => None,
            Error::Open { path: _, err } => Some(err),
            Error::Parse(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts [`serde_yaml::Error`]s into [`Error`]. This allows us to
    /// use the `?` operator.
    fn from(err: serde_yaml::Error) -> Error {
        Error::Parse(err)
    }
}
