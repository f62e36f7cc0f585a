use clap::{App, Arg};
use mearc::build::build_site;
use mearc::config::Config;
use std::path::{Path, PathBuf};
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = App::new("mearc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds a static site from a tree of Markdown documents")
        .arg(
            Arg::with_name("project")
                .help("The project directory (defaults to the current directory)")
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Overrides the configured output directory"),
        )
        .arg(
            Arg::with_name("base-path")
                .short("b")
                .long("base-path")
                .takes_value(true)
                .help("Overrides the configured base path for root-relative links"),
        )
        .get_matches();

    let project_directory = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("determining current directory: {}", e);
                exit(1);
            }
        },
    };

    let config = match Config::from_directory(
        &project_directory,
        matches.value_of("output").map(Path::new),
        matches.value_of("base-path"),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    if let Err(e) = build_site(&config) {
        eprintln!("{}", e);
        exit(1);
    }
}
