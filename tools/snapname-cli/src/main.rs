//! SnapName CLI: entry point for the shell launcher and for scripting.
//!
//! Usage:
//!   snapname ocr [SOURCE_FILE]       Select a screen region and OCR it
//!   snapname prefix <TAG> <FILE>     Insert a tag before the file name
//!   snapname suffix <TAG> <FILE>     Insert a tag before the extension
//!   snapname tags                    List the tag vocabulary
//!   snapname recognize <IMAGE>       OCR an image file, print the stem
//!   snapname check                   Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use snapname_common::config::AppConfig;
use snapname_naming::TagPosition;

mod commands;

#[derive(Parser)]
#[command(
    name = "snapname",
    about = "Name files after the text on your screen",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a region on the monitor under the pointer and recognize its text
    Ocr {
        /// File the editor's rename controls act on
        source_file: Option<PathBuf>,
    },

    /// Insert a tag before the file name
    Prefix {
        /// Tag text, e.g. "+Thesis+2024+"
        tag: String,

        /// File to rename
        file: PathBuf,
    },

    /// Insert a tag between the file name and its extension
    Suffix {
        /// Tag text, e.g. "+authors"
        tag: String,

        /// File to rename
        file: PathBuf,
    },

    /// List the tag vocabulary
    Tags {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recognize text in a PNG image and print the synthesized file stem
    Recognize {
        /// Path to the image
        image: PathBuf,
    },

    /// Check system capabilities
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    snapname_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Ocr { source_file } => commands::ocr::run(&config, source_file),
        Commands::Prefix { tag, file } => commands::tag::run(TagPosition::Prefix, &tag, &file),
        Commands::Suffix { tag, file } => commands::tag::run(TagPosition::Suffix, &tag, &file),
        Commands::Tags { json } => commands::tags::run(json),
        Commands::Recognize { image } => commands::recognize::run(&config, &image),
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_prefix_arguments() {
        let cli = Cli::try_parse_from(["snapname", "prefix", "+Thesis+2024+", "/docs/notes.txt"])
            .unwrap();
        match cli.command {
            Commands::Prefix { tag, file } => {
                assert_eq!(tag, "+Thesis+2024+");
                assert_eq!(file, PathBuf::from("/docs/notes.txt"));
            }
            _ => panic!("expected prefix"),
        }
    }

    #[test]
    fn test_ocr_source_is_optional() {
        let cli = Cli::try_parse_from(["snapname", "ocr"]).unwrap();
        assert!(matches!(cli.command, Commands::Ocr { source_file: None }));
    }

    #[test]
    fn test_missing_or_unknown_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["snapname"]).is_err());
        assert!(Cli::try_parse_from(["snapname", "install"]).is_err());
        assert!(Cli::try_parse_from(["snapname", "suffix", "+authors"]).is_err());
    }
}
