use std::path::{Path, PathBuf};

use anyhow::Context;
use extract_ttc::{ConfigOverrides, Configuration, ErrorClass};

use super::{display_error, error_class};

/// Runs `extract`, returning the process exit code
pub fn run(file: &Path, output_dir: Option<PathBuf>, verbose: bool) -> u8 {
    match extract(file, output_dir, verbose) {
        Ok(paths) => {
            display_results(&paths);
            0
        }
        Err(err) => {
            display_error(&err);
            exit_code(&err)
        }
    }
}

fn extract(file: &Path, output_dir: Option<PathBuf>, verbose: bool) -> anyhow::Result<Vec<PathBuf>> {
    let config = Configuration::default().merge(ConfigOverrides {
        output_directory: output_dir,
        verbose: Some(verbose),
        validate_checksums: Some(verbose),
        ..Default::default()
    });
    if config.verbose {
        println!("Extracting fonts from {}...", file.display());
    }

    extract_ttc::extract_all(file, &config).with_context(|| format!("extracting {}", file.display()))
}

/// 1 read error, 2 invalid file, 3 write error, 4 extraction error, 5 unexpected.
///
/// Bad arguments share 4 with extraction errors. clap already rejects
/// malformed command lines with its own code 2, so 4 is only reached by
/// arguments the library refuses, such as an empty path.
fn exit_code(err: &anyhow::Error) -> u8 {
    match error_class(err) {
        Some(ErrorClass::Read) => 1,
        Some(ErrorClass::Invalid) => 2,
        Some(ErrorClass::Write) => 3,
        Some(ErrorClass::Extraction | ErrorClass::Argument) => 4,
        None => 5,
    }
}

fn display_results(paths: &[PathBuf]) {
    if paths.is_empty() {
        println!("No fonts were extracted.");
        return;
    }

    println!("Successfully extracted {} font(s):", paths.len());
    for path in paths {
        println!("  {}", path.display());
    }
}
