use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::{
    ConfigOverrides, Configuration, ExtractTtcError, Result, TrueTypeCollection, TrueTypeFont, buffer::FontBufReader,
    output_path,
};

/// Extracts every font of the collection at `path` with the default
/// configuration, optionally into `output_dir`.
///
/// Returns the written paths, `Helvetica_00.ttf`, `Helvetica_01.ttf`, ...
pub fn extract(path: impl AsRef<Path>, output_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let config = Configuration::default().merge(ConfigOverrides {
        output_directory: output_dir.map(Path::to_path_buf),
        ..Default::default()
    });
    extract_all(path, &config)
}

/// Writes each font of the collection at `source_path` as a standalone
/// file in `config.output_directory`, in collection order.
///
/// Stops at the first failure; files written before it are left in place.
pub fn extract_all(source_path: impl AsRef<Path>, config: &Configuration) -> Result<Vec<PathBuf>> {
    let source_path = source_path.as_ref();
    let mut reader = FontBufReader::open(source_path)?;
    let collection = TrueTypeCollection::parse_header(&mut reader)?;
    log::info!(
        "extracting {} font(s) from {}",
        collection.num_fonts,
        source_path.display()
    );

    let output_dir = config.output_directory.as_path();
    ensure_dir(output_dir)?;

    let mut written = Vec::with_capacity(collection.font_offsets.len());
    for (index, &offset) in collection.font_offsets.iter().enumerate() {
        let font = TrueTypeFont::parse_at(&mut reader, offset.into())?;
        if config.validate_checksums {
            for mismatch in font.checksum_mismatches() {
                log::warn!(
                    "font {index}: table '{}' checksum is {:#010X}, directory says {:#010X}",
                    mismatch.tag,
                    mismatch.computed,
                    mismatch.stored
                );
            }
        }

        let output_path = output_path::generate(source_path, index as i64, Some(output_dir))?;
        if !config.overwrite_existing && output_path.exists() {
            return Err(ExtractTtcError::WriteFailure {
                path: output_path,
                source: io::Error::new(io::ErrorKind::AlreadyExists, "file exists"),
            });
        }

        let size = font.to_file(&output_path)?;
        log::info!("wrote {} ({size} bytes)", output_path.display());
        written.push(output_path);
    }

    Ok(written)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    log::debug!("creating output directory {}", dir.display());
    fs::create_dir_all(dir).map_err(|source| ExtractTtcError::WriteFailure {
        path: dir.to_path_buf(),
        source,
    })
}
