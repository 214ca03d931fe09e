//! Names for the fonts written out of a collection: `{basename}_{index}.ttf`.

use std::path::{Path, PathBuf};

use crate::{ExtractTtcError, Result};

/// Two digit, zero padded indices (00, 01, 02, ...)
pub const DEFAULT_INDEX_FORMAT: &str = "%02d";

/// Builds the output path for font `index` of `input_path`.
///
/// Without an output directory (or with `""` / `"."`) the bare file name
/// is returned.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use extract_ttc::output_path::generate;
///
/// assert_eq!(generate("Helvetica.ttc", 0, None).unwrap(), PathBuf::from("Helvetica_00.ttf"));
/// assert_eq!(
///     generate("a/b/My.Font.ttc", 3, Some(Path::new("/tmp"))).unwrap(),
///     PathBuf::from("/tmp/My.Font_03.ttf")
/// );
/// ```
pub fn generate(input_path: impl AsRef<Path>, index: i64, output_dir: Option<&Path>) -> Result<PathBuf> {
    let output_dir = output_dir.filter(|dir| *dir != Path::new("."));
    build(input_path.as_ref(), index, DEFAULT_INDEX_FORMAT, output_dir)
}

/// Like [`generate`] but formats the index with a printf style
/// `index_format` such as `"%03d"` or `"%d"`.
///
/// Only an empty or missing output directory yields a bare file name here.
pub fn generate_with_format(
    input_path: impl AsRef<Path>,
    index: i64,
    index_format: &str,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    build(input_path.as_ref(), index, index_format, output_dir)
}

fn build(input_path: &Path, index: i64, index_format: &str, output_dir: Option<&Path>) -> Result<PathBuf> {
    if index < 0 {
        return Err(ExtractTtcError::InvalidArgument(format!(
            "font index must be non-negative, got {index}"
        )));
    }
    let Some(basename) = input_path.file_stem() else {
        return Err(ExtractTtcError::InvalidArgument(format!(
            "'{}' has no file name",
            input_path.display()
        )));
    };

    let formatted_index = format_index(index_format, index)?;
    let filename = format!("{}_{formatted_index}.ttf", basename.to_string_lossy());

    Ok(match output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(filename),
        _ => PathBuf::from(filename),
    })
}

/// Expands a printf style format holding exactly one `%d` conversion
/// with optional `0` flag and width. `%%` is a literal percent sign.
fn format_index(index_format: &str, index: i64) -> Result<String> {
    let invalid = || ExtractTtcError::InvalidArgument(format!("unsupported index format '{index_format}'"));

    let mut out = String::new();
    let mut chars = index_format.chars().peekable();
    let mut converted = false;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }
        if converted {
            return Err(invalid());
        }

        let zero_pad = chars.next_if_eq(&'0').is_some();
        let mut width = 0usize;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            chars.next();
            width = width.checked_mul(10).and_then(|w| w.checked_add(digit as usize)).ok_or_else(invalid)?;
        }
        if chars.next() != Some('d') {
            return Err(invalid());
        }

        if zero_pad {
            out.push_str(&format!("{index:0width$}"));
        } else {
            out.push_str(&format!("{index:width$}"));
        }
        converted = true;
    }

    if !converted {
        return Err(invalid());
    }
    Ok(out)
}
