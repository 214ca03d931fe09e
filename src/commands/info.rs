use std::path::Path;

use extract_ttc::{TrueTypeCollection, TrueTypeFont, buffer::FontBufReader};

use super::{display_error, inspect_exit_code};

/// Runs `info`: dumps the collection header and, verbosely, every
/// font's table directory
pub fn run(file: &Path, verbose: bool) -> u8 {
    match info(file, verbose) {
        Ok(()) => 0,
        Err(err) => {
            display_error(&err);
            inspect_exit_code(&err)
        }
    }
}

fn info(file: &Path, verbose: bool) -> anyhow::Result<()> {
    let mut reader = FontBufReader::open(file)?;
    let collection = TrueTypeCollection::parse_header(&mut reader)?;

    display_header(&collection, file, reader.source_len());
    if verbose {
        println!();
        println!("=== Font Details ===");
        for (index, &offset) in collection.font_offsets.iter().enumerate() {
            let font = TrueTypeFont::parse_at(&mut reader, offset.into())?;
            display_font(index, &font);
        }
    }
    Ok(())
}

fn display_header(collection: &TrueTypeCollection, file: &Path, size: u64) {
    println!("=== TTC File Information ===");
    println!();
    println!("File: {}", file.display());
    println!("Size: {}", format_bytes(size));
    println!();
    println!("=== Header ===");
    println!("Tag: {}", collection.tag);
    println!(
        "Version: {}.{} (0x{:X})",
        collection.major_version,
        collection.minor_version,
        collection.version()
    );
    println!("Number of fonts: {}", collection.num_fonts);
    println!();
    println!("=== Font Offsets ===");
    for (index, offset) in collection.font_offsets.iter().enumerate() {
        println!("  {index}. Offset: {offset:>8} (0x{offset:X})");
    }
}

fn display_font(index: usize, font: &TrueTypeFont) {
    println!();
    println!("Font {index}:");
    println!("  SFNT version: 0x{:X}", font.offset_table.sfnt_version);
    println!("  Number of tables: {}", font.offset_table.num_tables);
    if let Ok(head) = font.head() {
        println!(
            "  head: revision 0x{:08X}, checksum adjustment 0x{:08X}{}",
            head.font_revision,
            head.checksum_adjustment,
            if head.has_valid_magic() { "" } else { ", bad magic number" }
        );
    }
    println!("  Tables:");
    for table in &font.table_directory {
        println!(
            "    - {:<8}checksum: 0x{:08X} offset: {:>8} length: {:>8}",
            table.tag.to_string(),
            table.checksum,
            table.offset,
            table.length
        );
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_sizes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }
}
