use std::path::Path;

use extract_ttc::{TrueTypeCollection, output_path};

use super::{display_error, inspect_exit_code};

/// Runs `ls`: prints the names `extract` would write
pub fn run(file: &Path) -> u8 {
    match list(file) {
        Ok(()) => 0,
        Err(err) => {
            display_error(&err);
            inspect_exit_code(&err)
        }
    }
}

fn list(file: &Path) -> anyhow::Result<()> {
    let collection = TrueTypeCollection::from_file(file)?;

    println!("TTC File: {}", file.display());
    println!("   Fonts: {}", collection.num_fonts);
    println!();

    for index in 0..collection.font_offsets.len() {
        let name = output_path::generate(file, index as i64, None)?;
        println!("  {index}. {}", name.display());
    }
    Ok(())
}
