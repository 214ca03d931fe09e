use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use flexi_logger::Logger;

mod commands;

#[derive(Parser)]
#[command(version, about = "Extract TrueType fonts from TrueType Collections")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Extract TTF files from a TTC file")]
    Extract {
        #[arg(help = "TTC file to read")]
        file: PathBuf,

        #[arg(help = "Output directory for TTF files", short, long)]
        output_dir: Option<PathBuf>,

        #[arg(help = "Enable verbose output", short, long, default_value_t = false)]
        verbose: bool,
    },

    #[command(about = "List the fonts contained in a TTC file")]
    Ls {
        #[arg(help = "TTC file to read")]
        file: PathBuf,
    },

    #[command(about = "Show detailed information about a TTC file")]
    Info {
        #[arg(help = "TTC file to read")]
        file: PathBuf,

        #[arg(help = "Also dump the table directory of every font", short, long, default_value_t = false)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let verbose = match &args.command {
        Commands::Extract { verbose, .. } | Commands::Info { verbose, .. } => *verbose,
        Commands::Ls { .. } => false,
    };
    let level = if verbose { "info" } else { "warn" };
    let _logger = match Logger::try_with_env_or_str(level).and_then(|logger| logger.start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    };

    let code = match args.command {
        Commands::Extract {
            file,
            output_dir,
            verbose,
        } => commands::extract::run(&file, output_dir, verbose),
        Commands::Ls { file } => commands::list::run(&file),
        Commands::Info { file, verbose } => commands::info::run(&file, verbose),
    };
    ExitCode::from(code)
}
