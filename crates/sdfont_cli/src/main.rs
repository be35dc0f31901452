//! sdfont CLI
//!
//! Compiles a font's glyph outlines into a signed-distance-field texture
//! atlas and a compact binary glyph descriptor for runtime text renderers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod compile;
mod inspect;

use compile::CompileArgs;

#[derive(Parser)]
#[command(name = "sdfont")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SDF font atlas compiler", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a font into an SDF atlas (.png) and glyph descriptor (.dat)
    Compile {
        /// Path to the font file (TTF/OTF)
        font_path: PathBuf,

        /// Rasterization pixel height
        pixel_height: u32,

        /// Gap kept around each packed glyph, in texels
        gap: u32,

        /// Distance search radius, in source texels
        search_radius: u32,

        /// Size of the longer atlas axis, in texels
        output_size: u32,

        /// Characters to include (defaults to printable Latin-1)
        #[arg(long)]
        chars: Option<String>,

        /// Output path prefix (defaults to the font path)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the contents of a compiled glyph descriptor
    Inspect {
        /// Path to a .dat descriptor file
        path: PathBuf,
    },
}

fn main() {
    // Malformed invocations exit 1, same as pipeline failures; help and
    // version output keep exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Compile {
            font_path,
            pixel_height,
            gap,
            search_radius,
            output_size,
            chars,
            out,
        } => compile::run(CompileArgs {
            font_path,
            pixel_height,
            gap,
            search_radius,
            output_size,
            chars,
            out,
        }),
        Commands::Inspect { path } => inspect::run(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
