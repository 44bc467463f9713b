#[macro_use]
extern crate log;

use cimage::{compress_verified, dump, read_bmp, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cimage",
    about = "Compress a 24-bit BMP for the 240x240 badge display"
)]
struct Cli {
    /// Input bitmap (default: stdin)
    file: Option<PathBuf>,
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output representation
    #[arg(short, long, value_enum, default_value_t = Format::C)]
    format: Format,
    /// Name of the emitted C constant
    #[arg(short, long, default_value = "image")]
    name: String,
    /// Log every run token
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// `struct dp_cimage` initializer
    C,
    /// payload bytes as hex
    Hex,
}

fn main() {
    let cli = Cli::parse();

    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let bmp = match &cli.file {
        Some(path) => read_bmp(File::open(path)?)?,
        None => read_bmp(io::stdin().lock())?,
    };
    let pixels = bmp.pixels()?;
    let img = compress_verified(&pixels)?;
    info!(
        "Compressed image from {} bytes to {} bytes.",
        bmp.quantized_size(),
        img.len()
    );

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    match cli.format {
        Format::C => dump::write_c(&img, &cli.name, out)?,
        Format::Hex => dump::write_hex(&img, out)?,
    }
    Ok(())
}
