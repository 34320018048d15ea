// deadcut-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use deadcut_core::config::{
    DEFAULT_INPUT_DIR, DEFAULT_MIN_GAP_SECS, DEFAULT_OUTPUT_DIR, DEFAULT_THREADS,
};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "deadcut: removes frozen, silent stretches from videos",
    long_about = "Extracts archives, finds .mp4 files under the input directory, detects \
                  regions where the picture is frozen and the audio is silent, and writes \
                  each file without them to the output directory. Inputs are deleted once \
                  their output has been written."
)]
pub struct Cli {
    /// Re-encode files even when there is no dead air to cut (default: copy them)
    #[arg(long = "forceEncode", alias = "force-encode")]
    pub force_encode: bool,

    /// Number of files encoded in parallel
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_THREADS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub threads: usize,

    /// Show ffmpeg's own output and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory searched recursively for .mp4 files and .zip archives
    #[arg(short = 'i', long = "input", value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Directory receiving processed files, mirroring the input layout
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Minimum length, in seconds, of a frozen and silent region to be cut
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_MIN_GAP_SECS)]
    pub min_gap: f64,

    /// Leave .zip archives under the input directory untouched
    #[arg(long)]
    pub no_extract: bool,
}
