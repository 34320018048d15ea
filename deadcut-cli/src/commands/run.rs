// deadcut-cli/src/commands/run.rs
//
// Turns parsed arguments into a CoreConfig and runs the batch with the real
// ffmpeg spawner.

use crate::cli::Cli;
use crate::error::CliResult;
use deadcut_core::config::{CoreConfig, CoreConfigBuilder};
use deadcut_core::external::SidecarSpawner;
use deadcut_core::process_videos;
use deadcut_core::terminal_output::{print_section, print_status};

/// Builds the core configuration from command-line arguments.
pub fn build_config(args: &Cli) -> CoreConfig {
    CoreConfigBuilder::new()
        .input_dir(args.input_dir.clone())
        .output_dir(args.output_dir.clone())
        .threads(args.threads)
        .force_encode(args.force_encode)
        .verbose(args.verbose)
        .min_gap_secs(args.min_gap)
        .extract_archives(!args.no_extract)
        .build()
}

/// Validates the configuration and processes the input directory.
pub fn run(args: &Cli) -> CliResult<()> {
    let config = build_config(args);
    config.validate()?;

    print_section("deadcut");
    print_status("Input", &config.input_dir.display().to_string(), false);
    print_status("Output", &config.output_dir.display().to_string(), false);
    print_status("Threads", &config.threads.to_string(), false);
    print_status("Min gap", &format!("{:.2}s", config.min_gap_secs), false);
    if config.force_encode {
        print_status("Force encode", "yes", true);
    }

    let report = process_videos(&SidecarSpawner, &config)?;
    log::debug!(
        "Batch finished: {} processed, {} skipped",
        report.outcomes.len(),
        report.skipped.len()
    );
    Ok(())
}
