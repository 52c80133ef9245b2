//! Ezcut - copies a video with the quiet sections cut out.
//!
//! The audio track is split into short chunks, each chunk's loudness is
//! smoothed with a sliding maximum, and the runs above a threshold that are
//! long enough are kept. The kept intervals are then rendered with ffmpeg or
//! plotted for tuning.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod plot;
pub mod render;
pub mod selector;

use clap::Parser;
use cli::{Cli, Command, CutArgs};
use config::{
    Config, config_file_path, load_default_config, save_default_config, validate_config,
};
use pipeline::{CutMode, CutOptions, cut_file};
use render::{FfmpegRenderer, RenderSettings};
use selector::{Parameters, TrailingRun};
use std::path::Path;
use tracing::warn;

pub use error::{Error, Result, Stage};

/// Main entry point for ezcut CLI.
#[allow(clippy::print_stdout)]
pub fn run() -> Result<()> {
    let Cli {
        command,
        input,
        config,
        cut,
    } = Cli::parse();

    init_logging(cut.verbose, cut.quiet);

    // Install Ctrl+C handler to remove half-written outputs on interrupt
    if let Err(e) = ctrlc::set_handler(|| {
        render::cleanup_all_partials();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    let config_path = config.as_deref();

    if let Some(command) = command {
        return handle_command(command, config_path);
    }
    // clap requires the input whenever no subcommand is given
    let input = input.unwrap_or_default();

    let config = load_default_config(config_path)?;
    validate_config(&config)?;

    let (options, settings) = resolve_options(&cut, &config)?;
    let renderer = FfmpegRenderer::new(settings);
    let report = cut_file(&input, &options, &renderer)?;

    if !cut.quiet {
        println!(
            "{}: kept {} intervals, {:.1}s of {:.1}s ({:.1}s removed)",
            report.output.display(),
            report.intervals,
            report.kept_secs,
            report.source_secs,
            report.removed_secs()
        );
    }

    Ok(())
}

/// Merge command-line flags over the configuration file.
///
/// Flags win; anything not given on the command line comes from `config`.
pub fn resolve_options(args: &CutArgs, config: &Config) -> Result<(CutOptions, RenderSettings)> {
    let defaults = &config.defaults;

    let trailing = if args.keep_tail || defaults.keep_tail {
        TrailingRun::Close
    } else {
        TrailingRun::Drop
    };
    let params = Parameters::new(
        args.chunk.unwrap_or(defaults.chunk),
        args.window.unwrap_or(defaults.window),
        args.thresh.unwrap_or(defaults.thresh),
        args.min_clip.unwrap_or(defaults.min_clip),
    )?
    .with_trailing(trailing);

    let options = CutOptions {
        params,
        mode: if args.graph {
            CutMode::Graph
        } else {
            CutMode::Render
        },
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| defaults.output_dir.clone()),
        force: args.force,
        export: args.export.clone(),
        sample_rate: config.analysis.sample_rate,
        progress: !args.quiet && !args.no_progress,
    };

    let mut settings = RenderSettings::from(&config.render);
    if let Some(codec) = &args.codec {
        settings.video_codec.clone_from(codec);
    }

    Ok((options, settings))
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, config_path: Option<&Path>) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config_path),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction, config_path: Option<&Path>) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path(config_path)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default(), config_path)?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config(config_path)?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path(config_path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
