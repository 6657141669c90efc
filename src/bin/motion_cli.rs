use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::Rng;

use motion_classifier::analysis::classifier::CLASS_COUNT;
use motion_classifier::error::{log_init_error, InferenceError, InitError};
use motion_classifier::sensor::{ReplayFixture, ReplaySource, Sample};
use motion_classifier::{
    AppConfig, HeuristicClassifier, Pipeline, ResultReporter, SensorSource, LABELS,
};

#[derive(Parser, Debug)]
#[command(
    name = "motion_cli",
    about = "Replay harness for the motion classification pipeline"
)]
struct Cli {
    /// Path to a JSON config file (defaults are used when absent)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stream a recorded sample fixture through the pipeline
    Replay {
        #[arg(long)]
        samples: PathBuf,
        /// Override the configured trigger threshold
        #[arg(long)]
        threshold: Option<f32>,
    },
    /// Generate and classify synthetic episodes
    Synth {
        #[arg(long, default_value_t = 1)]
        episodes: u32,
        /// Peak angular rate of the generated motion (°/s)
        #[arg(long, default_value_t = 120.0)]
        intensity: f32,
    },
    /// Print the class label table
    Labels,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    tracing::debug!("motion_cli starting");

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Replay { samples, threshold } => {
            let mut config = config;
            if let Some(threshold) = threshold {
                config.trigger.energy_threshold = threshold;
            }
            let fixture = ReplayFixture::load(&samples)?;
            let mut source = ReplaySource::new(fixture);
            run_pipeline(&config, &mut source)
        }
        Commands::Synth {
            episodes,
            intensity,
        } => {
            let mut source = synth_source(&config, episodes, intensity);
            run_pipeline(&config, &mut source)
        }
        Commands::Labels => {
            for (idx, label) in LABELS.iter().enumerate() {
                println!("{}: {}", idx, label);
            }
            Ok(ExitCode::from(0))
        }
    }
}

/// Build the pipeline and drive the source to exhaustion.
///
/// Exit codes: 0 on clean shutdown, 1 on startup failure (before any
/// polling), 2 when the classifier engine fails mid-run.
fn run_pipeline<S: SensorSource>(config: &AppConfig, source: &mut S) -> Result<ExitCode> {
    let classifier = Box::new(HeuristicClassifier::new(config.window.tensor_len()));

    let mut pipeline = match Pipeline::new(config, classifier) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            log_init_error(&err, "pipeline startup");
            return Ok(ExitCode::from(1));
        }
    };

    let mut reporter = match ResultReporter::new(&LABELS, CLASS_COUNT, io::stdout()) {
        Ok(reporter) => reporter,
        Err(err) => {
            log_init_error(&err, "reporter startup");
            return Ok(ExitCode::from(1));
        }
    };
    log::info!("[CLI] reporting classes: {}", reporter.labels().join(", "));

    match pipeline.run(source, &mut reporter) {
        Ok(episodes) => {
            log::info!("[CLI] replay complete: {} episodes", episodes);
            Ok(ExitCode::from(0))
        }
        Err(err) => {
            if err.downcast_ref::<InferenceError>().is_some() {
                eprintln!("Error: {err:?}");
                return Ok(ExitCode::from(2));
            }
            if let Some(init) = err.downcast_ref::<InitError>() {
                log_init_error(init, "pipeline run");
                return Ok(ExitCode::from(1));
            }
            Err(err)
        }
    }
}

/// Generate trigger-then-window sample streams for `episodes` episodes.
///
/// Each episode is one above-threshold acceleration spike followed by a
/// full window of jittered gyroscope rows around `intensity`, with a few
/// quiet idle polls in between.
fn synth_source(config: &AppConfig, episodes: u32, intensity: f32) -> ReplaySource {
    let mut rng = rand::thread_rng();
    let mut samples = Vec::new();

    for _ in 0..episodes {
        // Quiet idle polls between episodes. Skipped at the permissive
        // zero threshold, where the first quiet poll would itself trigger.
        if config.trigger.energy_threshold > 0.0 {
            for _ in 0..3 {
                samples.push(Sample {
                    ax: 0.0,
                    ay: 0.0,
                    az: 0.0,
                    gx: 0.0,
                    gy: 0.0,
                    gz: 0.0,
                });
            }
        }

        samples.push(Sample {
            ax: config.trigger.energy_threshold + 1.0,
            ay: 0.0,
            az: 0.0,
            gx: 0.0,
            gy: 0.0,
            gz: 0.0,
        });

        for _ in 0..config.window.capacity {
            samples.push(Sample {
                ax: 0.0,
                ay: 0.0,
                az: 0.0,
                gx: intensity * rng.gen_range(0.8..1.2),
                gy: intensity * rng.gen_range(-0.2..0.2),
                gz: intensity * rng.gen_range(-0.2..0.2),
            });
        }
    }

    ReplaySource::from_samples(samples)
}
