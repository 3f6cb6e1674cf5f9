mod demos;
mod log_sink;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinema_core::{Easing, EngineConfig, ManualClock};
use kinema_scene::{Director, FixedRatePacer, Outcome, Pacer, PlaybackReport, SimulatedPacer};

use crate::demos::{Demo, Timing};
use crate::log_sink::LogSink;

#[derive(Parser)]
#[command(
    name = "kinema",
    version,
    about = "Kinema: a tiny 2D animation engine",
    long_about = "Kinema animates triangles by interpolating position, rotation, scale and color over time.\nThis binary plays the built-in demo sequences against a headless sink and reports what was drawn."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one of the built-in demo sequences
    Demo {
        /// Which demo to play
        #[arg(value_enum, default_value = "simple")]
        name: Demo,

        /// Path to a kinema.toml configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pace frames on the wall clock instead of simulating time
        #[arg(long)]
        realtime: bool,

        /// Default easing for steps that do not choose one
        #[arg(long)]
        easing: Option<Easing>,

        /// Default duration in seconds for steps that do not choose one
        #[arg(long)]
        duration: Option<f64>,

        /// Stop after this many frames
        #[arg(long)]
        max_frames: Option<u64>,

        /// Print the playback summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version and engine defaults
    Info {
        /// Path to a kinema.toml configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file
        #[arg(default_value = "kinema.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config_path, to_stderr) = match &cli.command {
        Commands::Demo { config, json, .. } => (config.as_deref(), *json),
        Commands::Info { config } => (config.as_deref(), false),
        Commands::InitConfig { .. } => (None, false),
    };
    let config = load_config(config_path)?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
    );
    if to_stderr {
        // Keep stdout clean for the JSON summary.
        subscriber
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Demo {
            name,
            realtime,
            easing,
            duration,
            max_frames,
            json,
            ..
        } => {
            let mut timing = Timing::from_config(&config.playback);
            if let Some(easing) = easing {
                timing.easing = easing;
            }
            if let Some(duration) = duration {
                timing.duration = duration;
            }
            cmd_demo(&config, name, timing, realtime, max_frames, json)
        }
        Commands::Info { .. } => cmd_info(&config),
        Commands::InitConfig { path, force } => cmd_init_config(&path, force),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn cmd_demo(
    config: &EngineConfig,
    demo: Demo,
    timing: Timing,
    realtime: bool,
    max_frames: Option<u64>,
    json: bool,
) -> Result<()> {
    let background = config.playback.background_color()?;
    let fps = config.playback.target_fps;
    let sink = LogSink::new(max_frames);

    tracing::info!(
        "playing {:?} demo at {} fps ({})",
        demo,
        fps,
        if realtime { "realtime" } else { "simulated" }
    );

    let reports = if realtime {
        let mut director = Director::new(sink, FixedRatePacer::new(fps));
        play(&mut director, demo, timing, background)
    } else {
        let clock = ManualClock::new();
        let pacer = SimulatedPacer::new(clock.clone(), fps);
        let mut director = Director::with_clock(sink, pacer, Rc::new(clock));
        play(&mut director, demo, timing, background)
    };

    let summary = RunSummary::new(demo, &reports);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print();
    }
    Ok(())
}

fn play<P: Pacer>(
    director: &mut Director<LogSink, P>,
    demo: Demo,
    timing: Timing,
    background: kinema_core::Color,
) -> Vec<PlaybackReport> {
    director.set_background_color(background);
    demos::run(demo, director, timing)
}

#[derive(serde::Serialize)]
struct PhaseSummary {
    frames: u64,
    elapsed_seconds: f64,
    outcome: &'static str,
}

#[derive(serde::Serialize)]
struct RunSummary {
    demo: Demo,
    phases: Vec<PhaseSummary>,
    frames: u64,
    elapsed_seconds: f64,
    interrupted: bool,
}

impl RunSummary {
    fn new(demo: Demo, reports: &[PlaybackReport]) -> Self {
        let phases: Vec<PhaseSummary> = reports
            .iter()
            .map(|report| PhaseSummary {
                frames: report.frames,
                elapsed_seconds: report.elapsed.as_seconds(),
                outcome: match report.outcome {
                    Outcome::Completed => "completed",
                    Outcome::Elapsed => "elapsed",
                    Outcome::Quit => "quit",
                },
            })
            .collect();
        Self {
            demo,
            frames: phases.iter().map(|p| p.frames).sum(),
            elapsed_seconds: phases.iter().map(|p| p.elapsed_seconds).sum(),
            interrupted: reports.iter().any(|r| r.was_interrupted()),
            phases,
        }
    }

    fn print(&self) {
        println!("Demo {:?}", self.demo);
        for (index, phase) in self.phases.iter().enumerate() {
            println!(
                "   phase {:>2}: {:>5} frames  {:>7.3}s  {}",
                index + 1,
                phase.frames,
                phase.elapsed_seconds,
                phase.outcome
            );
        }
        println!(
            "   total:    {:>5} frames  {:>7.3}s{}",
            self.frames,
            self.elapsed_seconds,
            if self.interrupted { "  (interrupted)" } else { "" }
        );
    }
}

fn cmd_info(config: &EngineConfig) -> Result<()> {
    println!("Kinema Animation Engine");
    println!("   Version:   {}", env!("CARGO_PKG_VERSION"));
    println!(
        "   Window:    {}x{} \"{}\"",
        config.window.width, config.window.height, config.window.title
    );
    println!("   Frame rate: {} fps", config.playback.target_fps);
    println!(
        "   Defaults:  {}s, {}",
        config.playback.default_duration, config.playback.default_easing
    );
    println!("   Background: {}", config.playback.background_color()?);
    let names: Vec<&str> = Easing::ALL.iter().map(|e| e.name()).collect();
    println!("   Easings:   {}", names.join(", "));
    Ok(())
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        );
    }
    EngineConfig::default()
        .save_to_file(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::Duration;

    #[test]
    fn test_cli_parses_demo_flags() {
        let cli = Cli::try_parse_from([
            "kinema",
            "demo",
            "group",
            "--easing",
            "ease-in-quad",
            "--max-frames",
            "12",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Demo {
                name,
                easing,
                max_frames,
                json,
                realtime,
                ..
            } => {
                assert_eq!(name, Demo::Group);
                assert_eq!(easing, Some(Easing::EaseInQuad));
                assert_eq!(max_frames, Some(12));
                assert!(json);
                assert!(!realtime);
            }
            _ => panic!("expected demo command"),
        }
    }

    #[test]
    fn test_summary_totals() {
        let reports = [
            PlaybackReport {
                frames: 3,
                elapsed: Duration::from_seconds(0.5),
                outcome: Outcome::Completed,
            },
            PlaybackReport {
                frames: 2,
                elapsed: Duration::from_seconds(0.25),
                outcome: Outcome::Quit,
            },
        ];
        let summary = RunSummary::new(Demo::Simple, &reports);
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.elapsed_seconds, 0.75);
        assert!(summary.interrupted);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["demo"], "simple");
        assert_eq!(json["phases"][1]["outcome"], "quit");
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let err = load_config(Some(Path::new("/definitely/not/here/kinema.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
