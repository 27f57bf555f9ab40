use std::{error::Error, fs, path::PathBuf};

use ar_board::run::{defaults_json, init_logging, replay_files, run_config};
use ar_board::surface::SurfaceReplayReport;
use clap::{Parser, Subcommand};

/// Board surface estimation from recorded corner-marker tracks.
#[derive(Debug, Parser)]
#[command(author, version, about = "Marker-delimited board surface estimator")]
struct Args {
    /// Log per-frame estimator decisions.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a JSON tracking recording and emit a report.
    Replay {
        /// Path to a JSON TrackingRecording.
        recording: PathBuf,

        /// Optional JSON SurfaceParams. Defaults are used if omitted.
        #[arg(long)]
        params: Option<PathBuf>,

        /// Optional JSON CornerLayout. Overrides the layout stored in the recording.
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Write the report here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Include debug overlay segments per frame.
        #[arg(long)]
        overlay: bool,
    },
    /// Run a replay described by a JSON SurfaceReplayConfig.
    Run {
        #[arg(long)]
        config: PathBuf,
    },
    /// Print default params and corner layout as JSON.
    Defaults,
}

fn print_summary(report: &SurfaceReplayReport) {
    let s = &report.summary;
    eprintln!(
        "frames: {}  tracked: {}  held: {}  hidden: {}  degenerate: {}",
        s.frames, s.tracked, s.held, s.hidden, s.degenerate
    );
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Replay {
            recording,
            params,
            layout,
            output,
            overlay,
        } => {
            let report = replay_files(&recording, params.as_deref(), layout.as_deref(), overlay)?;
            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    eprintln!("report written to {}", path.display());
                }
                None => println!("{json}"),
            }
            print_summary(&report);
        }
        Command::Run { config } => {
            let (report, path) = run_config(&config)?;
            eprintln!("report written to {}", path.display());
            print_summary(&report);
        }
        Command::Defaults => println!("{}", defaults_json()?),
    }
    Ok(())
}
