//! `packet-gen`: generate, preview and update daily learning packets.
//!
//! ```sh
//! packet-gen --config family.toml generate-all
//! packet-gen generate-packet dahlia --date 2024-06-03
//! packet-gen test-packet xander --format json
//! packet-gen update-profile dahlia --activity riddle-clock --outcome correct
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=learning_packet_gen=debug` for
//! stage-by-stage output.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learning_packet_gen::{
    render::{self, JsonRenderer, MarkdownRenderer, RenderError, Renderer},
    ChildId, ContentBank, CycleFailure, EngineConfig, EngineError, JsonFileStore, Outcome,
    Packet, PacketEngine,
};

#[derive(Parser)]
#[command(name = "packet-gen", version, about = "Adaptive daily learning packets")]
struct Cli {
    /// TOML configuration. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON content bank replacing the built-in templates.
    #[arg(long, global = true)]
    bank: Option<PathBuf>,

    /// Where printable packets are written. Defaults to `<packets_dir>/print`.
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// Printable output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Generate, archive and print today's packet for one child.
    GeneratePacket {
        child: ChildId,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Generate packets for every child on the roster.
    GenerateAll {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Dry run: build and print a packet without saving anything.
    TestPacket {
        child: ChildId,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record the outcome of one activity.
    UpdateProfile {
        child: ChildId,
        #[arg(long)]
        activity: String,
        /// correct, incorrect, skipped, or a score between 0 and 1.
        #[arg(long)]
        outcome: Outcome,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print a child's levels and recent history.
    ShowProfile { child: ChildId },
}

fn today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn report_engine_error(e: &EngineError, child: &ChildId) {
    error!("{} (kind: {}, child: {})", e, e.kind(), child);
}

fn report_render_error(e: &RenderError, child: &ChildId) {
    error!("{} (kind: rendering, child: {})", e, child);
}

fn report_failure(f: &CycleFailure) {
    error!("{} (kind: {}, child: {}, stage: {})", f.error, f.kind(), f.child, f.stage);
}

struct App {
    engine: PacketEngine,
    renderer: Box<dyn Renderer>,
    out_dir: PathBuf,
}

impl App {
    fn build(cli: &Cli) -> Result<Self, EngineError> {
        let config = match &cli.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        let bank = match &cli.bank {
            Some(path) => ContentBank::load(path)?,
            None => ContentBank::builtin()?,
        };
        let store = Arc::new(JsonFileStore::from_config(&config.storage));
        let out_dir = cli
            .out_dir
            .clone()
            .unwrap_or_else(|| config.storage.packets_dir.join("print"));
        let renderer: Box<dyn Renderer> = match cli.format {
            Format::Markdown => Box::new(MarkdownRenderer),
            Format::Json => Box::new(JsonRenderer),
        };
        let engine = PacketEngine::new(config, Arc::new(bank), store)?;
        Ok(App { engine, renderer, out_dir })
    }

    /// The profile is already saved when this runs; a failure here only
    /// loses the printable copy.
    fn print_or_report(&self, packet: &Packet) -> bool {
        let written = render::write_artifact(
            self.renderer.as_ref(),
            packet,
            &self.engine.config().render,
            &self.out_dir,
        );
        match written {
            Ok(path) => {
                println!("{}: {} activities, ~{} min -> {}", packet.child_name, packet.activities.len(), packet.total_minutes(), path.display());
                true
            }
            Err(e) => {
                report_render_error(&e, &packet.child_id);
                false
            }
        }
    }
}

fn show_profile(engine: &PacketEngine, child: &ChildId) -> Result<(), EngineError> {
    let profile = engine.profile(child)?;
    println!("{} ({})", profile.name(), profile.id());
    println!("Levels:");
    for (t, level) in profile.levels() {
        println!("  {:<22} {}", t.as_str(), level);
    }
    println!("Recently served: {}", profile.recent().iter().collect::<Vec<_>>().join(", "));
    println!("History ({} records, latest last):", profile.history().len());
    let skip = profile.history().len().saturating_sub(10);
    for r in &profile.history()[skip..] {
        println!("  {} {:<22} {:<20} tier {} {}", r.date, r.activity_type.as_str(), r.activity_id, r.difficulty, r.outcome);
    }
    Ok(())
}

fn run(cli: Cli) -> ExitCode {
    let app = match App::build(&cli) {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {} (kind: {})", e, e.kind());
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::GeneratePacket { child, date } => {
            match app.engine.generate(&child, today(date)) {
                Ok(packet) => {
                    if app.print_or_report(&packet) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
                }
                Err(f) => {
                    report_failure(&f);
                    ExitCode::FAILURE
                }
            }
        }
        Command::GenerateAll { date } => {
            let date = today(date);
            info!("Generating packets for {} children on {}", app.engine.config().children.len(), date);
            let report = app.engine.generate_all(date);
            let mut ok = report.failures.is_empty();
            for packet in &report.packets {
                ok &= app.print_or_report(packet);
            }
            for f in &report.failures {
                report_failure(f);
            }
            if report.halted {
                error!("Batch halted after a persistence failure");
            }
            if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Command::TestPacket { child, date } => {
            match app.engine.preview(&child, today(date)) {
                Ok(packet) => {
                    let rendered = app.renderer.render(&packet, &app.engine.config().render);
                    match rendered {
                        Ok(artifact) => {
                            println!("{}", String::from_utf8_lossy(&artifact.bytes));
                            ExitCode::SUCCESS
                        }
                        Err(e) => {
                            report_render_error(&e, &child);
                            ExitCode::FAILURE
                        }
                    }
                }
                Err(f) => {
                    report_failure(&f);
                    ExitCode::FAILURE
                }
            }
        }
        Command::UpdateProfile { child, activity, outcome, date } => {
            match app.engine.record(&child, &activity, outcome, today(date)) {
                Ok(profile) => {
                    println!("Recorded {} for {} ({} history records)", outcome, profile.name(), profile.history().len());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    report_engine_error(&e, &child);
                    ExitCode::FAILURE
                }
            }
        }
        Command::ShowProfile { child } => match show_profile(&app.engine, &child) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report_engine_error(&e, &child);
                ExitCode::FAILURE
            }
        },
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Cli::parse())
}
