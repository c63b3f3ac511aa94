use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use examplan_core::dates::parse_date;
use examplan_core::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "examplan", version, about = "Exam study planner")]
struct Cli {
    /// Plan file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    plan: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the study window and workload
    Window {
        #[arg(long)]
        json: bool,
    },
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Place a session, or remove it if the subject is already on that day
    Place {
        /// Date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        /// Subject id or name
        subject: String,
    },
    /// Move a placed session by a number of days
    Move {
        /// Date the session is on (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        /// Session id or a unique prefix of it
        entry: String,
        /// Days to shift; negative moves earlier
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Remove a placed session
    Remove {
        /// Date the session is on (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        /// Session id or a unique prefix of it
        entry: String,
    },
    /// Subject outlines
    Outline {
        #[command(subcommand)]
        action: commands::outline::OutlineAction,
    },
    /// Daily memos
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Mastery checklist
    Mastery {
        #[command(subcommand)]
        action: commands::mastery::MasteryAction,
    },
    /// Day-by-day calendar of the plan
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Quota usage per subject
    Progress {
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&Config::load_or_default());

    let plan = cli.plan.as_deref();
    let result = match cli.command {
        Commands::Window { json } => commands::window::run(plan, json),
        Commands::Subject { action } => commands::subject::run(plan, action),
        Commands::Place { date, subject } => commands::session::place(plan, date, &subject),
        Commands::Move { date, entry, delta } => commands::session::move_entry(plan, date, &entry, delta),
        Commands::Remove { date, entry } => commands::session::remove(plan, date, &entry),
        Commands::Outline { action } => commands::outline::run(plan, action),
        Commands::Note { action } => commands::note::run(plan, action),
        Commands::Mastery { action } => commands::mastery::run(plan, action),
        Commands::Show { json } => commands::show::run(plan, json),
        Commands::Progress { json } => commands::progress::run(plan, json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
