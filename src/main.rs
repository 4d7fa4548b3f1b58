use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use chrono::Local;
use uwes_check::answers::parse_answers;
use uwes_check::config::Config;
use uwes_check::export::{write_export, ExportRecord};
use uwes_check::scoring::{compute_scores, ResponseSet, ScoreReport};
use uwes_check::session::Session;
use uwes_check::tui::{resolve_theme, App};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID_ANSWERS: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer the questionnaire interactively (default if no subcommand)
    Tui,
    /// List the nine items with their subscales
    Items,
    /// Score a complete set of answers
    Score {
        /// Nine values in item order (6,6,0,...) or id=value pairs (1=6,2=6,...)
        #[arg(short, long)]
        answers: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Score a complete set of answers and write a CSV export
    Export {
        /// Nine values in item order (6,6,0,...) or id=value pairs (1=6,2=6,...)
        #[arg(short, long)]
        answers: String,

        /// Directory to write into (defaults to export_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "uwes-check")]
#[command(about = "UWES-9 work engagement questionnaire", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/uwes-check/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    if let Err(e) = uwes_check::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match uwes_check::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = uwes_check::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match command {
        Commands::Tui => run_interactive(config).await,
        Commands::Items => {
            let use_colors = uwes_check::output::should_use_colors();
            println!("{}", uwes_check::output::format_items(config.locale, use_colors));
            EXIT_SUCCESS
        }
        Commands::Score { answers, format } => match score_answers(&answers) {
            Ok((responses, report)) => print_report(&config, &responses, &report, format),
            Err(code) => code,
        },
        Commands::Export { answers, out } => match score_answers(&answers) {
            Ok((responses, report)) => {
                let dir = out.unwrap_or_else(|| config.export_dir());
                let record = ExportRecord::new(Local::now(), &report, &responses);
                match write_export(&dir, &record, config.locale) {
                    Ok(path) => {
                        println!("{}", path.display());
                        EXIT_SUCCESS
                    }
                    Err(e) => {
                        eprintln!("Export failed: {:#}", e);
                        EXIT_IO
                    }
                }
            }
            Err(code) => code,
        },
    };

    std::process::exit(code);
}

async fn run_interactive(config: Config) -> i32 {
    // Background detection talks to the terminal, so it runs before the TUI starts
    let theme = resolve_theme(config.theme);
    let app = App::new(Session::new(), config, theme);

    match uwes_check::tui::run_tui(app).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("TUI error: {:#}", e);
            EXIT_IO
        }
    }
}

/// Parse and score an answer list, reporting failures on stderr.
/// The error value is the exit code.
fn score_answers(input: &str) -> Result<(ResponseSet, ScoreReport), i32> {
    let responses = parse_answers(input).map_err(|e| {
        eprintln!("Invalid answers: {}", e);
        EXIT_INVALID_ANSWERS
    })?;

    let report = compute_scores(&responses).map_err(|e| {
        eprintln!("Cannot score: {}", e);
        eprintln!(
            "Answer every item with a value from {} to {}.",
            uwes_check::scoring::MIN_ANSWER,
            uwes_check::scoring::MAX_ANSWER
        );
        EXIT_INVALID_ANSWERS
    })?;

    tracing::debug!(overall = report.overall, "scored answers from command line");
    Ok((responses, report))
}

fn print_report(
    config: &Config,
    responses: &ResponseSet,
    report: &ScoreReport,
    format: OutputFormat,
) -> i32 {
    match format {
        OutputFormat::Text => {
            let use_colors = uwes_check::output::should_use_colors();
            println!(
                "{}",
                uwes_check::output::format_report(report, config.locale, use_colors)
            );
        }
        OutputFormat::Tsv => println!("{}", uwes_check::output::format_tsv(report)),
        OutputFormat::Json => {
            match uwes_check::output::format_json(report, responses, config.locale) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Failed to serialize report: {}", e);
                    return EXIT_IO;
                }
            }
        }
    }
    EXIT_SUCCESS
}
