//! Round Tally Core - Streak Tracking CLI
//!
//! The main entry point for rt-core, handling:
//! - Recording round outcomes into the append-only ledger
//! - Aggregate statistics and run segmentation queries
//! - Streak alert evaluation with persisted arming state
//! - Notification dispatch and CSV export
//! - Configuration management

use clap::{Args, Parser, Subcommand};
use rt_common::error::format_error_human;
use rt_common::{Error, ErrorCategory, Outcome, OutputFormat, Round, StructuredError};
use rt_config::{
    load_settings, resolve_settings, validate_settings, Settings, ValidationError,
    CONFIG_SCHEMA_VERSION,
};
use rt_core::exit_codes::ExitCode;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

/// Round Tally - Append-only outcome ledger with streak alerts
#[derive(Parser)]
#[command(name = "rt-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to the settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the ledger file path
    #[arg(long, global = true, env = "ROUND_TALLY_LEDGER")]
    ledger: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    format: OutputFormat,

    /// Override the streak alert threshold
    #[arg(long, global = true)]
    threshold: Option<u32>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Append one outcome to the ledger
    Record(RecordArgs),

    /// Show aggregate statistics for the full history
    Stats,

    /// Show the run segmentation of the full history
    Runs,

    /// Show recent outcomes, newest first
    Last(LastArgs),

    /// Export the ledger as CSV
    Export(ExportArgs),

    /// Validate configuration, ledger, and alert state
    Check,

    /// Configuration management
    Config(ConfigArgs),

    /// Send one test message through the configured notifier
    NotifyTest(NotifyTestArgs),

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct RecordArgs {
    /// Outcome to record: p/player, b/banker, t/tie (case-insensitive)
    outcome: String,

    /// Skip notification dispatch for this append
    #[arg(long)]
    no_notify: bool,
}

#[derive(Args, Debug)]
struct LastArgs {
    /// Number of rounds to show
    #[arg(short = 'n', long, default_value = "10")]
    count: usize,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Write CSV to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the resolved settings document
    Show,
    /// Print the resolved settings file path
    Path,
}

#[derive(Args, Debug)]
struct NotifyTestArgs {
    /// Message to send
    #[arg(long, default_value = "Round Tally notifier test")]
    message: String,
}

use rt_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap routes --help and --version through the error path too;
            // those print to stdout and exit clean.
            let code = if err.use_stderr() {
                ExitCode::ArgsError.as_i32()
            } else {
                ExitCode::Clean.as_i32()
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    let log_config = LogConfig::from_env(cli_level, cli.global.log_format);
    init_logging(&log_config);

    let exit_code = match &cli.command {
        Commands::Record(args) => run_record(&cli.global, args),
        Commands::Stats => run_stats(&cli.global),
        Commands::Runs => run_runs(&cli.global),
        Commands::Last(args) => run_last(&cli.global, args),
        Commands::Export(args) => run_export(&cli.global, args),
        Commands::Check => run_check(&cli.global),
        Commands::Config(args) => run_config(&cli.global, args),
        Commands::NotifyTest(args) => run_notify_test(&cli.global, args),
        Commands::Version => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

use rt_core::aggregate::AggregateSnapshot;
use rt_core::engine::{EngineOptions, StreakEngine};
use rt_core::events::{EventSink, JsonlSink, NullSink};
use rt_core::export::ledger_csv;
use rt_core::ledger::{JsonlLedger, LedgerStore};
use rt_core::segment::segment_runs;
use rt_core::state::{load_state, save_state, state_path_for};
use rt_core::summary::StatsReport;
use rt_notify::{LogNotifier, Notifier, NullNotifier};

// ============================================================================
// Command implementations
// ============================================================================

fn run_record(global: &GlobalOpts, args: &RecordArgs) -> ExitCode {
    let settings = match effective_settings(global) {
        Ok(s) => s,
        Err(e) => return output_settings_error(global, &e),
    };

    // Validation boundary: unknown text never reaches the store.
    let outcome = match Outcome::parse(&args.outcome) {
        Ok(o) => o,
        Err(e) => return output_error(global, &e),
    };

    let ledger_path = settings.ledger.effective_path();
    let store = match JsonlLedger::open(&ledger_path) {
        Ok(s) => Arc::new(s),
        Err(e) => return output_error(global, &e),
    };

    let state_path = state_path_for(&ledger_path);
    let alert_state = match load_state(&state_path) {
        Ok(s) => s,
        Err(e) => return output_error(global, &e),
    };

    let options = EngineOptions {
        threshold: settings.alert.threshold,
        notify_summary: settings.alert.notify_summary && !args.no_notify,
        alert_state,
    };
    let notifier = build_notifier(&settings, args.no_notify);
    let engine = match StreakEngine::new(store, notifier, event_sink(global), options) {
        Ok(e) => e,
        Err(e) => return output_error(global, &e),
    };

    let receipt = match engine.record(outcome) {
        Ok(r) => r,
        Err(e) => return output_error(global, &e),
    };

    // Persist arming state so the once-per-run guarantee survives one-shot
    // invocations, then wait for dispatched sends before exiting.
    let saved = save_state(&state_path, &engine.alert_state());
    engine.drain_notifications();
    if let Err(e) = saved {
        return output_error(global, &e);
    }

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&receipt).unwrap());
        }
        OutputFormat::Jsonl => {
            println!("{}", serde_json::to_string(&receipt).unwrap());
        }
        OutputFormat::Text => {
            println!(
                "Recorded {} as round {} (total {})",
                outcome.label(),
                receipt.seq,
                receipt.total
            );
            if let Some(alert) = &receipt.alert {
                println!("{}", alert.message());
            }
        }
    }

    if receipt.alert.is_some() {
        ExitCode::AlertFired
    } else {
        ExitCode::Clean
    }
}

fn run_stats(global: &GlobalOpts) -> ExitCode {
    let settings = match effective_settings(global) {
        Ok(s) => s,
        Err(e) => return output_settings_error(global, &e),
    };
    let rounds = match load_history(&settings) {
        Ok(r) => r,
        Err(e) => return output_error(global, &e),
    };

    let snapshot = AggregateSnapshot::compute(&rounds);
    let report = StatsReport::from_snapshot(&snapshot);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        OutputFormat::Jsonl => {
            println!("{}", serde_json::to_string(&report).unwrap());
        }
        OutputFormat::Text => {
            print!("{}", report.to_text());
        }
    }

    ExitCode::Clean
}

fn run_runs(global: &GlobalOpts) -> ExitCode {
    let settings = match effective_settings(global) {
        Ok(s) => s,
        Err(e) => return output_settings_error(global, &e),
    };
    let rounds = match load_history(&settings) {
        Ok(r) => r,
        Err(e) => return output_error(global, &e),
    };

    let runs = segment_runs(&rounds);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&runs).unwrap());
        }
        OutputFormat::Jsonl => {
            for run in &runs {
                println!("{}", serde_json::to_string(run).unwrap());
            }
        }
        OutputFormat::Text => {
            if runs.is_empty() {
                println!("Ledger is empty.");
            } else {
                println!("{:<8} {:>6} {:>6} {:>6}", "OUTCOME", "LENGTH", "START", "END");
                for run in &runs {
                    println!(
                        "{:<8} {:>6} {:>6} {:>6}",
                        run.outcome.label(),
                        run.length,
                        run.start_seq,
                        run.end_seq
                    );
                }
            }
        }
    }

    ExitCode::Clean
}

fn run_last(global: &GlobalOpts, args: &LastArgs) -> ExitCode {
    let settings = match effective_settings(global) {
        Ok(s) => s,
        Err(e) => return output_settings_error(global, &e),
    };
    let mut rounds = match load_history(&settings) {
        Ok(r) => r,
        Err(e) => return output_error(global, &e),
    };

    let keep = rounds.len().saturating_sub(args.count);
    let mut recent = rounds.split_off(keep);
    recent.reverse();

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&recent).unwrap());
        }
        OutputFormat::Jsonl => {
            for round in &recent {
                println!("{}", serde_json::to_string(round).unwrap());
            }
        }
        OutputFormat::Text => {
            if recent.is_empty() {
                println!("Ledger is empty.");
            } else {
                for round in &recent {
                    println!(
                        "{:>6}  {}  {}",
                        round.seq,
                        round
                            .recorded_at
                            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                        round.outcome.label()
                    );
                }
            }
        }
    }

    ExitCode::Clean
}

fn run_export(global: &GlobalOpts, args: &ExportArgs) -> ExitCode {
    let settings = match effective_settings(global) {
        Ok(s) => s,
        Err(e) => return output_settings_error(global, &e),
    };
    let rounds = match load_history(&settings) {
        Ok(r) => r,
        Err(e) => return output_error(global, &e),
    };

    let csv = ledger_csv(&rounds);

    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &csv) {
                return output_error(global, &Error::Io(e));
            }
            let receipt = serde_json::json!({
                "exported": rounds.len(),
                "path": path.display().to_string(),
            });
            match global.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&receipt).unwrap());
                }
                OutputFormat::Jsonl => {
                    println!("{}", serde_json::to_string(&receipt).unwrap());
                }
                OutputFormat::Text => {
                    println!("Exported {} rounds to {}", rounds.len(), path.display());
                }
            }
        }
        None => {
            print!("{}", csv);
        }
    }

    ExitCode::Clean
}

fn run_check(global: &GlobalOpts) -> ExitCode {
    let paths = resolve_settings(global.config.as_deref());
    let mut results: Vec<serde_json::Value> = Vec::new();
    let mut failure: Option<ExitCode> = None;

    // Settings: resolve, load, validate, with CLI overrides applied.
    let settings = match effective_settings(global) {
        Ok(settings) => {
            results.push(serde_json::json!({
                "check": "settings",
                "status": "ok",
                "source": paths.source.to_string(),
                "path": paths.settings.as_ref().map(|p| p.display().to_string()),
                "threshold": settings.alert.threshold,
                "notify_summary": settings.alert.notify_summary,
            }));
            Some(settings)
        }
        Err(e) => {
            failure = Some(settings_exit_code(&e));
            results.push(serde_json::json!({
                "check": "settings",
                "status": "error",
                "source": paths.source.to_string(),
                "error": e.to_string(),
            }));
            None
        }
    };

    // Ledger: a missing file is fine (created on first append); an existing
    // one must parse line by line with strictly increasing sequence ids.
    if let Some(settings) = &settings {
        let ledger_path = settings.ledger.effective_path();
        if ledger_path.exists() {
            match JsonlLedger::open(&ledger_path).and_then(|store| store.len()) {
                Ok(rounds) => {
                    results.push(serde_json::json!({
                        "check": "ledger",
                        "status": "ok",
                        "path": ledger_path.display().to_string(),
                        "rounds": rounds,
                    }));
                }
                Err(e) => {
                    failure = failure.or(Some(ExitCode::LedgerError));
                    results.push(serde_json::json!({
                        "check": "ledger",
                        "status": "error",
                        "path": ledger_path.display().to_string(),
                        "error": e.to_string(),
                    }));
                }
            }
        } else {
            results.push(serde_json::json!({
                "check": "ledger",
                "status": "info",
                "path": ledger_path.display().to_string(),
                "note": "file does not exist yet; it is created on first append",
            }));
        }

        let state_path = state_path_for(&ledger_path);
        if state_path.exists() {
            match load_state(&state_path) {
                Ok(state) => {
                    results.push(serde_json::json!({
                        "check": "alert_state",
                        "status": "ok",
                        "path": state_path.display().to_string(),
                        "armed_symbols": state.fired.len(),
                    }));
                }
                Err(e) => {
                    failure = failure.or(Some(ExitCode::LedgerError));
                    results.push(serde_json::json!({
                        "check": "alert_state",
                        "status": "error",
                        "path": state_path.display().to_string(),
                        "error": e.to_string(),
                    }));
                }
            }
        } else {
            results.push(serde_json::json!({
                "check": "alert_state",
                "status": "info",
                "path": state_path.display().to_string(),
                "note": "no state file; arming starts fresh",
            }));
        }
    }

    let all_ok = failure.is_none();
    let response = serde_json::json!({
        "status": if all_ok { "ok" } else { "error" },
        "checks": results,
    });

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response).unwrap());
        }
        OutputFormat::Jsonl => {
            println!("{}", serde_json::to_string(&response).unwrap());
        }
        OutputFormat::Text => {
            println!("# rt-core check");
            println!();
            for result in &results {
                let check = result.get("check").and_then(|v| v.as_str()).unwrap_or("?");
                let status = result.get("status").and_then(|v| v.as_str()).unwrap_or("?");
                let symbol = match status {
                    "ok" => "✓",
                    "info" => "ℹ",
                    _ => "✗",
                };
                println!("{} {}: {}", symbol, check, status);
                if let Some(path) = result.get("path").and_then(|v| v.as_str()) {
                    println!("  {}", path);
                }
                if let Some(note) = result.get("note").and_then(|v| v.as_str()) {
                    println!("  {}", note);
                }
                if let Some(error) = result.get("error").and_then(|v| v.as_str()) {
                    println!("  Error: {}", error);
                }
            }
        }
    }

    failure.unwrap_or(ExitCode::Clean)
}

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> ExitCode {
    match &args.command {
        ConfigCommands::Init { force } => run_config_init(global, *force),
        ConfigCommands::Show => run_config_show(global),
        ConfigCommands::Path => run_config_path(global),
    }
}

/// Write the default settings document, creating parent directories.
fn run_config_init(global: &GlobalOpts, force: bool) -> ExitCode {
    let target = match &global.config {
        Some(path) => path.clone(),
        None => match rt_config::resolve::xdg_config_dir() {
            Some(dir) => dir.join("config.json"),
            None => {
                let err = Error::Config(
                    "could not determine the user config directory; pass --config".to_string(),
                );
                return output_error(global, &err);
            }
        },
    };

    if target.exists() && !force {
        let err = Error::Config(format!(
            "{} already exists; pass --force to overwrite",
            target.display()
        ));
        return output_error(global, &err);
    }

    if let Some(parent) = target.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return output_error(global, &Error::Io(e));
        }
    }
    let document = format!("{}\n", Settings::default().to_json_pretty());
    if let Err(e) = std::fs::write(&target, document) {
        return output_error(global, &Error::Io(e));
    }

    let receipt = serde_json::json!({
        "written": target.display().to_string(),
        "schema_version": CONFIG_SCHEMA_VERSION,
    });
    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&receipt).unwrap());
        }
        OutputFormat::Jsonl => {
            println!("{}", serde_json::to_string(&receipt).unwrap());
        }
        OutputFormat::Text => {
            println!("Wrote default settings to {}", target.display());
        }
    }

    ExitCode::Clean
}

/// Show the resolved settings document and where it came from.
fn run_config_show(global: &GlobalOpts) -> ExitCode {
    let paths = resolve_settings(global.config.as_deref());
    let settings = match effective_settings(global) {
        Ok(s) => s,
        Err(e) => return output_settings_error(global, &e),
    };

    let response = serde_json::json!({
        "source": paths.source.to_string(),
        "path": paths.settings.as_ref().map(|p| p.display().to_string()),
        "settings": &settings,
    });
    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response).unwrap());
        }
        OutputFormat::Jsonl => {
            println!("{}", serde_json::to_string(&response).unwrap());
        }
        OutputFormat::Text => {
            match &paths.settings {
                Some(path) => println!("Source: {} ({})", paths.source, path.display()),
                None => println!("Source: {}", paths.source),
            }
            println!("{}", settings.to_json_pretty());
        }
    }

    ExitCode::Clean
}

/// Print the resolved settings file path.
fn run_config_path(global: &GlobalOpts) -> ExitCode {
    let paths = resolve_settings(global.config.as_deref());

    let response = serde_json::json!({
        "source": paths.source.to_string(),
        "path": paths.settings.as_ref().map(|p| p.display().to_string()),
    });
    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response).unwrap());
        }
        OutputFormat::Jsonl => {
            println!("{}", serde_json::to_string(&response).unwrap());
        }
        OutputFormat::Text => match &paths.settings {
            Some(path) => println!("{}", path.display()),
            None => println!("(builtin defaults)"),
        },
    }

    ExitCode::Clean
}

/// One send through the configured notifier; the exit code reflects the
/// delivery boolean.
fn run_notify_test(global: &GlobalOpts, args: &NotifyTestArgs) -> ExitCode {
    let settings = match effective_settings(global) {
        Ok(s) => s,
        Err(e) => return output_settings_error(global, &e),
    };

    let notifier = build_notifier(&settings, false);
    let delivered = notifier.send(&args.message);

    let response = serde_json::json!({
        "channel": notifier.name(),
        "delivered": delivered,
    });
    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response).unwrap());
        }
        OutputFormat::Jsonl => {
            println!("{}", serde_json::to_string(&response).unwrap());
        }
        OutputFormat::Text => {
            if delivered {
                println!("Delivered via {}", notifier.name());
            } else {
                println!("Delivery via {} failed", notifier.name());
            }
        }
    }

    if delivered {
        ExitCode::Clean
    } else {
        ExitCode::IoError
    }
}

fn print_version(global: &GlobalOpts) {
    let version_info = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "config_schema": CONFIG_SCHEMA_VERSION,
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&version_info).unwrap());
        }
        OutputFormat::Jsonl => {
            println!("{}", serde_json::to_string(&version_info).unwrap());
        }
        OutputFormat::Text => {
            println!("rt-core {}", env!("CARGO_PKG_VERSION"));
            println!("config schema: {}", CONFIG_SCHEMA_VERSION);
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Load and validate settings with the CLI overrides folded in, so every
/// command reads one effective document.
fn effective_settings(global: &GlobalOpts) -> Result<Settings, ValidationError> {
    let (mut settings, _paths) = load_settings(global.config.as_deref())?;
    if let Some(threshold) = global.threshold {
        settings.alert.threshold = threshold;
    }
    if let Some(path) = &global.ledger {
        settings.ledger.path = Some(path.clone());
    }
    validate_settings(&settings)?;
    Ok(settings)
}

/// Open the configured ledger and read the full history in order.
fn load_history(settings: &Settings) -> rt_common::Result<Vec<Round>> {
    let store = JsonlLedger::open(settings.ledger.effective_path())?;
    store.read_all()
}

/// The notifier the settings ask for: webhook when configured and compiled
/// in, the log transport otherwise, the null transport when suppressed.
fn build_notifier(settings: &Settings, suppressed: bool) -> Arc<dyn Notifier> {
    if suppressed {
        return Arc::new(NullNotifier);
    }

    #[cfg(feature = "webhook")]
    if let Some(url) = &settings.notify.webhook_url {
        match rt_notify::WebhookNotifier::new(url.clone(), settings.notify.timeout_secs) {
            Ok(notifier) => return Arc::new(notifier),
            Err(e) => {
                tracing::warn!(error = %e, "webhook notifier unavailable, using log transport");
            }
        }
    }

    #[cfg(not(feature = "webhook"))]
    if settings.notify.webhook_url.is_some() {
        tracing::warn!("webhook_url is set but this build has no webhook support");
    }

    Arc::new(LogNotifier)
}

/// Engine events stream to stderr when the caller asked for jsonl output.
fn event_sink(global: &GlobalOpts) -> Arc<dyn EventSink> {
    match global.format {
        OutputFormat::Jsonl => Arc::new(JsonlSink::stderr()),
        _ => Arc::new(NullSink),
    }
}

/// Print an error in the selected format and map it to an exit code.
fn output_error(global: &GlobalOpts, error: &Error) -> ExitCode {
    match global.format {
        OutputFormat::Json => {
            eprintln!("{}", StructuredError::from(error).to_json_pretty());
        }
        OutputFormat::Jsonl => {
            eprintln!("{}", StructuredError::from(error).to_json());
        }
        OutputFormat::Text => {
            eprintln!(
                "{}",
                format_error_human(error, std::io::stderr().is_terminal())
            );
        }
    }

    match error.category() {
        ErrorCategory::Config | ErrorCategory::Notify => ExitCode::ConfigError,
        ErrorCategory::Validation => ExitCode::ValidationError,
        ErrorCategory::Ledger => ExitCode::LedgerError,
        ErrorCategory::Io => ExitCode::IoError,
        ErrorCategory::Internal => ExitCode::InternalError,
    }
}

/// Print a settings error in the selected format and map it to an exit code.
fn output_settings_error(global: &GlobalOpts, error: &ValidationError) -> ExitCode {
    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            let response = serde_json::json!({
                "status": "error",
                "error": {
                    "code": error.code(),
                    "message": error.to_string(),
                }
            });
            eprintln!("{}", serde_json::to_string(&response).unwrap());
        }
        OutputFormat::Text => {
            eprintln!("✗ Configuration Error");
            eprintln!("  Reason: {}", error);
        }
    }

    settings_exit_code(error)
}

fn settings_exit_code(error: &ValidationError) -> ExitCode {
    match error {
        ValidationError::IoError(_)
        | ValidationError::ParseError(_)
        | ValidationError::VersionMismatch { .. } => ExitCode::ConfigError,
        ValidationError::SemanticError(_) | ValidationError::InvalidValue { .. } => {
            ExitCode::ValidationError
        }
    }
}
