use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use multi_smackdown::achievements::{get_log_path, load_log, save_log};
use multi_smackdown::autosave::{clear_draft, get_draft_path, load_draft, spawn_draft_saver};
use multi_smackdown::config::{load_config, validate_config, Config};
use multi_smackdown::events::{events_for, EventSpec};
use multi_smackdown::output;
use multi_smackdown::performance::{get_store_path, load_store, save_store, Performance, ScoreSheet};
use multi_smackdown::prompt::{self, Entry};
use multi_smackdown::scoring::{
    load_scoring_table, missing_formulas, validate_table, Event, EventType, ResultKind, ScoringEngine, ScoringTable,
};
use multi_smackdown::units::UnitSystem;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NOT_FOUND: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_INPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single result
    Score {
        /// decathlon, heptathlon or pentathlon
        event_type: String,
        /// Event name, e.g. "100m" or "Long Jump"
        event: String,
        /// Time ("10.45", "2:10.50") or distance/height
        result: String,
    },
    /// Show the result worth a number of points
    Estimate {
        event_type: String,
        event: String,
        points: u32,
    },
    /// List the events of a competition
    Events {
        #[arg(value_parser = parse_event_type)]
        event_type: EventType,
    },
    /// Score and save a performance in one go
    Record {
        #[arg(value_parser = parse_event_type)]
        event_type: EventType,
        /// Label shown in the history
        #[arg(short, long)]
        label: Option<String>,
        /// Results as EVENT=RESULT, e.g. "100m=10.45" "Long Jump=7.50"
        #[arg(required = true, value_name = "EVENT=RESULT")]
        results: Vec<String>,
    },
    /// Enter a performance event by event, with draft autosave
    Enter {
        #[arg(value_parser = parse_event_type)]
        event_type: EventType,
        #[arg(short, long)]
        label: Option<String>,
    },
    /// List saved performances, newest first
    List {
        /// Only show one competition type
        #[arg(short = 't', long = "type", value_parser = parse_event_type)]
        event_type: Option<EventType>,
    },
    /// Show a saved performance
    Show { id: u64 },
    /// Change results of a saved performance
    Edit {
        id: u64,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(value_name = "EVENT=RESULT")]
        results: Vec<String>,
    },
    /// Delete a saved performance
    Delete { id: u64 },
    /// List unlocked achievements
    Achievements,
}

#[derive(Parser, Debug)]
#[command(name = "multi-smackdown")]
#[command(about = "Decathlon, heptathlon and pentathlon score calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/multi-smackdown/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the configured units for distances and heights
    #[arg(short, long, global = true, value_enum)]
    units: Option<UnitSystem>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_event_type(s: &str) -> Result<EventType, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Everything a command needs, resolved once at startup
struct App {
    engine: ScoringEngine,
    units: UnitSystem,
    data_dir: PathBuf,
    config: Config,
    use_colors: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "multi_smackdown=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Build the scoring table once; it is read-only from here on
    let table = match config.scoring_table_path() {
        Some(path) => match load_scoring_table(&path) {
            Ok(t) => {
                tracing::debug!(path = %path.display(), "using custom scoring table");
                t
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
        None => ScoringTable::world_athletics(),
    };

    if let Err(errors) = validate_table(&table) {
        eprintln!("Scoring table errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    for path in missing_formulas(&table) {
        tracing::warn!("{}: no formula, results in this event will score 0", path);
    }

    let ctx = App {
        engine: ScoringEngine::new(table),
        units: cli.units.unwrap_or(config.units),
        data_dir: config.data_dir(),
        use_colors: output::should_use_colors(),
        config,
    };
    tracing::debug!(data_dir = %ctx.data_dir.display(), units = ?ctx.units, "ready");

    let outcome = match cli.command {
        Commands::Score {
            event_type,
            event,
            result,
        } => cmd_score(&ctx, &event_type, &event, &result),
        Commands::Estimate {
            event_type,
            event,
            points,
        } => cmd_estimate(&ctx, &event_type, &event, points),
        Commands::Events { event_type } => cmd_events(&ctx, event_type),
        Commands::Record {
            event_type,
            label,
            results,
        } => cmd_record(&ctx, event_type, label, &results),
        Commands::Enter { event_type, label } => cmd_enter(&ctx, event_type, label).await,
        Commands::List { event_type } => cmd_list(&ctx, event_type),
        Commands::Show { id } => cmd_show(&ctx, id),
        Commands::Edit { id, label, results } => cmd_edit(&ctx, id, label, &results),
        Commands::Delete { id } => cmd_delete(&ctx, id),
        Commands::Achievements => cmd_achievements(&ctx),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_STORAGE);
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Kind of an event name, defaulting to measurement for names the engine
/// will not recognise anyway
fn kind_of(event: &str) -> ResultKind {
    event
        .parse::<Event>()
        .map(|e| e.kind())
        .unwrap_or(ResultKind::Measurement)
}

/// Log why a lookup would miss, since the engine itself just returns zero
fn warn_if_unknown(ctx: &App, event_type: &str, event: &str) {
    let known = match (event_type.parse::<EventType>(), event.parse::<Event>()) {
        (Ok(t), Ok(e)) => ctx.engine.table().lookup(t, e).is_some(),
        _ => false,
    };
    if !known {
        tracing::warn!("no scoring formula for '{}' in '{}'", event, event_type);
    }
}

fn cmd_score(ctx: &App, event_type: &str, event: &str, result: &str) -> Result<()> {
    warn_if_unknown(ctx, event_type, event);

    let kind = kind_of(event);
    let raw = match kind {
        ResultKind::Time => result.to_string(),
        ResultKind::Measurement => ctx.units.measurement_to_metric(result),
    };
    let points = ctx.engine.calculate_points(event_type, event, &raw, kind);
    println!("{}", points);
    Ok(())
}

fn cmd_estimate(ctx: &App, event_type: &str, event: &str, points: u32) -> Result<()> {
    warn_if_unknown(ctx, event_type, event);

    let kind = kind_of(event);
    let estimate = ctx.engine.estimate_result(event_type, event, points, kind);
    let shown = match kind {
        ResultKind::Time => estimate,
        ResultKind::Measurement => ctx.units.measurement_from_metric(&estimate),
    };
    println!("{}", shown);
    Ok(())
}

/// Input hint in the display unit
fn placeholder(spec: &EventSpec, units: UnitSystem) -> String {
    match spec.kind() {
        ResultKind::Time => spec.placeholder.to_string(),
        ResultKind::Measurement => units.measurement_from_metric(spec.placeholder),
    }
}

fn cmd_events(ctx: &App, event_type: EventType) -> Result<()> {
    for spec in events_for(event_type) {
        let day = spec.day.map(|d| format!("day {}", d)).unwrap_or_default();
        println!(
            "{:<14}{:<9}e.g. {:<10}{}",
            spec.name(),
            spec.display_unit(ctx.units),
            placeholder(spec, ctx.units),
            day
        );
    }
    Ok(())
}

/// Apply "EVENT=RESULT" arguments to a sheet, exiting on malformed input
fn apply_results(ctx: &App, sheet: &mut ScoreSheet, results: &[String]) {
    for arg in results {
        let Some((name, raw)) = arg.split_once('=') else {
            eprintln!("Invalid result '{}': expected EVENT=RESULT", arg);
            std::process::exit(EXIT_INPUT);
        };
        match sheet.set_result_by_name(name, raw.trim(), &ctx.engine, ctx.units) {
            Ok(0) => eprintln!("Warning: '{}' scores 0 points in {}", raw.trim(), name.trim()),
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
    }
}

/// Save a finished sheet, check achievements, print the outcome
fn save_sheet(ctx: &App, sheet: ScoreSheet) -> Result<Performance> {
    let new = match sheet.into_new_performance() {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let store_path = get_store_path(&ctx.data_dir);
    let mut store = load_store(&store_path)?;
    let performance = store.create(new);
    save_store(&store_path, &store)?;
    tracing::info!(id = performance.id, total = performance.total_score, "performance saved");

    let log_path = get_log_path(&ctx.data_dir);
    let mut log = load_log(&log_path)?;
    let unlocked = log.check_and_unlock(&store.history(), Some(&performance));
    if !unlocked.is_empty() {
        save_log(&log_path, &log)?;
    }

    println!("{}", output::format_performance_detail(&performance, ctx.use_colors));
    if !unlocked.is_empty() {
        println!();
        println!("{}", output::format_unlocked(&unlocked, ctx.use_colors));
    }

    Ok(performance)
}

fn cmd_record(
    ctx: &App,
    event_type: EventType,
    label: Option<String>,
    results: &[String],
) -> Result<()> {
    let mut sheet = ScoreSheet::new(event_type, ctx.units);
    sheet.label = label;
    apply_results(ctx, &mut sheet, results);
    save_sheet(ctx, sheet)?;
    Ok(())
}

/// Yes/no question on the terminal
fn ask(question: &str, default_yes: bool) -> Result<bool> {
    prompt::confirm(&mut std::io::stdin().lock(), &mut std::io::stdout(), question, default_yes)
}

async fn cmd_enter(ctx: &App, event_type: EventType, label: Option<String>) -> Result<()> {
    let draft_path = get_draft_path(&ctx.data_dir);

    let mut sheet = match load_draft(&draft_path) {
        Some(draft)
            if draft.event_type == event_type
                && ask(
                    &format!("Resume draft with {} results entered?", draft.completed()),
                    true,
                )? =>
        {
            draft
        }
        _ => ScoreSheet::new(event_type, ctx.units),
    };
    if label.is_some() {
        sheet.label = label;
    }

    println!(
        "{}: press Enter to keep a value, type p<points> (e.g. p950) to enter points instead.",
        event_type.title()
    );

    let saver = spawn_draft_saver(draft_path.clone(), ctx.config.autosave_delay());

    for index in 0..sheet.results.len() {
        let entry = &sheet.results[index];
        let spec = events_for(event_type)[index];
        let current = if entry.result.is_empty() {
            format!("e.g. {}", placeholder(&spec, ctx.units))
        } else {
            format!("{} {}", entry.result, entry.unit)
        };
        let answer = prompt::prompt_entry(
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
            spec.name(),
            spec.display_unit(ctx.units),
            &current,
        )?;

        let points = match answer {
            Entry::Keep => continue,
            Entry::BadPoints(text) => {
                eprintln!("  Not a points value: {}", text);
                continue;
            }
            Entry::Points(points) => {
                let result = sheet
                    .set_points(index, points, &ctx.engine, ctx.units)
                    .unwrap_or_default()
                    .to_string();
                println!("  ~ {}", if result.is_empty() { "-" } else { result.as_str() });
                points
            }
            Entry::Result(raw) => sheet
                .set_result(index, &raw, &ctx.engine, ctx.units)
                .unwrap_or(0),
        };

        println!(
            "  {} points, total {}",
            points,
            output::format_points(sheet.total())
        );
        saver.update(sheet.clone());
    }

    println!();
    println!("{}", output::format_sheet(&sheet, ctx.use_colors));

    let writes = saver.finish().await?;
    tracing::debug!(writes, "draft autosave finished");

    if sheet.is_empty() {
        println!("Nothing to save; draft kept at {}", draft_path.display());
        return Ok(());
    }

    if !ask("Save this performance?", true)? {
        println!("Draft kept at {}", draft_path.display());
        return Ok(());
    }

    save_sheet(ctx, sheet)?;
    clear_draft(&draft_path)?;
    Ok(())
}

fn cmd_list(ctx: &App, event_type: Option<EventType>) -> Result<()> {
    let store = load_store(&get_store_path(&ctx.data_dir))?;
    let listed = store.list(event_type);
    println!("{}", output::format_performance_table(&listed, ctx.use_colors));
    Ok(())
}

fn cmd_show(ctx: &App, id: u64) -> Result<()> {
    let store = load_store(&get_store_path(&ctx.data_dir))?;
    match store.get(id) {
        Some(p) => {
            println!("{}", output::format_performance_detail(p, ctx.use_colors));
            Ok(())
        }
        None => {
            eprintln!("No performance with id {}", id);
            std::process::exit(EXIT_NOT_FOUND);
        }
    }
}

fn cmd_edit(ctx: &App, id: u64, label: Option<String>, results: &[String]) -> Result<()> {
    let store_path = get_store_path(&ctx.data_dir);
    let mut store = load_store(&store_path)?;

    let Some(existing) = store.get(id) else {
        eprintln!("No performance with id {}", id);
        std::process::exit(EXIT_NOT_FOUND);
    };

    let mut sheet = ScoreSheet::from_performance(existing);
    if label.is_some() {
        sheet.label = label;
    }
    apply_results(ctx, &mut sheet, results);

    let new = match sheet.into_new_performance() {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    match store.update(id, new) {
        Some(updated) => {
            save_store(&store_path, &store)?;
            tracing::info!(id, total = updated.total_score, "performance updated");
            println!("{}", output::format_performance_detail(&updated, ctx.use_colors));
            Ok(())
        }
        None => {
            eprintln!("No performance with id {}", id);
            std::process::exit(EXIT_NOT_FOUND);
        }
    }
}

fn cmd_delete(ctx: &App, id: u64) -> Result<()> {
    let store_path = get_store_path(&ctx.data_dir);
    let mut store = load_store(&store_path)?;

    if !store.delete(id) {
        eprintln!("No performance with id {}", id);
        std::process::exit(EXIT_NOT_FOUND);
    }

    save_store(&store_path, &store)?;
    tracing::info!(id, "performance deleted");
    println!("Deleted performance #{}", id);
    Ok(())
}

fn cmd_achievements(ctx: &App) -> Result<()> {
    let log = load_log(&get_log_path(&ctx.data_dir))?;
    println!("{}", output::format_achievements(&log, ctx.use_colors));
    Ok(())
}
