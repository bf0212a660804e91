//! Innerverse CLI
//!
//! Usage:
//!   innerverse --text "your text here"      # Single entry
//!   innerverse --interactive                # Journal session
//!   innerverse --serve                      # HTTP API server
//!   innerverse --text "text" --json         # JSON output
//!   innerverse --history                    # Recent entries and trend
//!   innerverse --gad7 0,1,2,1,0,0,1         # Score a screening
//!   innerverse --phq9                       # Answer a screening item by item

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use innerverse::config::EngineConfig;
use innerverse::core::screening::{self, ANSWER_SCALE};
use innerverse::core::{run_server, AffectEngine};
use innerverse::types::{
    AtmosphereState, CopingSkill, CrisisReport, Instrument, ProcessOutcome, SafetyAlert,
    ScreeningResult, TurnReport,
};
use innerverse::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "innerverse",
    version = VERSION,
    about = "Innerverse - turn journal text into weather, heat and a safety check",
    long_about = "Innerverse reads a journal entry, checks it for crisis risk first,\n\
                  then classifies intent, intensity and mood into an atmosphere.\n\n\
                  Modes:\n  \
                  --interactive  Journal session (default)\n  \
                  --serve        HTTP API server mode\n\n\
                  Atmospheres:\n  \
                  RADIANT_SUN, CLEAR_SKIES, FOGGY_MIST, STEADY_RAIN, THUNDERSTORM\n  \
                  CRISIS is shown with support resources whenever risk is detected"
)]
struct Args {
    /// Text to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive journal mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show rule breakdown
    #[arg(long)]
    verbose: bool,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reset heat to 0.0
    #[arg(long)]
    reset: bool,

    /// Show recent history and trend
    #[arg(long)]
    history: bool,

    /// Clear history (a backup is kept)
    #[arg(long)]
    clear_history: bool,

    /// Score a GAD-7 from 7 comma-separated answers (0-3); asks each item when empty
    #[arg(long, value_name = "ANSWERS", num_args = 0..=1, default_missing_value = "")]
    gad7: Option<String>,

    /// Score a PHQ-9 from 9 comma-separated answers (0-3); asks each item when empty
    #[arg(long, value_name = "ANSWERS", num_args = 0..=1, default_missing_value = "")]
    phq9: Option<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "innerverse=debug" } else { "innerverse=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = match EngineConfig::load_layered(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(2);
        }
    };
    if let Some(ref addr) = args.addr {
        config.addr = addr.clone();
    }

    if let Some(ref answers) = args.gad7 {
        run_screening(Instrument::Gad7, answers, &args);
    } else if let Some(ref answers) = args.phq9 {
        run_screening(Instrument::Phq9, answers, &args);
    } else if args.serve {
        run_serve(&config).await;
    } else if args.reset {
        run_reset(&config);
    } else if args.clear_history {
        run_clear_history(&config);
    } else if args.history {
        run_history(&config, &args);
    } else if let Some(ref text) = args.text {
        run_single(text, &config, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&config, &args);
    }
}

/// Run single text evaluation
fn run_single(text: &str, config: &EngineConfig, args: &Args) {
    let engine = AffectEngine::from_config(config);
    let outcome = engine.process(text);
    print_outcome(&outcome, args);
}

/// Run interactive journal mode
fn run_interactive(config: &EngineConfig, args: &Args) {
    let engine = AffectEngine::from_config(config);

    print_header("Journal", args.no_color);
    println!("Write what's on your mind and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut turns = 0usize;

    loop {
        print!("{}", format_prompt(engine.heat(), args.no_color));
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Entries: {}", turns);
            break;
        }
        if line.is_empty() {
            continue;
        }

        let outcome = engine.process(line);
        turns += 1;
        print_outcome(&outcome, args);
    }
}

/// Run HTTP API server
async fn run_serve(config: &EngineConfig) {
    println!();
    println!("{}", "════════════════════════════════════════════".bold());
    println!("  🏠 Innerverse API Server  v{}", VERSION);
    println!("{}", "════════════════════════════════════════════".bold());
    println!();

    if let Err(e) = run_server(config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

fn run_reset(config: &EngineConfig) {
    let engine = AffectEngine::from_config(config);
    match engine.reset() {
        None => println!("House reset successfully. heat=0.00"),
        Some(w) => println!("House reset in memory only: {}", w),
    }
}

fn run_clear_history(config: &EngineConfig) {
    let engine = AffectEngine::from_config(config);
    match engine.clear_history() {
        Ok(Some(backup)) => println!("History cleared. Backup saved to {}", backup.display()),
        Ok(None) => println!("History cleared."),
        Err(e) => {
            eprintln!("Could not clear history: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_history(config: &EngineConfig, args: &Args) {
    let engine = AffectEngine::from_config(config);
    let (entries, summary) = match (engine.history(10), engine.history_summary()) {
        (Ok(e), Ok(s)) => (e, s),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Could not read history: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        let body = serde_json::json!({ "entries": entries, "summary": summary });
        println!("{}", body);
        return;
    }

    print_header("History", args.no_color);
    if entries.is_empty() {
        println!("No entries yet.");
        return;
    }
    for entry in &entries {
        let line = format!(
            "{}  {} {:<13} score={:+.2}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.atmosphere.emoji(),
            entry.atmosphere.as_str(),
            entry.score
        );
        println!("{}", paint(&line, entry.atmosphere, args.no_color));
        if let Some(ref snippet) = entry.snippet {
            println!("    {}", snippet.dimmed());
        }
    }
    println!();
    println!("Total entries: {}", summary.total_entries);
    let pattern: Vec<String> = summary
        .pattern
        .iter()
        .map(|p| format!("{} x{}", p.atmosphere, p.count))
        .collect();
    println!("Last 7: {}", pattern.join(", "));
    if let (Some(avg), Some(trend)) = (summary.average_score, summary.trend) {
        println!("Average score: {:+.2} ({})", avg, trend.description());
    }
}

fn run_screening(instrument: Instrument, raw: &str, args: &Args) {
    let answers = if raw.trim().is_empty() {
        ask_answers(instrument)
    } else {
        parse_answers(raw)
    };
    let answers = match answers {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    if !args.json {
        print_items(instrument, &answers);
    }
    match screening::score(instrument, &answers) {
        Ok(result) if args.json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Could not serialize result: {}", e),
        },
        Ok(result) => print_screening(&result),
        Err(e) => {
            eprintln!("{}: {}", instrument, e);
            eprintln!("Answer scale: {}", scale_help());
            std::process::exit(2);
        }
    }
}

/// Show each item and read one 0-3 answer per line
fn ask_answers(instrument: Instrument) -> Result<Vec<u8>, String> {
    println!("{}", format!("{} check-in", instrument).bold());
    println!("Over the last 2 weeks, how often have you been bothered by the following?");
    println!("({})", scale_help());
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answers = Vec::with_capacity(instrument.item_count());
    for (i, item) in screening::items(instrument).iter().enumerate() {
        loop {
            print!("{}. {}: ", i + 1, item);
            io::stdout().flush().map_err(|e| e.to_string())?;
            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(e.to_string()),
                None => return Err("Screening cancelled".to_string()),
            };
            match line.trim().parse::<u8>() {
                Ok(value) if value <= 3 => {
                    answers.push(value);
                    break;
                }
                _ => println!("  Please enter a number from 0 to 3."),
            }
        }
    }
    Ok(answers)
}

/// Item wording next to the answer given for it
fn print_items(instrument: Instrument, answers: &[u8]) {
    for (i, item) in screening::items(instrument).iter().enumerate() {
        let answer = answers
            .get(i)
            .and_then(|&a| ANSWER_SCALE.get(a as usize).map(|label| (a, label)));
        match answer {
            Some((a, label)) => println!("  {}. {} → {} ({})", i + 1, item, a, label),
            None => println!("  {}. {} → -", i + 1, item),
        }
    }
}

/// "0,1,2" → [0, 1, 2]
fn parse_answers(raw: &str) -> Result<Vec<u8>, String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .map_err(|_| format!("Invalid answer '{}': expected a number 0-3", s))
        })
        .collect()
}

fn scale_help() -> String {
    ANSWER_SCALE
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{} = {}", i, label))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_outcome(outcome: &ProcessOutcome, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Could not serialize result: {}", e),
        }
        return;
    }

    match outcome {
        ProcessOutcome::Crisis(report) => {
            print_crisis(report, args.no_color);
            if args.verbose {
                if let (Some(rule), Some(verdict)) = (outcome.rule(), report.verdict.as_ref()) {
                    println!("rule   = {}", rule);
                    println!("crisis = {} (threshold {})", verdict.score, innerverse::CRISIS_THRESHOLD);
                }
            }
        }
        ProcessOutcome::Empty(report) if args.verbose => print_verbose(report, args.no_color),
        ProcessOutcome::Empty(_) => {
            println!("{}", outcome.to_parseable_string());
        }
        ProcessOutcome::Analyzed(report) => {
            if args.verbose {
                print_verbose(report, args.no_color);
            } else if args.no_color {
                println!("{}", outcome.to_parseable_string());
            } else {
                println!("{}", outcome.to_terminal_string());
            }
            print_companion(report, args.no_color);
        }
    }
}

fn print_crisis(report: &CrisisReport, no_color: bool) {
    let banner = "!".repeat(60);
    println!();
    println!("{}", paint(&banner, AtmosphereState::Crisis, no_color));
    println!("{}", report.message.bold());
    println!("{}", paint(&banner, AtmosphereState::Crisis, no_color));
    println!();
    println!("24/7 free and confidential support:");
    for resource in &report.resources {
        println!("  • {}: {}", resource.label, resource.contact.bold());
    }
    println!();
}

fn print_companion(report: &TurnReport, no_color: bool) {
    println!("  {}", paint(report.atmosphere.scene(), report.atmosphere, no_color));
    if let Some(ref line) = report.companion {
        println!("  {} {}", "Companion:".bold(), line);
    }
    if let Some(skill) = report.coping_skill {
        print_skill(skill);
    }
    if report.suggest_screening {
        println!();
        println!(
            "  {} The last few entries have felt heavy. A short check-in may help:",
            "💡".yellow()
        );
        println!("     innerverse --phq9   or   innerverse --gad7");
    }
    for warning in &report.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
}

fn print_skill(skill: CopingSkill) {
    println!();
    println!("  {} {}", "Try this:".bold(), skill.title());
    for step in skill.steps() {
        match skill {
            CopingSkill::BoxBreathing => println!("    - {} ({}s)", step.prompt, step.count),
            CopingSkill::Grounding => println!("    - {}", step.prompt),
        }
    }
    println!("  {}", skill.closing().italic());
}

fn print_verbose(report: &TurnReport, no_color: bool) {
    let lines = match report.trace {
        Some(ref t) => vec![
            format!("score     = {:+.2}  (polarity after amplification)", report.score),
            format!("intent    = {}", report.intent.map(|i| i.as_str()).unwrap_or("NONE")),
            format!("intensity = {:.1}", t.intensity),
            format!("crisis    = {} (threshold {})", t.crisis_score, innerverse::CRISIS_THRESHOLD),
            format!("rule      = {}", t.rule),
            format!(
                "heat      = {:.2}  ({})",
                report.heat_level,
                t.thermal_rule.map(|r| r.code()).unwrap_or("-")
            ),
            format!("weather   = {} {}", report.atmosphere.emoji(), report.atmosphere),
        ],
        None => vec![format!("weather   = {}", report.atmosphere)],
    };
    println!("{}", paint("┌──────────────────────────────────────────", report.atmosphere, no_color));
    for line in lines {
        println!("{} {}", paint("│", report.atmosphere, no_color), line);
    }
    println!("{}", paint("└──────────────────────────────────────────", report.atmosphere, no_color));
}

fn print_screening(result: &ScreeningResult) {
    println!();
    println!("{}", "=".repeat(60));
    println!("Your {} Score: {} out of {}", result.instrument, result.score, result.max_score);
    println!("Result: {}", result.severity.bold());
    println!();
    println!("{}", result.interpretation);
    match result.alert {
        Some(SafetyAlert::Critical) => {
            println!();
            println!("{}", "🚨 CRITICAL SAFETY ALERT".red().bold());
            println!("You indicated thoughts of being better off dead or hurting yourself.");
        }
        Some(SafetyAlert::Recommendation) => {
            println!();
            println!("{}", "💡 RECOMMENDATION".yellow().bold());
            println!("Please follow up with a healthcare provider.");
        }
        None => {}
    }
    if result.urgent {
        println!("{}", "URGENT: severe score".red().bold());
    }
    for resource in &result.resources {
        println!("  • {}", resource);
    }
    println!("{}", "=".repeat(60));
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    let rule = "════════════════════════════════════════";
    if no_color {
        println!("{}", "=".repeat(40));
        println!("  Innerverse v{} - {}", VERSION, mode);
        println!("{}", "=".repeat(40));
    } else {
        println!("{}", rule.bold());
        println!("{}", format!("  Innerverse v{} - {}", VERSION, mode).bold());
        println!("{}", rule.bold());
    }
    println!();
}

/// Prompt shows current heat
fn format_prompt(heat: f64, no_color: bool) -> String {
    let label = format!("[heat {:.2}] > ", heat);
    if no_color {
        label
    } else if heat >= 0.7 {
        label.red().to_string()
    } else if heat >= 0.3 {
        label.yellow().to_string()
    } else {
        label.cyan().to_string()
    }
}

/// Wrap text in the atmosphere's ANSI color
fn paint(text: &str, state: AtmosphereState, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        format!("{}{}{}", state.color_code(), text, AtmosphereState::color_reset())
    }
}
