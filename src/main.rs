//! vstate CLI
//!
//! Usage:
//!   vstate                                      # Full analysis of ./data
//!   vstate --data-dir study/data --out-dir out  # Custom locations
//!   vstate --transcript control_01.txt          # Segment one transcript
//!   vstate --prompt "..." --reply "..."         # Classify one exchange
//!   vstate --json                               # JSON output

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use vstate::core::{
    analyze, load_corpus, parse_transcript_file, write_outputs, Analysis, AnalysisConfig,
    PromptClassifier, ResponseClassifier,
};
use vstate::types::{ConditionComparison, ConditionTally, RateLimitPolicy, ResponseClass};
use vstate::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "vstate",
    version = VERSION,
    about = "Violation State - segment transcripts, classify outcomes, compare arms",
    long_about = "vstate reads control and contaminated chat transcripts, pairs each\n\
                  user request with the reply that follows it, classifies the reply\n\
                  and resolves one final outcome per thread and image prompt.\n\n\
                  Modes:\n  \
                  (default)       Full analysis of --data-dir\n  \
                  --transcript    Segment one transcript file\n  \
                  --prompt/reply  Classify one exchange\n\n\
                  Layout:\n  \
                  <data-dir>/transcripts/control/*.txt\n  \
                  <data-dir>/transcripts/contaminated/*.txt"
)]
struct Args {
    /// Data directory holding transcripts/
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Output directory (default: <data-dir>/processed)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Segment a single transcript and print its turns
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// User text to classify (with --reply)
    #[arg(short, long, requires = "reply")]
    prompt: Option<String>,

    /// Assistant text to classify (with --prompt)
    #[arg(short, long, requires = "prompt")]
    reply: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show matched rule codes and debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Do not write output files
    #[arg(long)]
    no_write: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let (Some(prompt), Some(reply)) = (&args.prompt, &args.reply) {
        run_classify(prompt, reply, &args)
    } else if let Some(ref path) = args.transcript {
        run_transcript(path, &args)
    } else {
        run_analysis(&args)
    }
}

/// Classify one exchange
fn run_classify(prompt: &str, reply: &str, args: &Args) -> Result<()> {
    let prompts = PromptClassifier::new();
    let responses = ResponseClassifier::new();
    let prompt_rule = prompts.matched_rule(prompt);
    let prompt_id = prompts.classify(prompt);
    let response_rule = responses.matched_rule(prompt_id, reply);
    let response_class = responses.classify(prompt_id, reply);

    if args.json {
        let out = serde_json::json!({
            "prompt_id": prompt_id.is_recognized().then_some(prompt_id),
            "response_class": response_class,
            "prompt_rule": prompt_rule.map(|r| r.code),
            "response_rule": response_rule.map(|r| r.code),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Prompt ID:      {}", prompt_id.to_string().bold());
    println!("Classification: {}", paint_class(response_class));
    if args.verbose {
        println!("  prompt rule:   {}", prompt_rule.map(|r| r.code).unwrap_or("-"));
        println!("  response rule: {}", response_rule.map(|r| r.code).unwrap_or("-"));
    }
    Ok(())
}

/// Segment a single transcript and list its turns
fn run_transcript(path: &Path, args: &Args) -> Result<()> {
    let conv = parse_transcript_file(path)
        .with_context(|| format!("parsing {}", path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&conv)?);
        return Ok(());
    }

    println!("Thread ID: {}", conv.thread_id.bold());
    println!("Condition: {}", conv.condition);
    println!("Number of turns: {}", conv.len());
    println!("Exchanges: {}", conv.exchanges().len());
    println!();
    for turn in &conv.turns {
        let preview: String = turn.text.chars().take(50).collect();
        let preview = preview.replace('\n', " ");
        println!("  [{}] {}: {}...", turn.turn_index, turn.speaker, preview);
    }
    Ok(())
}

/// Full analysis of the corpus
fn run_analysis(args: &Args) -> Result<()> {
    let mut config = AnalysisConfig::new(args.data_dir.clone(), args.out_dir.clone());
    config.write_outputs = !args.no_write;

    let corpus = load_corpus(&config.data_dir)
        .with_context(|| format!("loading corpus from {}", config.data_dir.display()))?;
    if corpus.is_empty() {
        tracing::warn!(data_dir = %config.data_dir.display(), "no transcripts found");
    }

    let analysis = analyze(&corpus.conversations);
    if analysis.unrecognized_count() > 0 {
        tracing::warn!(count = analysis.unrecognized_count(), "exchanges with unrecognized prompts");
    }

    if config.write_outputs {
        let written = write_outputs(&config.out_dir, &analysis, &corpus.sources)
            .with_context(|| format!("writing outputs to {}", config.out_dir.display()))?;
        if !args.json {
            for path in &written {
                println!("Saved {}", path.display());
            }
            println!();
        }
    }

    if args.json {
        let out = serde_json::json!({
            "conversation_count": analysis.conversation_count,
            "control_threads": analysis.control_threads,
            "contaminated_threads": analysis.contaminated_threads,
            "exchanges": analysis.records.len(),
            "resolved": analysis.resolved_comparison,
            "all_attempts": analysis.attempts_comparison,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

fn paint_class(class: ResponseClass) -> String {
    match class {
        ResponseClass::ImageSuccess => class.code().green().to_string(),
        ResponseClass::RateLimit => class.code().yellow().to_string(),
        ResponseClass::PolicyRefusal | ResponseClass::CapabilityRefusal => class.code().red().to_string(),
        ResponseClass::Other => class.code().to_string(),
    }
}

fn print_analysis(analysis: &Analysis) {
    let rule = "=".repeat(70);
    println!("{}", rule);
    println!("{}", "VIOLATION STATE ANALYSIS".bold());
    println!("{}", rule);
    println!(
        "Conversations: {} (control {}, contaminated {})",
        analysis.conversation_count, analysis.control_threads, analysis.contaminated_threads
    );
    println!("Exchanges: {}", analysis.records.len());
    println!();

    println!("{}", "=== RESOLVED OUTCOMES (per thread, per prompt) ===".bold());
    print_comparison(&analysis.resolved_comparison);
    println!();
    println!("{}", "=== ALL ATTEMPTS (including retries) ===".bold());
    print_comparison(&analysis.attempts_comparison);
}

fn print_comparison(cmp: &ConditionComparison) {
    print_tally("Control", &cmp.control, cmp.policy);
    print_tally("Contaminated", &cmp.contaminated, cmp.policy);
    println!(
        "Fisher's exact: odds ratio {:.4}, p = {:.2e}",
        cmp.fisher.odds_ratio, cmp.fisher.p_value
    );
    println!("Cohen's h: {:.2} ({})", cmp.effect.h, cmp.effect.magnitude);
}

fn print_tally(name: &str, tally: &ConditionTally, policy: RateLimitPolicy) {
    println!(
        "{:<13} total {:>3} | {} | {} | {} | rate {:.1}% ({}/{})",
        name,
        tally.total,
        format!("success {}", tally.success).green(),
        format!("refused {}", tally.failures(policy)).red(),
        format!("rate limited {}", tally.rate_limits).yellow(),
        tally.refusal_rate(policy) * 100.0,
        tally.failures(policy),
        tally.evaluable(policy),
    );
}
