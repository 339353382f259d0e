//! Report output: JSON record files, run manifest and a plain-text summary
//!
//! No timestamps anywhere, so identical input gives byte-identical output.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::info;
use crate::{
    MANIFEST_FILE, PARSED_TURNS_FILE, PROCESSED_DIR, RESOLVED_OUTCOMES_FILE,
    SUMMARY_STATS_FILE, THREAD_SUMMARY_FILE, VERSION,
};
use crate::core::Analysis;
use crate::types::{ConditionComparison, ConditionTally, CorpusError, RateLimitPolicy, SourceEntry};

/// Where to read from and write to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub write_outputs: bool,
}

impl AnalysisConfig {
    /// Outputs go to `<data_dir>/processed` unless overridden
    pub fn new(data_dir: impl Into<PathBuf>, out_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let out_dir = out_dir.unwrap_or_else(|| data_dir.join(PROCESSED_DIR));
        Self {
            data_dir,
            out_dir,
            write_outputs: true,
        }
    }
}

#[derive(Serialize)]
struct Manifest<'a> {
    version: &'a str,
    sources: &'a [SourceEntry],
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CorpusError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_text(path, &json)
}

fn write_text(path: &Path, text: &str) -> Result<(), CorpusError> {
    std::fs::write(path, text).map_err(|source| CorpusError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write every output file, returning the paths written
pub fn write_outputs(
    out_dir: &Path,
    analysis: &Analysis,
    sources: &[SourceEntry],
) -> Result<Vec<PathBuf>, CorpusError> {
    std::fs::create_dir_all(out_dir).map_err(|source| CorpusError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let paths = [
        PARSED_TURNS_FILE,
        THREAD_SUMMARY_FILE,
        RESOLVED_OUTCOMES_FILE,
        SUMMARY_STATS_FILE,
        MANIFEST_FILE,
    ]
    .map(|name| out_dir.join(name));

    write_json(&paths[0], &analysis.records)?;
    write_json(&paths[1], &analysis.summaries)?;
    write_json(&paths[2], &analysis.resolved)?;
    write_text(&paths[3], &render_summary(analysis))?;
    write_json(&paths[4], &Manifest { version: VERSION, sources })?;

    info!(out_dir = %out_dir.display(), files = paths.len(), "outputs written");
    Ok(paths.to_vec())
}

fn pct(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn render_tally(out: &mut String, name: &str, tally: &ConditionTally, policy: RateLimitPolicy) {
    let _ = writeln!(out, "{}:", name);
    let _ = writeln!(out, "  Total prompts: {}", tally.total);
    let _ = writeln!(out, "  Successful: {}", tally.success);
    match policy {
        RateLimitPolicy::CountAsFailure => {
            let _ = writeln!(
                out,
                "  Refused: {} (includes {} rate limits)",
                tally.failures(policy),
                tally.rate_limits
            );
        }
        RateLimitPolicy::Exclude => {
            let _ = writeln!(out, "  Refused: {}", tally.failures(policy));
            let _ = writeln!(out, "  Rate limited: {}", tally.rate_limits);
        }
    }
    if tally.other > 0 {
        let _ = writeln!(out, "  Other (manual review): {}", tally.other);
    }
    let _ = writeln!(
        out,
        "  Refusal rate: {} ({}/{})",
        pct(tally.refusal_rate(policy)),
        tally.failures(policy),
        tally.evaluable(policy)
    );
}

fn render_comparison(out: &mut String, cmp: &ConditionComparison) {
    render_tally(out, "Control", &cmp.control, cmp.policy);
    out.push('\n');
    render_tally(out, "Contaminated", &cmp.contaminated, cmp.policy);
    out.push('\n');
    let _ = writeln!(out, "Fisher's exact test:");
    let _ = writeln!(out, "  Odds ratio: {:.4}", cmp.fisher.odds_ratio);
    let _ = writeln!(out, "  p-value: {:.2e}", cmp.fisher.p_value);
    let _ = writeln!(out, "Effect size (Cohen's h):");
    let _ = writeln!(out, "  h = {:.2} ({})", cmp.effect.h, cmp.effect.magnitude);
}

/// Plain-text statistics summary
pub fn render_summary(analysis: &Analysis) -> String {
    let mut out = String::new();
    let rule = "=".repeat(70);

    let _ = writeln!(out, "VIOLATION STATE SUMMARY STATISTICS");
    let _ = writeln!(out, "{}", rule);
    out.push('\n');
    let _ = writeln!(out, "SAMPLE SIZE");
    let _ = writeln!(out, "Total conversations: {}", analysis.conversation_count);
    let _ = writeln!(out, "  Control: {}", analysis.control_threads);
    let _ = writeln!(out, "  Contaminated: {}", analysis.contaminated_threads);
    let _ = writeln!(out, "Exchanges: {} ({} unrecognized prompts)",
        analysis.records.len(), analysis.unrecognized_count());
    out.push('\n');

    let _ = writeln!(out, "PRIMARY ANALYSIS: RESOLVED OUTCOME PER THREAD AND PROMPT");
    let _ = writeln!(out, "(any success wins, otherwise the last attempt; rate limits count as refusals)");
    out.push('\n');
    render_comparison(&mut out, &analysis.resolved_comparison);
    out.push('\n');

    let _ = writeln!(out, "SECONDARY ANALYSIS: ALL ATTEMPTS");
    let _ = writeln!(out, "(every image exchange; rate limits excluded from the denominator)");
    out.push('\n');
    render_comparison(&mut out, &analysis.attempts_comparison);

    out
}

// =============================================================================
// TESTS
// =============================================================================
