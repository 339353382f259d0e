//! Statistics over resolved outcomes and thread summaries
//!
//! Two-sided Fisher's exact test on the 2×2 success/failure table and
//! Cohen's h on the refusal rates.

use crate::FISHER_RELATIVE_TOLERANCE;
use crate::types::{
    Condition, ConditionComparison, ConditionTally, ContingencyTable, EffectMagnitude,
    EffectSize, FisherResult, RateLimitPolicy, ResolvedOutcome, ThreadSummary,
};

/// Tally resolved outcomes for one condition
pub fn tally_resolved(outcomes: &[ResolvedOutcome], condition: Condition) -> ConditionTally {
    let mut tally = ConditionTally::default();
    for outcome in outcomes.iter().filter(|o| o.condition == condition) {
        tally.record(outcome.response_class);
    }
    tally
}

/// Tally every image attempt for one condition, from thread summaries
pub fn tally_attempts(summaries: &[ThreadSummary], condition: Condition) -> ConditionTally {
    let mut tally = ConditionTally::default();
    for s in summaries.iter().filter(|s| s.condition == condition) {
        tally.total += s.n_image_prompts;
        tally.success += s.n_image_success;
        tally.policy_refusals += s.n_image_policy_refusals;
        tally.capability_refusals += s.n_image_capability_refusals;
        tally.rate_limits += s.n_rate_limit;
    }
    let classified = tally.success + tally.policy_refusals + tally.capability_refusals + tally.rate_limits;
    tally.other = tally.total.saturating_sub(classified);
    tally
}

/// Cohen's h for two proportions
pub fn cohen_h(p1: f64, p2: f64) -> f64 {
    2.0 * p1.sqrt().asin() - 2.0 * p2.sqrt().asin()
}

/// Two-sided Fisher's exact test
///
/// p sums every table with the observed margins that is no more likely than
/// the observed one.
pub fn fisher_exact(table: &ContingencyTable) -> FisherResult {
    let [[a, b], [c, d]] = table.cells;
    let [row0, row1] = table.row_sums();
    let [col0, col1] = table.col_sums();

    if row0 == 0 || row1 == 0 || col0 == 0 || col1 == 0 {
        return FisherResult { odds_ratio: f64::NAN, p_value: 1.0 };
    }

    let odds_ratio = if b > 0 && c > 0 {
        (a * d) as f64 / (b * c) as f64
    } else {
        f64::INFINITY
    };

    let n = table.total();
    let ln_fact = log_factorials(n);
    // Hypergeometric: population n, col0 successes, row0 draws
    let ln_pmf = |x: u64| -> f64 {
        ln_choose(&ln_fact, col0, x) + ln_choose(&ln_fact, n - col0, row0 - x)
            - ln_choose(&ln_fact, n, row0)
    };

    let lo = row0.saturating_sub(n - col0);
    let hi = col0.min(row0);
    let observed = ln_pmf(a).exp();
    let threshold = observed * (1.0 + FISHER_RELATIVE_TOLERANCE);

    let p_value: f64 = (lo..=hi)
        .map(|x| ln_pmf(x).exp())
        .filter(|p| *p <= threshold)
        .sum();

    FisherResult {
        odds_ratio,
        p_value: p_value.min(1.0),
    }
}

fn log_factorials(n: u64) -> Vec<f64> {
    let mut table = Vec::with_capacity(n as usize + 1);
    let mut acc = 0.0;
    table.push(acc);
    for i in 1..=n {
        acc += (i as f64).ln();
        table.push(acc);
    }
    table
}

fn ln_choose(ln_fact: &[f64], n: u64, k: u64) -> f64 {
    ln_fact[n as usize] - ln_fact[k as usize] - ln_fact[(n - k) as usize]
}

/// Build the comparison between arms under one counting scheme
pub fn compare(
    control: ConditionTally,
    contaminated: ConditionTally,
    policy: RateLimitPolicy,
) -> ConditionComparison {
    let table = ContingencyTable::new(
        control.success as u64,
        control.failures(policy) as u64,
        contaminated.success as u64,
        contaminated.failures(policy) as u64,
    );
    let fisher = fisher_exact(&table);
    let h = cohen_h(
        contaminated.refusal_rate(policy),
        control.refusal_rate(policy),
    );

    ConditionComparison {
        policy,
        control,
        contaminated,
        table,
        fisher,
        effect: EffectSize {
            h,
            magnitude: EffectMagnitude::from_h(h),
        },
    }
}

/// Primary analysis: one resolved outcome per (thread, prompt), rate limits fail
pub fn compare_resolved(outcomes: &[ResolvedOutcome]) -> ConditionComparison {
    compare(
        tally_resolved(outcomes, Condition::Control),
        tally_resolved(outcomes, Condition::Contaminated),
        RateLimitPolicy::CountAsFailure,
    )
}

/// Secondary analysis: every attempt, rate limits excluded
pub fn compare_attempts(summaries: &[ThreadSummary]) -> ConditionComparison {
    compare(
        tally_attempts(summaries, Condition::Control),
        tally_attempts(summaries, Condition::Contaminated),
        RateLimitPolicy::Exclude,
    )
}

// =============================================================================
// TESTS
// =============================================================================
