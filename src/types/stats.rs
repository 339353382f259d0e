//! Aggregate counts and statistical results per condition

use serde::{Deserialize, Serialize};
use crate::{COHEN_H_MEDIUM, COHEN_H_SMALL};
use crate::types::ResponseClass;

/// How rate limits enter the success/failure split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitPolicy {
    /// Rate limits are failed attempts and stay in the denominator
    CountAsFailure,
    /// Rate limits are neither success nor refusal and leave the denominator
    Exclude,
}

/// Outcome counts for one condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionTally {
    pub total: usize,
    pub success: usize,
    pub policy_refusals: usize,
    pub capability_refusals: usize,
    pub rate_limits: usize,
    pub other: usize,
}

impl ConditionTally {
    /// Count one outcome
    pub fn record(&mut self, class: ResponseClass) {
        self.total += 1;
        match class {
            ResponseClass::ImageSuccess => self.success += 1,
            ResponseClass::PolicyRefusal => self.policy_refusals += 1,
            ResponseClass::CapabilityRefusal => self.capability_refusals += 1,
            ResponseClass::RateLimit => self.rate_limits += 1,
            ResponseClass::Other => self.other += 1,
        }
    }

    /// Failures under the given rate-limit policy
    pub fn failures(&self, policy: RateLimitPolicy) -> usize {
        let refusals = self.policy_refusals + self.capability_refusals;
        match policy {
            RateLimitPolicy::CountAsFailure => refusals + self.rate_limits,
            RateLimitPolicy::Exclude => refusals,
        }
    }

    /// Denominator for the refusal rate
    pub fn evaluable(&self, policy: RateLimitPolicy) -> usize {
        match policy {
            RateLimitPolicy::CountAsFailure => self.total,
            RateLimitPolicy::Exclude => self.total.saturating_sub(self.rate_limits),
        }
    }

    /// failures / evaluable, 0 when nothing is evaluable
    pub fn refusal_rate(&self, policy: RateLimitPolicy) -> f64 {
        let evaluable = self.evaluable(policy);
        if evaluable == 0 {
            0.0
        } else {
            self.failures(policy) as f64 / evaluable as f64
        }
    }
}

/// 2×2 table: rows control / contaminated, columns success / failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTable {
    pub cells: [[u64; 2]; 2],
}

impl ContingencyTable {
    pub fn new(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self { cells: [[a, b], [c, d]] }
    }

    pub fn row_sums(&self) -> [u64; 2] {
        [
            self.cells[0][0] + self.cells[0][1],
            self.cells[1][0] + self.cells[1][1],
        ]
    }

    pub fn col_sums(&self) -> [u64; 2] {
        [
            self.cells[0][0] + self.cells[1][0],
            self.cells[0][1] + self.cells[1][1],
        ]
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }
}

/// Two-sided Fisher's exact test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FisherResult {
    /// Sample odds ratio, may be infinite or NaN (serialised as null)
    pub odds_ratio: f64,
    pub p_value: f64,
}

/// Magnitude band for Cohen's h
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    pub fn from_h(h: f64) -> Self {
        let h = h.abs();
        if h < COHEN_H_SMALL {
            Self::Small
        } else if h < COHEN_H_MEDIUM {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

impl std::fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        };
        write!(f, "{} effect", name)
    }
}

/// Cohen's h with its band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    pub h: f64,
    pub magnitude: EffectMagnitude,
}

/// Control vs contaminated under one counting scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionComparison {
    pub policy: RateLimitPolicy,
    pub control: ConditionTally,
    pub contaminated: ConditionTally,
    pub table: ContingencyTable,
    pub fisher: FisherResult,
    /// Contaminated refusal rate minus control refusal rate, arcsine scale
    pub effect: EffectSize,
}
