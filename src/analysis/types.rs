//! Core data types exchanged with the analysis engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A job posting under evaluation. Optional fields stay `None` when the
/// source did not report them; gate logic distinguishes absent from zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub client_rating: Option<f32>,
    #[serde(default)]
    pub avg_pay_rate: Option<f32>,
    #[serde(default)]
    pub client_history: Option<ClientHistory>,
}

/// Aggregate posting/hiring record of the client behind a job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClientHistory {
    pub total_jobs: u32,
    pub hires: u32,
    pub avg_review: f32,
}

/// The freelancer side of an analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreelancerProfile {
    pub skills: Vec<String>,
    pub hourly_rate: f32,
    pub experience_years: u32,
}

/// Coarse classification of the composite match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchTier {
    Low,
    Moderate,
    Great,
    Excellent,
}

impl MatchTier {
    /// Map a composite score onto a tier. Breakpoints are evaluated
    /// highest-first and are inclusive.
    pub fn from_score(score: f32) -> Self {
        if score >= 0.85 {
            MatchTier::Excellent
        } else if score >= 0.70 {
            MatchTier::Great
        } else if score >= 0.55 {
            MatchTier::Moderate
        } else {
            MatchTier::Low
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchTier::Low => "LOW",
            MatchTier::Moderate => "MODERATE",
            MatchTier::Great => "GREAT",
            MatchTier::Excellent => "EXCELLENT",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of a single analysis call. Owned by the caller; the engine keeps
/// no state between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub passed: bool,
    pub reasons: Vec<String>,
    pub recommendation: String,
    pub skill_match_score: f32,
    pub matched_skills: BTreeSet<String>,
    pub match_tier: MatchTier,
    pub overall_match_score: f32,
}
