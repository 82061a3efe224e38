//! Analysis report envelope handed to the formatters

use crate::analysis::types::{JobPosting, MatchResult};
use serde::{Deserialize, Serialize};

/// The job fields worth echoing back in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub title: String,
    pub required_skills: Vec<String>,
    pub client_rating: Option<f32>,
    pub avg_pay_rate: Option<f32>,
}

/// One analysis run, ready for serialization or display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub job: JobSummary,
    pub profile_name: String,
    pub result: MatchResult,
}

impl AnalysisReport {
    pub fn new(job: &JobPosting, profile_name: &str, result: MatchResult) -> Self {
        Self {
            job: JobSummary {
                title: job.title.clone(),
                required_skills: job.required_skills.clone(),
                client_rating: job.client_rating,
                avg_pay_rate: job.avg_pay_rate,
            },
            profile_name: profile_name.to_string(),
            result,
        }
    }
}
