//! Client history and quality-component scoring

use crate::analysis::types::ClientHistory;
use crate::config::GateConfig;

/// Whether a client's posting/hiring record looks favorable.
///
/// The job-count check runs first so the hire-rate division is never
/// reached with zero total jobs.
pub fn is_favorable(history: &ClientHistory, gates: &GateConfig) -> bool {
    if history.total_jobs < gates.min_client_jobs {
        return false;
    }

    if history.avg_review < gates.min_client_review {
        return false;
    }

    let hire_rate = history.hires as f32 / history.total_jobs as f32;
    hire_rate >= gates.min_hire_rate
}

/// Stepped client-rating quality component in [0, 1]. Absent rating scores
/// zero.
pub fn client_quality(rating: Option<f32>) -> f32 {
    match rating {
        Some(rating) if rating >= 4.8 => 1.0,
        Some(rating) if rating >= 4.5 => 0.9,
        Some(rating) if rating >= 4.0 => 0.8,
        Some(rating) if rating >= 3.5 => 0.6,
        Some(_) => 0.3,
        None => 0.0,
    }
}

/// Stepped pay-rate quality component in [0, 1], based on the ratio of the
/// job's rate to the freelancer's. A job rate below the freelancer's rate
/// stacks an additional 0.8 penalty on the stepped value. Absent rates and
/// a zero freelancer rate score zero.
pub fn rate_quality(job_rate: Option<f32>, freelancer_rate: Option<f32>) -> f32 {
    let (job_rate, freelancer_rate) = match (job_rate, freelancer_rate) {
        (Some(job), Some(own)) if own != 0.0 => (job, own),
        _ => return 0.0,
    };

    let ratio = job_rate / freelancer_rate;
    let mut component = if ratio >= 1.2 {
        1.0
    } else if ratio >= 1.0 {
        0.9
    } else if ratio >= 0.8 {
        0.7
    } else if ratio >= 0.6 {
        0.5
    } else {
        0.2
    };

    if job_rate < freelancer_rate {
        component *= 0.8;
    }

    component
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn gates() -> GateConfig {
        Config::default().gates
    }

    fn history(total_jobs: u32, hires: u32, avg_review: f32) -> ClientHistory {
        ClientHistory {
            total_jobs,
            hires,
            avg_review,
        }
    }

    #[test]
    fn test_favorable_history() {
        assert!(is_favorable(&history(10, 7, 4.6), &gates()));
    }

    #[test]
    fn test_too_few_jobs_is_unfavorable() {
        assert!(!is_favorable(&history(2, 2, 5.0), &gates()));
    }

    #[test]
    fn test_low_review_is_unfavorable() {
        assert!(!is_favorable(&history(10, 9, 3.9), &gates()));
    }

    #[test]
    fn test_low_hire_rate_is_unfavorable() {
        assert!(!is_favorable(&history(10, 4, 4.8), &gates()));
    }

    #[test]
    fn test_zero_total_jobs_does_not_panic() {
        assert!(!is_favorable(&history(0, 0, 5.0), &gates()));
    }

    #[test]
    fn test_client_quality_steps() {
        assert_eq!(client_quality(Some(4.9)), 1.0);
        assert_eq!(client_quality(Some(4.8)), 1.0);
        assert_eq!(client_quality(Some(4.6)), 0.9);
        assert_eq!(client_quality(Some(4.2)), 0.8);
        assert_eq!(client_quality(Some(3.7)), 0.6);
        assert_eq!(client_quality(Some(2.0)), 0.3);
        assert_eq!(client_quality(None), 0.0);
    }

    #[test]
    fn test_rate_quality_steps() {
        assert!((rate_quality(Some(30.0), Some(25.0)) - 1.0).abs() < 1e-6);
        assert!((rate_quality(Some(25.0), Some(25.0)) - 0.9).abs() < 1e-6);
        assert!((rate_quality(Some(15.0), Some(25.0)) - 0.4).abs() < 1e-6);
        assert!((rate_quality(Some(10.0), Some(25.0)) - 0.16).abs() < 1e-6);
    }

    #[test]
    fn test_rate_penalty_stacks_on_stepped_value() {
        // Ratio 0.8 steps to 0.7; below the freelancer's rate, so the 0.8
        // penalty applies on top: 0.56.
        let component = rate_quality(Some(20.0), Some(25.0));
        assert!((component - 0.56).abs() < 1e-6);
    }

    #[test]
    fn test_rate_quality_guards_missing_and_zero() {
        assert_eq!(rate_quality(None, Some(25.0)), 0.0);
        assert_eq!(rate_quality(Some(20.0), None), 0.0);
        assert_eq!(rate_quality(Some(20.0), Some(0.0)), 0.0);
    }
}
