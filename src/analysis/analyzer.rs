//! Job analysis engine: gates, composite scoring, and verdict assembly

use crate::analysis::quality::{client_quality, is_favorable, rate_quality};
use crate::analysis::scorer::composite_score;
use crate::analysis::similarity::SimilarityProvider;
use crate::analysis::skills::SkillMatcher;
use crate::analysis::types::{FreelancerProfile, JobPosting, MatchResult, MatchTier};
use crate::config::{Config, GateConfig, ScoringConfig};
use log::debug;
use std::sync::Arc;

/// Analysis engine evaluating job postings against a freelancer profile.
///
/// Stateless per call: the similarity provider is read-only after
/// construction, so one analyzer can serve concurrent callers.
pub struct JobAnalyzer {
    matcher: SkillMatcher,
    gates: GateConfig,
    scoring: ScoringConfig,
}

impl JobAnalyzer {
    pub fn new(provider: Arc<dyn SimilarityProvider>, config: &Config) -> Self {
        Self {
            matcher: SkillMatcher::new(provider, config.matching.similarity_threshold),
            gates: config.gates.clone(),
            scoring: config.scoring.clone(),
        }
    }

    /// Analyze a job posting against a freelancer profile.
    ///
    /// Hard gates are evaluated independently (never short-circuited) so
    /// every applicable reason is reported; any single failure forces
    /// `passed = false` regardless of the composite score. Gates whose
    /// input is absent are skipped, not failed.
    pub fn analyze(&self, job: &JobPosting, profile: &FreelancerProfile) -> MatchResult {
        let mut reasons = Vec::new();
        let mut passed = true;

        // Client rating gate.
        if let Some(rating) = job.client_rating {
            if rating < self.gates.min_client_rating {
                reasons.push(format!(
                    "Client rating ({}) is below minimum threshold of {}",
                    rating, self.gates.min_client_rating
                ));
                passed = false;
            } else {
                reasons.push(format!("Client rating ({}) meets minimum threshold", rating));
            }
        }

        // Pay rate gate.
        if let Some(pay_rate) = job.avg_pay_rate {
            if pay_rate < self.gates.min_hourly_rate {
                reasons.push(format!(
                    "Average pay rate (${}/hr) is below minimum threshold of ${}/hr",
                    pay_rate, self.gates.min_hourly_rate
                ));
                passed = false;
            } else {
                reasons.push(format!("Pay rate (${}/hr) meets minimum threshold", pay_rate));
            }
        }

        // Skill match gate.
        let skill_match = self
            .matcher
            .match_skills(&job.required_skills, &profile.skills);

        if skill_match.score < self.gates.min_skill_match {
            reasons.push(format!(
                "Skill match is too low ({:.0}%)",
                skill_match.score * 100.0
            ));
            passed = false;
        } else {
            let matched: Vec<&str> = skill_match.matched.iter().map(|s| s.as_str()).collect();
            reasons.push(format!(
                "Skills matched: {} (Match: {:.0}%)",
                matched.join(", "),
                skill_match.score * 100.0
            ));
        }

        // With client history available it acts as a fourth hard gate;
        // without it, a low posted rate only raises a non-blocking concern.
        let mut rate_concern = false;
        match job.client_history {
            Some(history) => {
                if is_favorable(&history, &self.gates) {
                    reasons.push("Client has positive hiring history".to_string());
                } else {
                    reasons.push("Client history raises concerns".to_string());
                    passed = false;
                }
            }
            None => {
                if let Some(pay_rate) = job.avg_pay_rate {
                    if profile.hourly_rate > 0.0 && pay_rate < profile.hourly_rate {
                        reasons.push(format!(
                            "Pay rate (${}/hr) is below your rate (${}/hr)",
                            pay_rate, profile.hourly_rate
                        ));
                        rate_concern = true;
                    }
                }
            }
        }

        let freelancer_rate = (profile.hourly_rate > 0.0).then_some(profile.hourly_rate);
        let overall_match_score = composite_score(
            skill_match.score,
            client_quality(job.client_rating),
            rate_quality(job.avg_pay_rate, freelancer_rate),
            self.scoring.experience_component,
            &self.scoring,
        );
        let match_tier = MatchTier::from_score(overall_match_score);

        debug!(
            "analyzed '{}': passed={} score={:.3} tier={} rate_concern={}",
            job.title, passed, overall_match_score, match_tier, rate_concern
        );

        MatchResult {
            passed,
            reasons,
            recommendation: recommendation_for(passed, match_tier).to_string(),
            skill_match_score: skill_match.score,
            matched_skills: skill_match.matched,
            match_tier,
            overall_match_score,
        }
    }
}

/// Recommendation rule table keyed on the verdict and tier. Failing jobs
/// always get the rejection message regardless of tier.
fn recommendation_for(passed: bool, tier: MatchTier) -> &'static str {
    if !passed {
        return "This job does not meet the minimum criteria. Consider looking for other opportunities.";
    }
    match tier {
        MatchTier::Excellent => {
            "Excellent match! This job is a perfect fit for your profile. Apply with confidence."
        }
        MatchTier::Great => {
            "Great match! This job is a strong fit for your profile. You can now generate a personalized proposal."
        }
        MatchTier::Moderate => {
            "Moderate match. Consider applying but highlight relevant experience and transferable skills."
        }
        MatchTier::Low => {
            "Low match. This job may not be the best fit, but you can still apply if interested."
        }
    }
}
