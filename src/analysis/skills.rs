//! Skill match calculation between required and available skills

use crate::analysis::normalize::normalize;
use crate::analysis::similarity::SimilarityProvider;
use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Outcome of matching a job's required skills against a freelancer's.
#[derive(Debug, Clone)]
pub struct SkillMatch {
    /// Fraction of required skills satisfied, in [0, 1].
    pub score: f32,
    /// Skills that satisfied a requirement: the normalized required skill
    /// for exact matches, the matched available skill for semantic ones.
    pub matched: BTreeSet<String>,
}

impl SkillMatch {
    fn empty() -> Self {
        Self {
            score: 0.0,
            matched: BTreeSet::new(),
        }
    }
}

/// Matches required skills exactly first, then semantically through the
/// injected provider.
pub struct SkillMatcher {
    provider: Arc<dyn SimilarityProvider>,
    threshold: f32,
}

impl SkillMatcher {
    pub fn new(provider: Arc<dyn SimilarityProvider>, threshold: f32) -> Self {
        Self { provider, threshold }
    }

    /// Compute the skill match score and the matched-skill set.
    ///
    /// No required skills means a zero score, not a vacuously perfect one.
    /// Each requirement counts once toward the score even when two
    /// requirements resolve to the same available skill.
    pub fn match_skills(&self, required: &[String], available: &[String]) -> SkillMatch {
        if required.is_empty() {
            return SkillMatch::empty();
        }

        let required: Vec<String> = required.iter().map(|s| normalize(s)).collect();
        let available: Vec<String> = available.iter().map(|s| normalize(s)).collect();

        let mut matched = BTreeSet::new();
        let mut satisfied = 0usize;

        for req_skill in &required {
            // Exact matches take priority over semantic ones.
            if available.iter().any(|skill| skill == req_skill) {
                matched.insert(req_skill.clone());
                satisfied += 1;
                continue;
            }

            let mut best_score = self.threshold;
            let mut best_match: Option<&str> = None;

            for avail_skill in &available {
                match self.provider.similarity(req_skill, avail_skill) {
                    // Strict comparison: on a tie the first candidate wins.
                    Some(similarity) if similarity > best_score => {
                        best_score = similarity;
                        best_match = Some(avail_skill);
                    }
                    Some(_) => {}
                    None => {
                        debug!(
                            "similarity undefined for '{}' vs '{}'; treating as non-match",
                            req_skill, avail_skill
                        );
                    }
                }
            }

            if let Some(skill) = best_match {
                matched.insert(skill.to_string());
                satisfied += 1;
            }
        }

        SkillMatch {
            score: satisfied as f32 / required.len() as f32,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::similarity::{ExactOnly, LexicalSimilarity, SimilarityProvider};

    /// Provider with a fixed answer for every pair, for tie-break tests.
    struct FixedSimilarity(Option<f32>);

    impl SimilarityProvider for FixedSimilarity {
        fn similarity(&self, _a: &str, _b: &str) -> Option<f32> {
            self.0
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn exact_matcher() -> SkillMatcher {
        SkillMatcher::new(Arc::new(ExactOnly), 0.8)
    }

    #[test]
    fn test_empty_required_skills_scores_zero() {
        let matcher = exact_matcher();
        let result = matcher.match_skills(&[], &skills(&["python"]));
        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let matcher = exact_matcher();
        let result = matcher.match_skills(
            &skills(&["Python", "React"]),
            &skills(&["python", "javascript"]),
        );
        assert!((result.score - 0.5).abs() < 1e-6);
        assert_eq!(
            result.matched.iter().cloned().collect::<Vec<_>>(),
            vec!["python".to_string()]
        );
    }

    #[test]
    fn test_semantic_fallback_above_threshold() {
        let matcher = SkillMatcher::new(Arc::new(LexicalSimilarity), 0.8);
        // "postgres" vs "postgresql" clears the 0.8 Jaro-Winkler threshold.
        let result = matcher.match_skills(&skills(&["postgres"]), &skills(&["postgresql"]));
        assert!((result.score - 1.0).abs() < 1e-6);
        assert!(result.matched.contains("postgresql"));
    }

    #[test]
    fn test_undefined_similarity_treated_as_non_match() {
        let matcher = SkillMatcher::new(Arc::new(FixedSimilarity(None)), 0.8);
        let result = matcher.match_skills(&skills(&["python"]), &skills(&["ruby"]));
        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_tie_break_keeps_first_candidate() {
        // Every pair scores 0.9; strict `>` means the first available skill
        // examined stays the best match.
        let matcher = SkillMatcher::new(Arc::new(FixedSimilarity(Some(0.9))), 0.8);
        let result = matcher.match_skills(&skills(&["orchestration"]), &skills(&["kubernetes", "nomad"]));
        assert!(result.matched.contains("kubernetes"));
        assert!(!result.matched.contains("nomad"));
    }

    #[test]
    fn test_similarity_equal_to_threshold_is_not_a_match() {
        let matcher = SkillMatcher::new(Arc::new(FixedSimilarity(Some(0.8))), 0.8);
        let result = matcher.match_skills(&skills(&["python"]), &skills(&["ruby"]));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_each_requirement_counts_once_even_when_sharing_a_match() {
        // Both requirements resolve semantically to the same available
        // skill; the score still reflects two satisfied requirements.
        let matcher = SkillMatcher::new(Arc::new(FixedSimilarity(Some(0.95))), 0.8);
        let result = matcher.match_skills(
            &skills(&["react native", "reactjs"]),
            &skills(&["react"]),
        );
        assert!((result.score - 1.0).abs() < 1e-6);
        assert_eq!(result.matched.len(), 1);
    }
}
