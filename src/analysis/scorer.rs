//! Composite match scoring

use crate::config::ScoringConfig;

/// Weighted combination of the four quality components, clamped to [0, 1]
/// to absorb floating-point drift.
pub fn composite_score(
    skill_component: f32,
    client_component: f32,
    rate_component: f32,
    experience_component: f32,
    weights: &ScoringConfig,
) -> f32 {
    let score = skill_component * weights.skill_weight
        + client_component * weights.client_weight
        + rate_component * weights.rate_weight
        + experience_component * weights.experience_weight;

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn weights() -> ScoringConfig {
        Config::default().scoring
    }

    #[test]
    fn test_perfect_components_score_one() {
        let score = composite_score(1.0, 1.0, 1.0, 1.0, &weights());
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_weighted_combination() {
        // 0.5*0.4 + 0.8*0.25 + 0.56*0.25 + 0.8*0.1 = 0.62
        let score = composite_score(0.5, 0.8, 0.56, 0.8, &weights());
        assert!((score - 0.62).abs() < 1e-5);
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(composite_score(-1.0, -1.0, -1.0, -1.0, &weights()), 0.0);
        assert_eq!(composite_score(2.0, 2.0, 2.0, 2.0, &weights()), 1.0);
    }
}
