//! Known-skill detection in raw job description text

use crate::error::{JobScoutError, Result};
use aho_corasick::AhoCorasick;

/// Scans free text for skills from a known database. Used when a fetched
/// posting carries no explicit skill list.
pub struct SkillDetector {
    matcher: AhoCorasick,
    skill_database: Vec<String>,
}

impl SkillDetector {
    pub fn new() -> Result<Self> {
        Self::with_custom_skills(Vec::new())
    }

    pub fn with_custom_skills(additional_skills: Vec<String>) -> Result<Self> {
        let mut skill_database = Self::default_skill_database();
        skill_database.extend(additional_skills);

        // Longest-first so multiword skills win over their substrings.
        skill_database.sort_by(|a, b| b.len().cmp(&a.len()));

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&skill_database)
            .map_err(|e| JobScoutError::Processing(format!("Failed to build skill detector: {}", e)))?;

        Ok(Self {
            matcher,
            skill_database,
        })
    }

    pub fn skill_count(&self) -> usize {
        self.skill_database.len()
    }

    /// Unique skills found in `text`, in order of first occurrence. Matches
    /// inside larger words are ignored ("go" in "category" is not a skill).
    pub fn detect(&self, text: &str) -> Vec<String> {
        let bytes = text.as_bytes();
        let mut found = Vec::new();

        for mat in self.matcher.find_iter(text) {
            let boundary_before = mat.start() == 0
                || !bytes[mat.start() - 1].is_ascii_alphanumeric();
            let boundary_after = mat.end() == bytes.len()
                || !bytes[mat.end()].is_ascii_alphanumeric();
            if !boundary_before || !boundary_after {
                continue;
            }

            let skill = &self.skill_database[mat.pattern().as_usize()];
            if !found.contains(skill) {
                found.push(skill.clone());
            }
        }

        found
    }

    /// Skills commonly requested on freelance job boards.
    fn default_skill_database() -> Vec<String> {
        vec![
            // Programming languages
            "rust", "python", "javascript", "typescript", "java", "c++", "c#", "go", "ruby",
            "php", "swift", "kotlin", "scala", "sql",
            // Web technologies
            "react", "vue", "angular", "svelte", "html", "css", "tailwind", "node.js",
            "express", "next.js", "django", "flask", "fastapi", "laravel", "rails",
            "wordpress", "shopify", "webflow",
            // Mobile
            "flutter", "react native", "ios", "android",
            // Infrastructure
            "docker", "kubernetes", "aws", "azure", "gcp", "terraform", "ci/cd",
            "microservices", "graphql", "rest api", "redis", "nginx",
            // Databases
            "postgresql", "mysql", "mongodb", "sqlite", "dynamodb", "elasticsearch",
            // Data / ML
            "machine learning", "deep learning", "data analysis", "tensorflow", "pytorch",
            "pandas", "numpy", "nlp", "computer vision",
            // Freelance-adjacent
            "seo", "copywriting", "graphic design", "figma", "ui/ux", "web scraping",
            "automation", "api integration", "data entry",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_skills_case_insensitively() {
        let detector = SkillDetector::new().unwrap();
        let skills = detector.detect("Looking for a Python dev with Django and PostgreSQL experience");
        assert_eq!(skills, vec!["python", "django", "postgresql"]);
    }

    #[test]
    fn test_prefers_longest_match() {
        let detector = SkillDetector::new().unwrap();
        let skills = detector.detect("Must know React Native inside out");
        assert!(skills.contains(&"react native".to_string()));
        assert!(!skills.contains(&"react".to_string()));
    }

    #[test]
    fn test_ignores_matches_inside_words() {
        let detector = SkillDetector::new().unwrap();
        let skills = detector.detect("Categorize listings in this category");
        assert!(!skills.contains(&"go".to_string()));
    }

    #[test]
    fn test_deduplicates_repeated_mentions() {
        let detector = SkillDetector::new().unwrap();
        let skills = detector.detect("python python PYTHON");
        assert_eq!(skills, vec!["python"]);
    }

    #[test]
    fn test_custom_skills_are_detected() {
        let detector = SkillDetector::with_custom_skills(vec!["bevy".to_string()]).unwrap();
        let skills = detector.detect("Game prototype in Bevy");
        assert_eq!(skills, vec!["bevy"]);
    }
}
