//! Client-ready proposal text from a job, a profile, and analysis output

use crate::analysis::normalize::normalize;
use crate::analysis::types::{JobPosting, MatchResult};
use crate::error::Result;
use crate::store::profile_store::{FreelancerRecord, PastProject};
use askama::Template;

/// Plain-text proposal template. Headline positions show at most the first
/// two required skills.
#[derive(Template)]
#[template(
    source = r#"Hello,

I appreciate the opportunity to apply for the {{ job_title }} position. With my expertise in {{ headline_skills }}, I am confident in delivering a high-quality solution that meets your requirements.

Relevant Experience:

{% if project_lines.is_empty() %}I have successfully completed numerous projects that demonstrate my expertise in {{ all_required_skills }} and related technologies.
{% else %}{% for line in project_lines %}- {{ line }}
{% endfor %}{% endif %}
Why I am a Fit:

- {{ headline_skills }} expertise backed by {{ experience_years }} years of hands-on delivery
{% if matched_skills.is_empty() %}{% else %}- Direct overlap with your requirements: {{ matched_skills }}
{% endif %}- Proven ability to analyze complex requirements and deliver scalable solutions
- Strong focus on testing, documentation, and maintaining code quality

Questions About the Project:

1. What are the key features you want in the {{ job_title }} solution?
2. Who is the target audience, and what are their specific needs?
3. Is there a preferred technology stack or existing codebase to build on?
4. What timeline and milestones should I plan around?
5. How will you measure success for this project?

{% match portfolio_url %}{% when Some with (url) %}Portfolio: {{ url }}

{% when None %}{% endmatch %}I am excited about the possibility of bringing my {{ headline_skills }} experience to this project. Looking forward to discussing further!

Best regards,
{{ freelancer_name }}"#,
    ext = "txt"
)]
struct ProposalTemplate {
    job_title: String,
    headline_skills: String,
    all_required_skills: String,
    matched_skills: String,
    experience_years: u32,
    project_lines: Vec<String>,
    portfolio_url: Option<String>,
    freelancer_name: String,
}

pub struct ProposalGenerator;

impl ProposalGenerator {
    /// Render a proposal. Past projects are filtered down to those whose
    /// tech stack overlaps the job's required skills.
    pub fn generate(
        job: &JobPosting,
        record: &FreelancerRecord,
        projects: &[&PastProject],
        result: &MatchResult,
    ) -> Result<String> {
        let headline_skills = if job.required_skills.is_empty() {
            record
                .skills
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            job.required_skills
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        let template = ProposalTemplate {
            job_title: job.title.clone(),
            headline_skills,
            all_required_skills: job.required_skills.join(", "),
            matched_skills: result
                .matched_skills
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            experience_years: record.experience_years,
            project_lines: relevant_project_lines(projects, &job.required_skills),
            portfolio_url: record.portfolio_url.clone(),
            freelancer_name: record.name.clone(),
        };

        Ok(template.render()?)
    }
}

/// Format past projects whose tech stack overlaps the required skills.
fn relevant_project_lines(projects: &[&PastProject], required_skills: &[String]) -> Vec<String> {
    let required: Vec<String> = required_skills.iter().map(|s| normalize(s)).collect();

    projects
        .iter()
        .filter(|project| {
            project
                .tech_stack
                .iter()
                .any(|tech| required.contains(&normalize(tech)))
        })
        .map(|project| {
            format!(
                "{} ({}): {}",
                project.title,
                project.tech_stack.join(", "),
                project.outcomes
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::MatchTier;
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn record() -> FreelancerRecord {
        FreelancerRecord {
            id: 1,
            name: "Alice Chen".to_string(),
            email: None,
            hourly_rate: 40.0,
            skills: vec!["python".to_string(), "django".to_string()],
            experience_years: 6,
            bio: None,
            portfolio_url: Some("https://alice.dev".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn job() -> JobPosting {
        JobPosting {
            title: "Python API Developer".to_string(),
            description: "REST service".to_string(),
            required_skills: vec![
                "Python".to_string(),
                "FastAPI".to_string(),
                "PostgreSQL".to_string(),
            ],
            client_rating: Some(4.6),
            avg_pay_rate: Some(35.0),
            client_history: None,
        }
    }

    fn result() -> MatchResult {
        MatchResult {
            passed: true,
            reasons: vec![],
            recommendation: "Apply".to_string(),
            skill_match_score: 0.67,
            matched_skills: BTreeSet::from(["python".to_string()]),
            match_tier: MatchTier::Great,
            overall_match_score: 0.75,
        }
    }

    fn project(title: &str, tech: &[&str]) -> PastProject {
        PastProject {
            id: 2,
            freelancer_id: 1,
            title: title.to_string(),
            description: String::new(),
            tech_stack: tech.iter().map(|s| s.to_string()).collect(),
            outcomes: "Delivered on time".to_string(),
            project_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_headline_truncates_to_first_two_skills() {
        let text = ProposalGenerator::generate(&job(), &record(), &[], &result()).unwrap();
        assert!(text.contains("Python, FastAPI"));
        assert!(!text.contains("Python, FastAPI, PostgreSQL position"));
        assert!(text.contains("Best regards,\nAlice Chen"));
    }

    #[test]
    fn test_relevant_projects_filtered_by_tech_overlap() {
        let api = project("Analytics API", &["Python", "FastAPI"]);
        let game = project("Game jam entry", &["godot"]);
        let projects: Vec<&PastProject> = vec![&api, &game];

        let text = ProposalGenerator::generate(&job(), &record(), &projects, &result()).unwrap();
        assert!(text.contains("Analytics API"));
        assert!(!text.contains("Game jam entry"));
    }

    #[test]
    fn test_fallback_line_without_projects() {
        let text = ProposalGenerator::generate(&job(), &record(), &[], &result()).unwrap();
        assert!(text.contains("numerous projects"));
    }

    #[test]
    fn test_matched_skills_and_portfolio_included() {
        let text = ProposalGenerator::generate(&job(), &record(), &[], &result()).unwrap();
        assert!(text.contains("Direct overlap with your requirements: python"));
        assert!(text.contains("Portfolio: https://alice.dev"));
    }
}
