//! Output formatters for analysis reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use colored::Colorize;

/// Trait for rendering an analysis report in one output format.
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors.
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for piping into other tools.
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports.
pub struct MarkdownFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn verdict(&self, passed: bool) -> String {
        let text = if passed { "PASS" } else { "FAIL" };
        if !self.use_colors {
            return text.to_string();
        }
        if passed {
            text.green().bold().to_string()
        } else {
            text.red().bold().to_string()
        }
    }

    fn tier(&self, report: &AnalysisReport) -> String {
        let text = report.result.match_tier.to_string();
        if !self.use_colors {
            return text;
        }
        match report.result.overall_match_score {
            score if score >= 0.85 => text.green().to_string(),
            score if score >= 0.55 => text.yellow().to_string(),
            _ => text.red().to_string(),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut out = String::new();

        out.push_str(&format!("Job: {}\n", report.job.title));
        out.push_str(&format!("Profile: {}\n", report.profile_name));
        out.push_str(&format!("Verdict: {}\n", self.verdict(result.passed)));
        out.push_str(&format!(
            "Match: {} ({:.0}% overall, {:.0}% skills)\n",
            self.tier(report),
            result.overall_match_score * 100.0,
            result.skill_match_score * 100.0
        ));

        out.push_str("\nReasons:\n");
        for reason in &result.reasons {
            out.push_str(&format!("  - {}\n", reason));
        }

        if self.detailed {
            if let Some(rating) = report.job.client_rating {
                out.push_str(&format!("\nClient rating: {}\n", rating));
            }
            if let Some(rate) = report.job.avg_pay_rate {
                out.push_str(&format!("Pay rate: ${}/hr\n", rate));
            }
            if !result.matched_skills.is_empty() {
                let matched: Vec<&str> = result.matched_skills.iter().map(|s| s.as_str()).collect();
                out.push_str(&format!("Matched skills: {}\n", matched.join(", ")));
            }
        }

        out.push_str(&format!("\nRecommendation: {}\n", result.recommendation));
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(text)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut out = String::new();

        out.push_str(&format!("# Job Analysis: {}\n\n", report.job.title));
        out.push_str(&format!("**Profile:** {}\n\n", report.profile_name));
        out.push_str("| Metric | Value |\n|---|---|\n");
        out.push_str(&format!(
            "| Verdict | {} |\n",
            if result.passed { "PASS" } else { "FAIL" }
        ));
        out.push_str(&format!("| Match tier | {} |\n", result.match_tier));
        out.push_str(&format!(
            "| Overall score | {:.0}% |\n",
            result.overall_match_score * 100.0
        ));
        out.push_str(&format!(
            "| Skill match | {:.0}% |\n",
            result.skill_match_score * 100.0
        ));

        out.push_str("\n## Reasons\n\n");
        for reason in &result.reasons {
            out.push_str(&format!("- {}\n", reason));
        }

        if !result.matched_skills.is_empty() {
            let matched: Vec<&str> = result.matched_skills.iter().map(|s| s.as_str()).collect();
            out.push_str(&format!("\n## Matched Skills\n\n{}\n", matched.join(", ")));
        }

        out.push_str(&format!("\n## Recommendation\n\n{}\n", result.recommendation));
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Pick the formatter for a requested output format.
pub fn formatter_for(format: OutputFormat, use_colors: bool, detailed: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors, detailed)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{JobPosting, MatchResult, MatchTier};
    use crate::output::report::AnalysisReport;
    use std::collections::BTreeSet;

    fn report() -> AnalysisReport {
        let job = JobPosting {
            title: "Python API Developer".to_string(),
            description: String::new(),
            required_skills: vec!["python".to_string()],
            client_rating: Some(4.6),
            avg_pay_rate: Some(30.0),
            client_history: None,
        };
        let result = MatchResult {
            passed: true,
            reasons: vec!["Skills matched: python (Match: 100%)".to_string()],
            recommendation: "Apply with confidence.".to_string(),
            skill_match_score: 1.0,
            matched_skills: BTreeSet::from(["python".to_string()]),
            match_tier: MatchTier::Excellent,
            overall_match_score: 0.9,
        };
        AnalysisReport::new(&job, "Alice", result)
    }

    #[test]
    fn test_console_output_without_colors() {
        let text = ConsoleFormatter::new(false, true)
            .format_report(&report())
            .unwrap();
        assert!(text.contains("Verdict: PASS"));
        assert!(text.contains("EXCELLENT"));
        assert!(text.contains("Matched skills: python"));
        assert!(text.contains("Recommendation: Apply with confidence."));
    }

    #[test]
    fn test_json_output_round_trips() {
        let text = JsonFormatter::new(false).format_report(&report()).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.job.title, "Python API Developer");
        assert_eq!(parsed.result.match_tier, MatchTier::Excellent);
    }

    #[test]
    fn test_markdown_output_structure() {
        let text = MarkdownFormatter.format_report(&report()).unwrap();
        assert!(text.starts_with("# Job Analysis: Python API Developer"));
        assert!(text.contains("| Verdict | PASS |"));
        assert!(text.contains("## Recommendation"));
    }
}
