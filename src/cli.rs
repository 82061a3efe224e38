//! CLI interface for job scout

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-scout")]
#[command(about = "Freelance job-fit analysis and proposal tool")]
#[command(
    long_about = "Analyze freelance job postings against your profile using exact and semantic skill matching, score them, and draft proposals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a job posting against a profile
    Analyze {
        /// Path to a job posting JSON file
        #[arg(short, long)]
        job: PathBuf,

        /// Name of a stored profile
        #[arg(short, long)]
        profile: Option<String>,

        /// Path to a profile JSON file (instead of a stored profile)
        #[arg(long)]
        profile_file: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Show extra detail in console output
        #[arg(short, long)]
        detailed: bool,

        /// Record the result in the analysis history (stored profiles only)
        #[arg(short, long)]
        save: bool,
    },

    /// Fetch jobs from the job board
    Fetch {
        /// Comma-separated search keywords
        #[arg(short, long)]
        keywords: String,

        /// Maximum jobs per keyword
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Cache fetched jobs in the store
        #[arg(short, long)]
        store: bool,
    },

    /// Manage freelancer profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Generate a proposal for a job
    Propose {
        /// Path to a job posting JSON file
        #[arg(short, long)]
        job: PathBuf,

        /// Name of a stored profile
        #[arg(short, long)]
        profile: String,

        /// Write the proposal to a file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show store statistics
    Stats,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Add a new profile
    Add {
        /// Profile name
        name: String,

        /// Hourly rate in dollars
        #[arg(short, long)]
        rate: f32,

        /// Comma-separated skills
        #[arg(short, long)]
        skills: String,

        /// Years of experience
        #[arg(short, long, default_value_t = 0)]
        experience: u32,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Short bio
        #[arg(long)]
        bio: Option<String>,

        /// Portfolio URL
        #[arg(long)]
        portfolio: Option<String>,
    },

    /// List stored profiles
    List,

    /// Show one profile with its past projects
    Show {
        /// Profile name
        name: String,
    },

    /// Update fields on an existing profile
    Update {
        /// Profile name
        name: String,

        /// New hourly rate
        #[arg(short, long)]
        rate: Option<f32>,

        /// Replacement comma-separated skills
        #[arg(short, long)]
        skills: Option<String>,

        /// New years of experience
        #[arg(short, long)]
        experience: Option<u32>,

        /// New bio
        #[arg(long)]
        bio: Option<String>,

        /// New portfolio URL
        #[arg(long)]
        portfolio: Option<String>,
    },

    /// Remove a profile and its projects
    Remove {
        /// Profile name
        name: String,
    },

    /// Attach a past project to a profile
    AddProject {
        /// Profile name
        profile: String,

        /// Project title
        #[arg(short, long)]
        title: String,

        /// Project description
        #[arg(short, long)]
        description: String,

        /// Comma-separated tech stack
        #[arg(long)]
        tech: String,

        /// Outcomes worth citing in proposals
        #[arg(short, long)]
        outcomes: String,

        /// Project URL
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Split a comma-separated list into trimmed, non-empty entries
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_drops_empties() {
        assert_eq!(
            parse_list("python, django, ,  react "),
            vec!["python", "django", "react"]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_parse_output_format() {
        assert!(parse_output_format("JSON").is_ok());
        assert!(parse_output_format("md").is_ok());
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(&PathBuf::from("job.json"), &["json"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("job.yaml"), &["json"]).is_err());
        assert!(validate_file_extension(&PathBuf::from("job"), &["json"]).is_err());
    }
}
