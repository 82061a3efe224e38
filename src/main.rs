//! Job scout: freelance job-fit analysis and proposal tool

use clap::Parser;
use indicatif::ProgressBar;
use job_scout::analysis::analyzer::JobAnalyzer;
use job_scout::analysis::similarity::provider_from_config;
use job_scout::analysis::types::{FreelancerProfile, JobPosting};
use job_scout::cli::{self, Cli, Commands, ConfigAction, ProfileAction};
use job_scout::config::Config;
use job_scout::error::{JobScoutError, Result};
use job_scout::fetch::client::JobBoardClient;
use job_scout::output::formatter::formatter_for;
use job_scout::output::report::AnalysisReport;
use job_scout::proposal::generator::ProposalGenerator;
use job_scout::store::profile_store::{NewProfile, ProfileStore, ProfileUpdate};
use log::{error, info, warn};
use std::path::Path;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            job,
            profile,
            profile_file,
            output,
            detailed,
            save,
        } => {
            let posting = load_job(&job)?;
            let output_format = cli::parse_output_format(&output).map_err(JobScoutError::InvalidInput)?;

            let mut store = ProfileStore::open(&Config::store_path())?;
            let (profile_name, freelancer) = match (&profile, &profile_file) {
                (Some(name), _) => {
                    let record = store.require_profile(name)?.clone();
                    (record.name.clone(), record.as_profile())
                }
                (None, Some(path)) => {
                    cli::validate_file_extension(path, &["json"])
                        .map_err(|e| JobScoutError::InvalidInput(format!("Profile file: {}", e)))?;
                    let content = std::fs::read_to_string(path)?;
                    let freelancer: FreelancerProfile = serde_json::from_str(&content)?;
                    let name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| "profile".to_string());
                    (name, freelancer)
                }
                (None, None) => {
                    return Err(JobScoutError::InvalidInput(
                        "Provide --profile <name> or --profile-file <path>".to_string(),
                    ));
                }
            };

            info!("Analyzing '{}' against profile '{}'", posting.title, profile_name);

            let provider = provider_from_config(&config.matching);
            info!("Similarity backend: {}", provider.name());
            let analyzer = JobAnalyzer::new(provider, &config);
            let result = analyzer.analyze(&posting, &freelancer);

            if save {
                match &profile {
                    Some(name) => {
                        store.record_analysis(name, &posting.title, &result)?;
                        info!("Recorded analysis in history");
                    }
                    None => warn!("--save only applies to stored profiles; skipping"),
                }
            }

            let report = AnalysisReport::new(&posting, &profile_name, result);
            let formatter = formatter_for(
                output_format,
                config.output.color_output,
                detailed || config.output.detailed,
            );
            println!("{}", formatter.format_report(&report)?);
        }

        Commands::Fetch {
            keywords,
            limit,
            store,
        } => {
            let keywords = cli::parse_list(&keywords);
            if keywords.is_empty() {
                return Err(JobScoutError::InvalidInput(
                    "Provide at least one search keyword".to_string(),
                ));
            }

            let client = JobBoardClient::from_config(&config.fetcher)?;
            if !client.has_api_key() {
                println!("⚠️  No API key configured - showing sample jobs");
            }

            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Fetching jobs for {} keyword(s)...", keywords.len()));
            spinner.enable_steady_tick(Duration::from_millis(120));

            let jobs = client.search_jobs(&keywords, limit).await?;
            spinner.finish_and_clear();

            println!("📋 Fetched {} job(s)\n", jobs.len());
            for job in &jobs {
                println!("• {}", job.title);
                if let Some(rate) = job.avg_pay_rate {
                    println!("  Rate: ${}/hr", rate);
                } else if let Some(range) = &job.budget_range {
                    println!("  Budget: {}", range);
                }
                if let Some(rating) = job.client_rating {
                    println!("  Client rating: {}", rating);
                }
                if !job.required_skills.is_empty() {
                    println!("  Skills: {}", job.required_skills.join(", "));
                }
                println!();
            }

            if store {
                let mut store = ProfileStore::open(&Config::store_path())?;
                let count = store.save_jobs(jobs)?;
                println!("💾 Cached {} job(s) in the store", count);
            }
        }

        Commands::Profile { action } => run_profile_action(action)?,

        Commands::Propose { job, profile, save } => {
            let posting = load_job(&job)?;
            let store = ProfileStore::open(&Config::store_path())?;
            let record = store.require_profile(&profile)?.clone();
            let projects = store.projects_for(&profile)?;

            // Run the analysis first so the proposal can cite matched skills.
            let provider = provider_from_config(&config.matching);
            let analyzer = JobAnalyzer::new(provider, &config);
            let result = analyzer.analyze(&posting, &record.as_profile());

            let proposal = ProposalGenerator::generate(&posting, &record, &projects, &result)?;

            match save {
                Some(path) => {
                    std::fs::write(&path, &proposal)?;
                    println!("✅ Proposal written to {}", path.display());
                }
                None => println!("{}", proposal),
            }
        }

        Commands::Stats => {
            let store = ProfileStore::open(&Config::store_path())?;
            let stats = store.stats();

            println!("📊 Job Scout Statistics\n");
            println!("Profiles: {}", stats.total_profiles);
            println!("Past projects: {}", stats.total_projects);
            println!("Jobs fetched: {}", stats.total_jobs_fetched);
            println!(
                "Analyses: {} ({} passed)",
                stats.total_analyses, stats.passed_analyses
            );

            if !stats.recent_jobs.is_empty() {
                println!("\nRecent jobs:");
                for title in &stats.recent_jobs {
                    println!("  • {}", title);
                }
            }

            if !stats.recent_analyses.is_empty() {
                println!("\nRecent analyses:");
                for line in &stats.recent_analyses {
                    println!("  • {}", line);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Gates:");
                println!("  Min client rating: {}", config.gates.min_client_rating);
                println!("  Min hourly rate: ${}/hr", config.gates.min_hourly_rate);
                println!(
                    "  Min skill match: {:.0}%",
                    config.gates.min_skill_match * 100.0
                );
                println!("\nScoring weights:");
                println!("  Skills: {:.0}%", config.scoring.skill_weight * 100.0);
                println!("  Client: {:.0}%", config.scoring.client_weight * 100.0);
                println!("  Rate: {:.0}%", config.scoring.rate_weight * 100.0);
                println!(
                    "  Experience: {:.0}% (component {})",
                    config.scoring.experience_weight * 100.0,
                    config.scoring.experience_component
                );
                println!("\nMatching:");
                println!("  Provider: {:?}", config.matching.provider);
                println!(
                    "  Similarity threshold: {}",
                    config.matching.similarity_threshold
                );
                if let Some(path) = &config.matching.vectors_path {
                    println!("  Vectors file: {}", path.display());
                }
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

fn run_profile_action(action: ProfileAction) -> Result<()> {
    let mut store = ProfileStore::open(&Config::store_path())?;

    match action {
        ProfileAction::Add {
            name,
            rate,
            skills,
            experience,
            email,
            bio,
            portfolio,
        } => {
            let skills = cli::parse_list(&skills);
            if skills.is_empty() {
                return Err(JobScoutError::InvalidInput(
                    "Provide at least one skill".to_string(),
                ));
            }
            let record = store.add_profile(NewProfile {
                name,
                email,
                hourly_rate: rate,
                skills,
                experience_years: experience,
                bio,
                portfolio_url: portfolio,
            })?;
            println!("✅ Added profile '{}' (id {})", record.name, record.id);
        }

        ProfileAction::List => {
            let profiles = store.list_profiles();
            if profiles.is_empty() {
                println!("No profiles stored yet. Add one with: job-scout profile add");
                return Ok(());
            }
            println!("👤 Profiles:\n");
            for profile in profiles {
                println!(
                    "• {} - ${}/hr, {} skill(s), {} year(s) experience",
                    profile.name,
                    profile.hourly_rate,
                    profile.skills.len(),
                    profile.experience_years
                );
            }
        }

        ProfileAction::Show { name } => {
            let record = store.require_profile(&name)?;
            println!("Name: {}", record.name);
            if let Some(email) = &record.email {
                println!("Email: {}", email);
            }
            println!("Hourly rate: ${}/hr", record.hourly_rate);
            println!("Experience: {} year(s)", record.experience_years);
            println!("Skills: {}", record.skills.join(", "));
            if let Some(bio) = &record.bio {
                println!("Bio: {}", bio);
            }
            if let Some(url) = &record.portfolio_url {
                println!("Portfolio: {}", url);
            }

            let projects = store.projects_for(&name)?;
            if !projects.is_empty() {
                println!("\nPast projects:");
                for project in projects {
                    println!(
                        "  • {} ({}): {}",
                        project.title,
                        project.tech_stack.join(", "),
                        project.outcomes
                    );
                }
            }
        }

        ProfileAction::Update {
            name,
            rate,
            skills,
            experience,
            bio,
            portfolio,
        } => {
            let update = ProfileUpdate {
                hourly_rate: rate,
                skills: skills.map(|s| cli::parse_list(&s)),
                experience_years: experience,
                bio,
                portfolio_url: portfolio,
            };
            let record = store.update_profile(&name, update)?;
            println!("✅ Updated profile '{}'", record.name);
        }

        ProfileAction::Remove { name } => {
            store.remove_profile(&name)?;
            println!("🗑️  Removed profile '{}'", name);
        }

        ProfileAction::AddProject {
            profile,
            title,
            description,
            tech,
            outcomes,
            url,
        } => {
            let project = store.add_project(
                &profile,
                title,
                description,
                cli::parse_list(&tech),
                outcomes,
                url,
            )?;
            println!("✅ Added project '{}' to '{}'", project.title, profile);
        }
    }

    Ok(())
}

/// Read and validate a job posting JSON file.
fn load_job(path: &Path) -> Result<JobPosting> {
    cli::validate_file_extension(&path.to_path_buf(), &["json"])
        .map_err(|e| JobScoutError::InvalidInput(format!("Job file: {}", e)))?;

    if !path.exists() {
        return Err(JobScoutError::InvalidInput(format!(
            "Job file does not exist: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let posting: JobPosting = serde_json::from_str(&content)?;

    if posting.title.trim().is_empty() {
        return Err(JobScoutError::InvalidInput(
            "Job posting has no title".to_string(),
        ));
    }

    Ok(posting)
}
