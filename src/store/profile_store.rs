//! JSON-file store for freelancer profiles, past projects, fetched jobs,
//! and analysis history

use crate::analysis::types::{FreelancerProfile, MatchResult, MatchTier};
use crate::error::{JobScoutError, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A stored freelancer profile with the presentation fields the analysis
/// core does not need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreelancerRecord {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub hourly_rate: f32,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FreelancerRecord {
    /// Project the stored record onto the analysis-engine input type.
    pub fn as_profile(&self) -> FreelancerProfile {
        FreelancerProfile {
            skills: self.skills.clone(),
            hourly_rate: self.hourly_rate,
            experience_years: self.experience_years,
        }
    }
}

/// Fields supplied when creating a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub name: String,
    pub email: Option<String>,
    pub hourly_rate: f32,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
}

/// Partial update applied to an existing profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub hourly_rate: Option<f32>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<u32>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastProject {
    pub id: u64,
    pub freelancer_id: u64,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub outcomes: String,
    pub project_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A job posting cached from the job board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredJob {
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    pub description: String,
    pub required_skills: Vec<String>,
    pub client_name: Option<String>,
    pub client_rating: Option<f32>,
    pub avg_pay_rate: Option<f32>,
    pub budget_range: Option<String>,
    pub project_duration: Option<String>,
    pub posted_date: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Snapshot of one analysis run, kept for the stats dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: u64,
    pub freelancer_id: u64,
    pub job_title: String,
    pub passed: bool,
    pub match_tier: MatchTier,
    pub overall_match_score: f32,
    pub recommendation: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Dashboard summary over the store contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_profiles: usize,
    pub total_projects: usize,
    pub total_jobs_fetched: usize,
    pub total_analyses: usize,
    pub passed_analyses: usize,
    pub recent_jobs: Vec<String>,
    pub recent_analyses: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    next_id: u64,
    profiles: Vec<FreelancerRecord>,
    projects: Vec<PastProject>,
    jobs: Vec<StoredJob>,
    analyses: Vec<AnalysisRecord>,
}

/// Single-file JSON store. Every mutation rewrites the file; fine for a
/// single-user CLI.
pub struct ProfileStore {
    path: PathBuf,
    data: StoreData,
}

impl ProfileStore {
    /// Open the store at `path`, creating an empty one when missing.
    pub fn open(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| JobScoutError::Storage(format!("corrupt store file: {}", e)))?
        } else {
            StoreData::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn next_id(&mut self) -> u64 {
        self.data.next_id += 1;
        self.data.next_id
    }

    // Profiles

    pub fn add_profile(&mut self, new: NewProfile) -> Result<FreelancerRecord> {
        if new.name.trim().is_empty() {
            return Err(JobScoutError::InvalidInput("profile name is empty".to_string()));
        }
        if self.find_profile(&new.name).is_some() {
            return Err(JobScoutError::InvalidInput(format!(
                "profile '{}' already exists",
                new.name
            )));
        }

        let now = Utc::now();
        let record = FreelancerRecord {
            id: self.next_id(),
            name: new.name,
            email: new.email,
            hourly_rate: new.hourly_rate,
            skills: new.skills,
            experience_years: new.experience_years,
            bio: new.bio,
            portfolio_url: new.portfolio_url,
            created_at: now,
            updated_at: now,
        };
        self.data.profiles.push(record.clone());
        self.persist()?;
        info!("Stored profile '{}'", record.name);
        Ok(record)
    }

    pub fn list_profiles(&self) -> &[FreelancerRecord] {
        &self.data.profiles
    }

    /// Look a profile up by exact name (case-insensitive).
    pub fn find_profile(&self, name: &str) -> Option<&FreelancerRecord> {
        self.data
            .profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn require_profile(&self, name: &str) -> Result<&FreelancerRecord> {
        self.find_profile(name)
            .ok_or_else(|| JobScoutError::ProfileNotFound(name.to_string()))
    }

    pub fn update_profile(&mut self, name: &str, update: ProfileUpdate) -> Result<FreelancerRecord> {
        let record = self
            .data
            .profiles
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| JobScoutError::ProfileNotFound(name.to_string()))?;

        if let Some(rate) = update.hourly_rate {
            record.hourly_rate = rate;
        }
        if let Some(skills) = update.skills {
            record.skills = skills;
        }
        if let Some(years) = update.experience_years {
            record.experience_years = years;
        }
        if let Some(bio) = update.bio {
            record.bio = Some(bio);
        }
        if let Some(url) = update.portfolio_url {
            record.portfolio_url = Some(url);
        }
        record.updated_at = Utc::now();

        let updated = record.clone();
        self.persist()?;
        Ok(updated)
    }

    pub fn remove_profile(&mut self, name: &str) -> Result<()> {
        let id = self.require_profile(name)?.id;
        self.data.profiles.retain(|p| p.id != id);
        self.data.projects.retain(|p| p.freelancer_id != id);
        self.persist()?;
        info!("Removed profile '{}'", name);
        Ok(())
    }

    // Past projects

    pub fn add_project(
        &mut self,
        profile_name: &str,
        title: String,
        description: String,
        tech_stack: Vec<String>,
        outcomes: String,
        project_url: Option<String>,
    ) -> Result<PastProject> {
        let freelancer_id = self.require_profile(profile_name)?.id;
        let project = PastProject {
            id: self.next_id(),
            freelancer_id,
            title,
            description,
            tech_stack,
            outcomes,
            project_url,
            created_at: Utc::now(),
        };
        self.data.projects.push(project.clone());
        self.persist()?;
        Ok(project)
    }

    pub fn projects_for(&self, profile_name: &str) -> Result<Vec<&PastProject>> {
        let id = self.require_profile(profile_name)?.id;
        Ok(self
            .data
            .projects
            .iter()
            .filter(|p| p.freelancer_id == id)
            .collect())
    }

    // Fetched jobs

    pub fn save_job(&mut self, mut job: StoredJob) -> Result<StoredJob> {
        job.id = self.next_id();
        self.data.jobs.push(job.clone());
        self.persist()?;
        Ok(job)
    }

    pub fn save_jobs(&mut self, jobs: Vec<StoredJob>) -> Result<usize> {
        let count = jobs.len();
        for mut job in jobs {
            job.id = self.next_id();
            self.data.jobs.push(job);
        }
        self.persist()?;
        Ok(count)
    }

    /// Most recently fetched jobs first.
    pub fn list_jobs(&self, limit: usize) -> Vec<&StoredJob> {
        self.data.jobs.iter().rev().take(limit).collect()
    }

    pub fn clear_jobs(&mut self) -> Result<usize> {
        let count = self.data.jobs.len();
        self.data.jobs.clear();
        self.persist()?;
        Ok(count)
    }

    // Analysis history

    pub fn record_analysis(
        &mut self,
        profile_name: &str,
        job_title: &str,
        result: &MatchResult,
    ) -> Result<AnalysisRecord> {
        let freelancer_id = self.require_profile(profile_name)?.id;
        let record = AnalysisRecord {
            id: self.next_id(),
            freelancer_id,
            job_title: job_title.to_string(),
            passed: result.passed,
            match_tier: result.match_tier,
            overall_match_score: result.overall_match_score,
            recommendation: result.recommendation.clone(),
            analyzed_at: Utc::now(),
        };
        self.data.analyses.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    pub fn list_analyses(&self, limit: usize) -> Vec<&AnalysisRecord> {
        self.data.analyses.iter().rev().take(limit).collect()
    }

    // Stats

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_profiles: self.data.profiles.len(),
            total_projects: self.data.projects.len(),
            total_jobs_fetched: self.data.jobs.len(),
            total_analyses: self.data.analyses.len(),
            passed_analyses: self.data.analyses.iter().filter(|a| a.passed).count(),
            recent_jobs: self
                .list_jobs(10)
                .into_iter()
                .map(|j| j.title.clone())
                .collect(),
            recent_analyses: self
                .list_analyses(10)
                .into_iter()
                .map(|a| {
                    format!(
                        "{} - {} ({:.0}%)",
                        a.job_title,
                        if a.passed { "PASS" } else { "FAIL" },
                        a.overall_match_score * 100.0
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn new_profile(name: &str) -> NewProfile {
        NewProfile {
            name: name.to_string(),
            email: Some("dev@example.com".to_string()),
            hourly_rate: 40.0,
            skills: vec!["rust".to_string(), "python".to_string()],
            experience_years: 6,
            bio: None,
            portfolio_url: None,
        }
    }

    fn sample_result() -> MatchResult {
        MatchResult {
            passed: true,
            reasons: vec!["Skills matched: rust (Match: 100%)".to_string()],
            recommendation: "Apply".to_string(),
            skill_match_score: 1.0,
            matched_skills: BTreeSet::from(["rust".to_string()]),
            match_tier: MatchTier::Great,
            overall_match_score: 0.8,
        }
    }

    #[test]
    fn test_profile_round_trip_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = ProfileStore::open(&path).unwrap();
            store.add_profile(new_profile("Alice")).unwrap();
        }

        let store = ProfileStore::open(&path).unwrap();
        let record = store.find_profile("alice").unwrap();
        assert_eq!(record.name, "Alice");
        assert_eq!(record.skills.len(), 2);
        assert_eq!(record.as_profile().hourly_rate, 40.0);
    }

    #[test]
    fn test_duplicate_profile_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(&dir.path().join("store.json")).unwrap();
        store.add_profile(new_profile("Alice")).unwrap();
        assert!(store.add_profile(new_profile("alice")).is_err());
    }

    #[test]
    fn test_update_profile_is_partial() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(&dir.path().join("store.json")).unwrap();
        store.add_profile(new_profile("Alice")).unwrap();

        let updated = store
            .update_profile(
                "Alice",
                ProfileUpdate {
                    hourly_rate: Some(55.0),
                    ..ProfileUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.hourly_rate, 55.0);
        assert_eq!(updated.skills.len(), 2);
    }

    #[test]
    fn test_remove_profile_drops_its_projects() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(&dir.path().join("store.json")).unwrap();
        store.add_profile(new_profile("Alice")).unwrap();
        store
            .add_project(
                "Alice",
                "Data pipeline".to_string(),
                "ETL service".to_string(),
                vec!["python".to_string()],
                "Shipped".to_string(),
                None,
            )
            .unwrap();

        store.remove_profile("Alice").unwrap();
        assert!(store.find_profile("Alice").is_none());
        assert!(store.projects_for("Alice").is_err());
        assert_eq!(store.stats().total_projects, 0);
    }

    #[test]
    fn test_jobs_listed_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(&dir.path().join("store.json")).unwrap();

        for title in ["first", "second", "third"] {
            store
                .save_job(StoredJob {
                    id: 0,
                    title: title.to_string(),
                    url: None,
                    description: String::new(),
                    required_skills: vec![],
                    client_name: None,
                    client_rating: None,
                    avg_pay_rate: None,
                    budget_range: None,
                    project_duration: None,
                    posted_date: None,
                    fetched_at: Utc::now(),
                })
                .unwrap();
        }

        let jobs = store.list_jobs(2);
        assert_eq!(jobs[0].title, "third");
        assert_eq!(jobs[1].title, "second");
        assert_eq!(store.clear_jobs().unwrap(), 3);
    }

    #[test]
    fn test_stats_reflect_recorded_analyses() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::open(&dir.path().join("store.json")).unwrap();
        store.add_profile(new_profile("Alice")).unwrap();
        store
            .record_analysis("Alice", "Rust backend", &sample_result())
            .unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_profiles, 1);
        assert_eq!(stats.total_analyses, 1);
        assert_eq!(stats.passed_analyses, 1);
        assert!(stats.recent_analyses[0].contains("Rust backend"));
    }

    #[test]
    fn test_corrupt_store_surfaces_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            ProfileStore::open(&path),
            Err(JobScoutError::Storage(_))
        ));
    }
}
