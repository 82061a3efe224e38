//! Rate-limited client for a RapidAPI-style freelance job board

use crate::config::FetcherConfig;
use crate::error::Result;
use crate::fetch::skill_detector::SkillDetector;
use crate::store::profile_store::StoredJob;
use chrono::Utc;
use log::{error, info, warn};
use regex::Regex;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Best-effort job-board client. Requests are rate limited and retried
/// with backoff; when no API key is configured or nothing comes back, a
/// built-in sample set is returned so the rest of the pipeline stays
/// usable offline.
pub struct JobBoardClient {
    http: reqwest::Client,
    host: String,
    api_key: Option<String>,
    min_delay: Duration,
    max_retries: u32,
    last_request: Mutex<Option<Instant>>,
    detector: SkillDetector,
    pay_regex: Regex,
}

impl JobBoardClient {
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            host: config.api_host.clone(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            min_delay: Duration::from_secs(config.min_delay_secs),
            max_retries: config.max_retries,
            last_request: Mutex::new(None),
            detector: SkillDetector::new()?,
            pay_regex: Regex::new(r"\$(\d+[.,]?\d*)").expect("Invalid pay rate regex"),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search the board for each keyword, falling back to sample data when
    /// the API is unreachable or unconfigured.
    pub async fn search_jobs(&self, keywords: &[String], limit: usize) -> Result<Vec<StoredJob>> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                warn!(
                    "No {} set; returning sample jobs instead of querying the job board",
                    API_KEY_ENV
                );
                return Ok(self.sample_jobs());
            }
        };

        let mut all_jobs = Vec::new();
        for keyword in keywords {
            info!("Searching for keyword: {}", keyword);
            let jobs = self.search_keyword(&api_key, keyword, limit).await;
            if jobs.is_empty() {
                warn!("No jobs found for keyword '{}' - API may be rate limited or unavailable", keyword);
            } else {
                info!("Found {} jobs for keyword '{}'", jobs.len(), keyword);
                all_jobs.extend(jobs);
            }
        }

        if all_jobs.is_empty() {
            error!("No jobs retrieved from the job board (rate limit, bad key, or network issue); returning sample jobs");
            return Ok(self.sample_jobs());
        }

        Ok(all_jobs)
    }

    async fn search_keyword(&self, api_key: &str, keyword: &str, limit: usize) -> Vec<StoredJob> {
        let url = format!("https://{}/active-freelance-1h", self.host);

        for attempt in 0..self.max_retries {
            self.rate_limit().await;

            let response = self
                .http
                .get(&url)
                .header("X-RapidAPI-Key", api_key)
                .header("X-RapidAPI-Host", &self.host)
                .query(&[("limit", limit.to_string()), ("search", keyword.to_string())])
                .send()
                .await;

            match response {
                Ok(response) if response.status().is_success() => {
                    match response.json::<Value>().await {
                        Ok(body) => return self.parse_response(body, limit),
                        Err(e) => {
                            error!("Error decoding job board response: {}", e);
                            return Vec::new();
                        }
                    }
                }
                Ok(response) if response.status().as_u16() == 429 => {
                    let wait = Duration::from_secs(1 << attempt);
                    warn!(
                        "Rate limited (429). Waiting {}s before retry {}/{}",
                        wait.as_secs(),
                        attempt + 1,
                        self.max_retries
                    );
                    tokio::time::sleep(wait).await;
                }
                Ok(response) => {
                    warn!("Job board returned status {}", response.status());
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
                Err(e) => {
                    error!("Request error on attempt {}: {}", attempt + 1, e);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }

        error!("Failed to get a response from the job board after {} attempts", self.max_retries);
        Vec::new()
    }

    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_delay {
                let wait = self.min_delay - elapsed;
                info!("Rate limiting: waiting {:.2}s", wait.as_secs_f32());
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn parse_response(&self, body: Value, limit: usize) -> Vec<StoredJob> {
        // The API returns either a bare list or `{ "data": [...] }`.
        let jobs = match body {
            Value::Array(jobs) => jobs,
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(jobs)) => jobs,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        jobs.iter()
            .take(limit)
            .filter_map(|job| self.map_job(job))
            .collect()
    }

    /// Map one API job object to our stored shape, tolerating missing
    /// fields. Absent rating and pay stay `None`; they are never coerced
    /// to zero.
    fn map_job(&self, job: &Value) -> Option<StoredJob> {
        let title = job.get("title")?.as_str()?.trim().to_string();
        if title.is_empty() {
            return None;
        }

        let description = job
            .get("description_text")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string();

        let mut required_skills: Vec<String> = job
            .get("skills")
            .and_then(Value::as_array)
            .map(|skills| {
                skills
                    .iter()
                    .filter_map(|s| s.get("name").and_then(Value::as_str))
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        if required_skills.is_empty() {
            required_skills = self.detector.detect(&description);
        }

        let client_rating = job
            .get("client_score")
            .and_then(Value::as_f64)
            .filter(|score| *score > 0.0)
            .map(|score| score as f32);

        Some(StoredJob {
            id: 0,
            title,
            url: job.get("url").and_then(Value::as_str).map(|s| s.to_string()),
            avg_pay_rate: self.extract_pay_rate(job, &description),
            budget_range: Self::extract_budget_range(job),
            project_duration: job
                .get("engagement_duration")
                .and_then(|d| d.get("label"))
                .and_then(Value::as_str)
                .map(|s| s.to_string()),
            posted_date: job
                .get("date_posted")
                .and_then(Value::as_str)
                .map(|s| s.to_string()),
            client_name: None,
            client_rating,
            required_skills,
            description,
            fetched_at: Utc::now(),
        })
    }

    /// Hourly midpoint first, then total budget, then a `$amount` scan of
    /// the description. `None` when nothing yields a positive number.
    fn extract_pay_rate(&self, job: &Value, description: &str) -> Option<f32> {
        let hourly_min = job.get("project_budget_hourly_min").and_then(Value::as_f64);
        let hourly_max = job.get("project_budget_hourly_max").and_then(Value::as_f64);
        if let (Some(min), Some(max)) = (hourly_min, hourly_max) {
            let midpoint = ((min + max) / 2.0) as f32;
            if midpoint > 0.0 {
                return Some(midpoint);
            }
        }

        if let Some(total) = job.get("project_budget_total").and_then(Value::as_f64) {
            if total > 0.0 {
                return Some(total as f32);
            }
        }

        self.pay_regex
            .captures(description)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().replace(',', "").parse::<f32>().ok())
            .filter(|rate| *rate > 0.0)
    }

    fn extract_budget_range(job: &Value) -> Option<String> {
        let hourly_min = job.get("project_budget_hourly_min").and_then(Value::as_f64);
        let hourly_max = job.get("project_budget_hourly_max").and_then(Value::as_f64);
        let currency = job
            .get("project_budget_currency")
            .and_then(Value::as_str)
            .unwrap_or("USD");

        if let (Some(min), Some(max)) = (hourly_min, hourly_max) {
            return Some(format!("${}-${} {}/hr", min, max, currency));
        }

        job.get("project_budget_total")
            .and_then(Value::as_f64)
            .map(|total| format!("${} {}", total, currency))
    }

    /// Built-in postings used whenever the board is unavailable.
    fn sample_jobs(&self) -> Vec<StoredJob> {
        let now = Utc::now();
        vec![
            StoredJob {
                id: 0,
                title: "Python API Developer".to_string(),
                url: None,
                description: "Build a REST API with FastAPI and PostgreSQL for an analytics product."
                    .to_string(),
                required_skills: vec![
                    "python".to_string(),
                    "fastapi".to_string(),
                    "postgresql".to_string(),
                ],
                client_name: None,
                client_rating: Some(4.7),
                avg_pay_rate: Some(35.0),
                budget_range: Some("$30-$40 USD/hr".to_string()),
                project_duration: Some("3 to 6 months".to_string()),
                posted_date: None,
                fetched_at: now,
            },
            StoredJob {
                id: 0,
                title: "React Dashboard Engineer".to_string(),
                url: None,
                description: "Rework an admin dashboard in React and TypeScript, charts included."
                    .to_string(),
                required_skills: vec![
                    "react".to_string(),
                    "typescript".to_string(),
                    "css".to_string(),
                ],
                client_name: None,
                client_rating: Some(4.2),
                avg_pay_rate: Some(28.0),
                budget_range: Some("$25-$32 USD/hr".to_string()),
                project_duration: Some("1 to 3 months".to_string()),
                posted_date: None,
                fetched_at: now,
            },
            StoredJob {
                id: 0,
                title: "Web Scraping Specialist".to_string(),
                url: None,
                description: "Collect product listings from several storefronts. Budget around $18/hr."
                    .to_string(),
                required_skills: vec!["web scraping".to_string(), "python".to_string()],
                client_name: None,
                client_rating: None,
                avg_pay_rate: Some(18.0),
                budget_range: None,
                project_duration: Some("Less than 1 month".to_string()),
                posted_date: None,
                fetched_at: now,
            },
        ]
    }
}
