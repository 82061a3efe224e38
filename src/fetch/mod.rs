//! Job-board fetching: rate-limited API client and description skill scan

pub mod client;
pub mod skill_detector;
