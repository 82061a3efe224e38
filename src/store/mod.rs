//! File-backed storage for profiles, fetched jobs, and analysis history

pub mod profile_store;
