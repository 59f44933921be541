use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::models::UNASSIGNED;

#[derive(Debug, Clone)]
pub struct Config {
    pub upstream_base_url: String,
    pub http_port: u16,
    pub upstream_timeout_secs: u64,
    pub departments: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let upstream_base_url =
            env::var("UPSTREAM_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:4000/api".into());
        if upstream_base_url.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "UPSTREAM_BASE_URL".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        let http_port = parse_var("HTTP_PORT", 9090)?;
        let upstream_timeout_secs = parse_var("UPSTREAM_TIMEOUT_SECS", 10)?;

        let departments = match env::var("DEPARTMENTS") {
            Ok(raw) => parse_departments(&raw),
            Err(_) => default_departments(),
        };

        Ok(Self {
            upstream_base_url,
            http_port,
            upstream_timeout_secs,
            departments,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

pub fn default_departments() -> Vec<String> {
    [
        UNASSIGNED,
        "Public Works",
        "Sanitation",
        "Transportation",
        "Parks & Recreation",
        "Water Dept.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Comma-separated override; the sentinel column is always present.
pub fn parse_departments(raw: &str) -> Vec<String> {
    let mut departments: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !departments.iter().any(|d| d == UNASSIGNED) {
        departments.insert(0, UNASSIGNED.to_string());
    }
    departments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_departments_start_with_unassigned() {
        let departments = default_departments();
        assert_eq!(departments[0], UNASSIGNED);
        assert_eq!(departments.len(), 6);
    }

    #[test]
    fn parse_departments_trims_and_drops_empty_entries() {
        let departments = parse_departments("Unassigned, Roads Dept. ,, Lighting");
        assert_eq!(departments, vec!["Unassigned", "Roads Dept.", "Lighting"]);
    }

    #[test]
    fn parse_departments_inserts_missing_sentinel() {
        let departments = parse_departments("Roads Dept.,Lighting");
        assert_eq!(departments[0], UNASSIGNED);
        assert_eq!(departments.len(), 3);
    }
}
