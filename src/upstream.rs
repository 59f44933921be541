use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::Config;
use crate::models::{Report, StatsSummary};

/// Client for the CivicSync report store. Only the contracts consumed by
/// the triage dashboard are wrapped: the full report list, the advisory
/// summary totals, and the department reassignment call.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ListEnvelope {
    data: Vec<Report>,
}

#[derive(Deserialize)]
struct StatsEnvelope {
    data: StatsSummary,
}

impl UpstreamClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.upstream_timeout_secs))
            .build()
            .context("building http client")?;
        Ok(Self {
            http,
            base_url: cfg.upstream_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_reports(&self) -> Result<Vec<Report>> {
        let url = format!("{}/reports", self.base_url);
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("report list request failed")?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            anyhow::bail!(
                "report store error: status={} body={}",
                status,
                truncate(&body)
            );
        }
        let envelope: ListEnvelope = res.json().await.context("decoding report list")?;
        Ok(envelope.data)
    }

    pub async fn fetch_stats(&self) -> Result<StatsSummary> {
        let url = format!("{}/reports/stats", self.base_url);
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("report stats request failed")?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            anyhow::bail!(
                "report store error: status={} body={}",
                status,
                truncate(&body)
            );
        }
        let envelope: StatsEnvelope = res.json().await.context("decoding report stats")?;
        Ok(envelope.data)
    }

    /// Persists a department reassignment. Only success/failure matters to
    /// the caller; timeout expiry counts as failure.
    pub async fn assign_department(&self, report_id: &str, department: &str) -> Result<()> {
        let url = format!("{}/reports/{}/assign", self.base_url, report_id);
        let res = self
            .http
            .put(&url)
            .json(&serde_json::json!({ "department": department }))
            .send()
            .await
            .context("assignment request failed")?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            anyhow::bail!(
                "assignment rejected: status={} body={}",
                status,
                truncate(&body)
            );
        }
        Ok(())
    }
}

fn truncate(s: &str) -> String {
    const MAX: usize = 512;
    if s.len() > MAX {
        format!("{}...", &s[..MAX])
    } else {
        s.to_string()
    }
}
