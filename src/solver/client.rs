use super::result::SolverResult;
use crate::error::Error;
use crate::hands::hand::HandRecord;
use async_trait::async_trait;
use std::time::Duration;

/// Connectivity probes get a short leash; a slow health endpoint is as
/// good as a dead one.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Seam between the pipelines and the remote solver service.
#[async_trait]
pub trait Solver {
    async fn solve(&self, hand: &HandRecord) -> Result<SolverResult, Error>;
    async fn health(&self) -> bool;
}

/// HTTP client for the GTO+ wrapper service. One POST per hand, under a
/// bounded timeout; the service takes minutes on deep trees.
pub struct GtoPlus {
    url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl GtoPlus {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            timeout,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Solver for GtoPlus {
    async fn solve(&self, hand: &HandRecord) -> Result<SolverResult, Error> {
        let payload = serde_json::json!({
            "hand_id": hand.hand_id,
            "hand_history": hand.raw_history,
            "solver_type": "gto_plus",
            "analysis_depth": "full",
        });
        let response = self
            .http
            .post(format!("{}/api/analyze", self.url))
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::SolverUnavailable(e.to_string()))?;
        match response.status() {
            status if status.is_success() => response
                .json::<SolverResult>()
                .await
                .map_err(|e| Error::SolverMalformedResponse(e.to_string())),
            status => Err(Error::SolverUnavailable(format!("status {}", status))),
        }
    }

    async fn health(&self) -> bool {
        self.http
            .get(format!("{}/health", self.url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}
