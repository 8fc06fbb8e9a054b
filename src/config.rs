use std::path::PathBuf;
use std::time::Duration;

/// Directory scanned for hand history files.
pub const HANDS_DIR: &str = "hands";
/// Directory holding persisted result records.
pub const EXPORTS_DIR: &str = "exports";
/// Chat model queried for strategic analysis.
pub const AI_MODEL: &str = "gpt-4o";
/// Sampling temperature for analysis requests.
pub const AI_TEMPERATURE: f32 = 0.3;
/// Worst-case wall clock for one solver run (seconds).
pub const SOLVER_TIMEOUT: u64 = 300;
/// Worst-case wall clock for one analysis request (seconds).
pub const AI_TIMEOUT: u64 = 120;
/// Concurrent in-flight solver requests. The solver box is a constrained
/// remote resource; keep this small.
pub const SOLVER_WIDTH: usize = 2;

/// Explicit runtime configuration, resolved once at startup from the
/// environment and handed to each component at construction time.
/// Missing endpoints are fatal here, before any hand is touched.
#[derive(Debug, Clone)]
pub struct Config {
    pub solver_url: Option<String>,
    pub openai_url: String,
    pub openai_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub hands: PathBuf,
    pub exports: PathBuf,
    pub solver_timeout: Duration,
    pub ai_timeout: Duration,
    pub solver_width: usize,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            solver_url: std::env::var("GTO_SOLVER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .ok(),
            openai_url: std::env::var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            openai_key: std::env::var("OPENAI_API_KEY").ok(),
            model: std::env::var("GTO_AI_MODEL").unwrap_or_else(|_| AI_MODEL.to_string()),
            temperature: AI_TEMPERATURE,
            hands: std::env::var("GTO_HANDS_DIR")
                .unwrap_or_else(|_| HANDS_DIR.to_string())
                .into(),
            exports: std::env::var("GTO_EXPORTS_DIR")
                .unwrap_or_else(|_| EXPORTS_DIR.to_string())
                .into(),
            solver_timeout: Duration::from_secs(Self::seconds("GTO_SOLVER_TIMEOUT", SOLVER_TIMEOUT)),
            ai_timeout: Duration::from_secs(Self::seconds("GTO_AI_TIMEOUT", AI_TIMEOUT)),
            solver_width: std::env::var("GTO_SOLVER_WIDTH")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(SOLVER_WIDTH)
                .max(1),
        })
    }

    /// The solver endpoint is only required for the solving phase;
    /// listing already-persisted results works without it.
    pub fn solver_url(&self) -> anyhow::Result<&str> {
        self.solver_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GTO_SOLVER_URL must be set for solver analysis"))
    }

    /// The AI key is only required for the enrichment phase, so its
    /// absence surfaces when that phase is requested, not before.
    pub fn api_key(&self) -> anyhow::Result<&str> {
        self.openai_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY must be set for ai analysis"))
    }

    fn seconds(var: &str, default: u64) -> u64 {
        std::env::var(var)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    }
}
