use crate::Probability;
use crate::Utility;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Structured output of one solver run. Every field is optional on the
/// wire; whatever the service omits defaults to empty rather than
/// failing the whole hand. Unknown fields are ignored for forward
/// compatibility. The frequency maps are expected to sum to 1 per
/// decision point but this is a data-quality expectation, not enforced;
/// hands are scored as given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverResult {
    /// Opaque solver commentary, forwarded verbatim into AI prompts.
    #[serde(default)]
    pub solver_output: String,
    /// Position label -> range description, e.g. "BTN" -> "22+, A2s+".
    #[serde(default)]
    pub ranges: BTreeMap<String, String>,
    /// Named decision point -> action frequency in [0, 1].
    #[serde(default)]
    pub frequencies: BTreeMap<String, Probability>,
    /// Named line -> signed EV estimate in big blinds.
    #[serde(default)]
    pub ev_analysis: BTreeMap<String, Utility>,
    /// Solver wall clock, seconds.
    #[serde(default)]
    pub processing_time: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_sparse_and_unknown_fields() {
        let parsed: SolverResult = serde_json::from_str(
            r#"{"frequencies": {"flop_cbet": 0.66}, "engine_build": "gto+ 1.4.2"}"#,
        )
        .unwrap();
        assert_eq!(parsed.frequencies["flop_cbet"], 0.66);
        assert!(parsed.ranges.is_empty());
        assert!(parsed.ev_analysis.is_empty());
        assert_eq!(parsed.processing_time, 0.0);
    }
}
