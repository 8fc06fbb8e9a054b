use crate::hands::hand::HandRecord;
use crate::scoring::deviation;
use crate::solver::result::SolverResult;
use crate::Score;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// The two stages a hand's results move through. A combined record
/// supersedes (never overwrites) the gto-only record it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    GtoOnly,
    Combined,
}

impl Kind {
    /// Storage key prefix, which is how artifacts of the two stages
    /// coexist in one directory.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::GtoOnly => "gto",
            Self::Combined => "analysis",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Solver output plus deviation score for one hand. Immutable once
/// persisted; the score is derived deterministically from the solver
/// result at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GtoRecord {
    pub hand: HandRecord,
    pub solver: SolverResult,
    pub deviation: Score,
    pub processed_at: DateTime<Utc>,
}

impl From<(HandRecord, SolverResult)> for GtoRecord {
    fn from((hand, solver): (HandRecord, SolverResult)) -> Self {
        Self {
            deviation: deviation(&solver),
            hand,
            solver,
            processed_at: Utc::now(),
        }
    }
}

/// A gto record enriched with paid AI commentary. One hand may
/// accumulate several of these across re-analyses; the latest
/// `ai_processed_at` wins for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedRecord {
    #[serde(flatten)]
    pub gto: GtoRecord,
    pub ai_analysis: String,
    pub ai_processed_at: DateTime<Utc>,
}

impl From<(GtoRecord, String)> for CombinedRecord {
    fn from((gto, ai_analysis): (GtoRecord, String)) -> Self {
        Self {
            gto,
            ai_analysis,
            ai_processed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gto_record_scores_at_construction() {
        let hand = HandRecord::parse("h1", "Hand #1 - $1/$2 Holdem\nx");
        let solver = SolverResult {
            ev_analysis: [("river_call".to_string(), -2.0)].into(),
            ..SolverResult::default()
        };
        let record = GtoRecord::from((hand, solver));
        assert!(record.deviation > 0.0);
        assert_eq!(record.deviation, deviation(&record.solver));
    }

    #[test]
    fn combined_record_flattens_over_gto_fields() {
        let hand = HandRecord::parse("h1", "Hand #1 - $1/$2 Holdem\nx");
        let gto = GtoRecord::from((hand, SolverResult::default()));
        let combined = CombinedRecord::from((gto, "thin value all day".to_string()));
        let json = serde_json::to_value(&combined).unwrap();
        assert!(json.get("hand").is_some());
        assert!(json.get("ai_analysis").is_some());
        let back: CombinedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.ai_analysis, "thin value all day");
    }
}
