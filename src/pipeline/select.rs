use crate::store::record::GtoRecord;
use crate::Score;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Which hands earn the paid AI stage. The three modes are mutually
/// exclusive at the CLI; all of them guarantee a duplicate-free
/// selection.
#[derive(Debug, Clone)]
pub enum Selection {
    /// The N highest-deviation hands.
    TopN(usize),
    /// Every hand at or above a deviation threshold.
    MinScore(Score),
    /// Exactly these hands, in the order given.
    Explicit(Vec<String>),
}

/// The ids to enrich plus the explicit ids that matched no record.
/// Unknown ids are a warning, not a fatal error.
#[derive(Debug, Default, PartialEq)]
pub struct Selected {
    pub ids: Vec<String>,
    pub unknown: Vec<String>,
}

impl Selection {
    /// Expects one authoritative record per hand (`Results::latest_gto`).
    pub fn apply(&self, records: &[GtoRecord]) -> Selected {
        match self {
            Self::TopN(n) => Selected {
                ids: ranked(records).into_iter().take(*n).collect(),
                unknown: Vec::new(),
            },
            Self::MinScore(threshold) => Selected {
                ids: ranked(
                    &records
                        .iter()
                        .filter(|r| r.deviation >= *threshold)
                        .cloned()
                        .collect::<Vec<_>>(),
                ),
                unknown: Vec::new(),
            },
            Self::Explicit(requested) => {
                let known = records
                    .iter()
                    .map(|r| r.hand.hand_id.as_str())
                    .collect::<BTreeSet<_>>();
                let mut seen = BTreeSet::new();
                let mut selected = Selected::default();
                for id in requested {
                    if !seen.insert(id.as_str()) {
                        continue;
                    } else if known.contains(id.as_str()) {
                        selected.ids.push(id.clone());
                    } else {
                        log::warn!("unknown hand id #{}, excluded from selection", id);
                        selected.unknown.push(id.clone());
                    }
                }
                selected
            }
        }
    }
}

/// Descending by deviation score, ties broken by ascending hand id for
/// reproducible ordering.
fn ranked(records: &[GtoRecord]) -> Vec<String> {
    let mut records = records.iter().collect::<Vec<_>>();
    records.sort_by(|a, b| {
        b.deviation
            .partial_cmp(&a.deviation)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.hand.hand_id.cmp(&b.hand.hand_id))
    });
    records.into_iter().map(|r| r.hand.hand_id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hands::hand::HandRecord;
    use crate::solver::result::SolverResult;

    fn record(hand_id: &str, deviation: Score) -> GtoRecord {
        let mut record = GtoRecord::from((
            HandRecord::parse(hand_id, "no header\nx"),
            SolverResult::default(),
        ));
        record.deviation = deviation;
        record
    }

    fn fixture() -> Vec<GtoRecord> {
        vec![
            record("h1", 3.0),
            record("h2", 1.0),
            record("h3", 2.0),
            record("h4", 2.0),
        ]
    }

    #[test]
    fn top_n_takes_highest_with_tiebreak() {
        let selected = Selection::TopN(2).apply(&fixture());
        assert_eq!(selected.ids, vec!["h1", "h3"]);
        assert!(selected.unknown.is_empty());
    }

    #[test]
    fn top_n_larger_than_set_returns_all() {
        let selected = Selection::TopN(10).apply(&fixture());
        assert_eq!(selected.ids, vec!["h1", "h3", "h4", "h2"]);
    }

    #[test]
    fn min_score_orders_descending_then_by_id() {
        let selected = Selection::MinScore(2.0).apply(&fixture());
        assert_eq!(selected.ids, vec!["h1", "h3", "h4"]);
    }

    #[test]
    fn explicit_preserves_order_dedupes_and_flags_unknowns() {
        let requested = ["h4", "h1", "h4", "h9"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let selected = Selection::Explicit(requested).apply(&fixture());
        assert_eq!(selected.ids, vec!["h4", "h1"]);
        assert_eq!(selected.unknown, vec!["h9"]);
    }

    #[test]
    fn never_any_duplicates() {
        for selection in [
            Selection::TopN(4),
            Selection::MinScore(0.0),
            Selection::Explicit(vec!["h1".to_string(), "h1".to_string()]),
        ] {
            let ids = selection.apply(&fixture()).ids;
            let unique = ids.iter().collect::<BTreeSet<_>>();
            assert_eq!(unique.len(), ids.len());
        }
    }
}
