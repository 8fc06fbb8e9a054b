use crate::solver::result::SolverResult;
use crate::Probability;
use crate::Score;
use crate::Utility;

/// Score per big blind of EV given up on a losing line.
const LOSS_WEIGHT: Score = 1.0;
/// Score of a fully pure (0% or 100%) decision point.
const PURITY_WEIGHT: Score = 0.5;
/// Score of a perfectly mixed (50/50) decision point.
const MIXTURE_WEIGHT: Score = 0.5;
/// Half-width of the band around 0.5 treated as genuinely mixed.
const MIXTURE_BAND: Probability = 0.2;

/// How "interesting" is this hand? Deterministic, total, and
/// side-effect-free: the same solver output always scores the same, so
/// the score can be recomputed from any persisted record. Two things
/// raise the score: EV actually lost on the line taken, and decision
/// points where the equilibrium is either a pure commitment or a
/// genuinely mixed strategy. Frequencies in the boring in-between bands
/// contribute least. Malformed values contribute zero rather than
/// failing the hand.
pub fn deviation(solver: &SolverResult) -> Score {
    let losses = solver.ev_analysis.values().map(|ev| loss(*ev)).sum::<Score>();
    let spots = solver
        .frequencies
        .values()
        .map(|freq| interest(*freq))
        .sum::<Score>();
    losses + spots
}

/// Losing lines contribute in proportion to how much they lose.
fn loss(ev: Utility) -> Score {
    if ev.is_finite() && ev < 0.0 {
        LOSS_WEIGHT * ev.abs()
    } else {
        0.0
    }
}

/// Bimodal in the frequency: one peak at the pure extremes, one at the
/// true mix around 0.5, and a trough in between (~0.15 and ~0.85) where
/// the equilibrium is neither committal nor instructively mixed.
fn interest(freq: Probability) -> Score {
    if !freq.is_finite() || !(0.0..=1.0).contains(&freq) {
        return 0.0;
    }
    let skew = (freq - 0.5).abs() * 2.0;
    let purity = skew.powi(4);
    let mixture = (1.0 - (freq - 0.5).abs() / MIXTURE_BAND).max(0.0);
    PURITY_WEIGHT * purity + MIXTURE_WEIGHT * mixture
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved(ev: &[(&str, f32)], freq: &[(&str, f32)]) -> SolverResult {
        SolverResult {
            ev_analysis: ev.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            frequencies: freq.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            ..SolverResult::default()
        }
    }

    #[test]
    fn empty_result_scores_zero() {
        assert_eq!(deviation(&SolverResult::default()), 0.0);
    }

    #[test]
    fn deterministic() {
        let result = solved(&[("river_call", -2.5)], &[("turn_raise", 0.4)]);
        assert_eq!(deviation(&result), deviation(&result));
    }

    #[test]
    fn never_negative() {
        for result in [
            solved(&[("a", -10.0), ("b", 5.0)], &[("c", 0.0), ("d", 1.0)]),
            solved(&[("a", f32::NAN)], &[("b", f32::NAN), ("c", -3.0)]),
            solved(&[], &[("x", 2.0)]),
        ] {
            assert!(deviation(&result) >= 0.0);
        }
    }

    #[test]
    fn bigger_losses_score_higher() {
        let worse = solved(&[("turn_bet", -4.0)], &[]);
        let lesser = solved(&[("turn_bet", -1.0)], &[]);
        assert!(deviation(&worse) >= deviation(&lesser));
    }

    #[test]
    fn winning_lines_are_free() {
        assert_eq!(deviation(&solved(&[("flop_raise", 3.2)], &[])), 0.0);
    }

    #[test]
    fn pure_and_mixed_beat_the_trough() {
        let pure = interest(1.0);
        let mixed = interest(0.5);
        let trough = interest(0.85);
        assert!(pure > trough);
        assert!(mixed > trough);
    }

    #[test]
    fn malformed_values_contribute_zero() {
        assert_eq!(interest(f32::NAN), 0.0);
        assert_eq!(interest(1.5), 0.0);
        assert_eq!(interest(-0.2), 0.0);
        assert_eq!(loss(f32::NAN), 0.0);
    }
}
