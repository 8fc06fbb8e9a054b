use crate::hands::hand::HandRecord;
use crate::solver::result::SolverResult;

pub const SYSTEM: &str = "You're a world-class poker GTO expert. Analyze solver output and provide strategic insights in clear, actionable terms.";

/// Everything the model needs to review one hand: header metadata, the
/// raw history, and the full solver output.
pub fn build(hand: &HandRecord, solver: &SolverResult) -> String {
    format!(
        "\nAnalyze this poker hand using GTO solver output:\n\n\
        HAND DETAILS:\n\
        - Hand ID: {}\n\
        - Stakes: {}\n\
        - Game: {}\n\n\
        HAND HISTORY:\n{}\n\n\
        SOLVER ANALYSIS:\n{}\n\n\
        RANGES:\n{}\n\n\
        FREQUENCIES:\n{}\n\n\
        EV ANALYSIS:\n{}\n\n\
        Please provide:\n\
        1. Strategic assessment of the played line\n\
        2. Key deviations from GTO recommendations\n\
        3. EV impact of any mistakes\n\
        4. Specific improvement suggestions\n\
        5. Learning points for similar spots\n\n\
        Format your response with clear sections and actionable insights.\n",
        hand.hand_id,
        hand.stakes,
        hand.game_type,
        hand.raw_history,
        solver.solver_output,
        pretty(&solver.ranges),
        pretty(&solver.frequencies),
        pretty(&solver.ev_analysis),
    )
}

fn pretty<T: serde::Serialize>(map: &T) -> String {
    serde_json::to_string_pretty(map).unwrap_or_else(|_| "{}".to_string())
}
